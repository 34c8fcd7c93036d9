use crate::sizing::{round_to, round_to_half_kw, EPSILON, KWH_PER_KW_PER_MONTH};

/// 배터리 미포함 시 kW당 설치비 [통화/kW]
pub const COST_PER_KW_NO_BATTERY: f64 = 40_000.0;
/// 배터리 포함 시 kW당 설치비 [통화/kW]
pub const COST_PER_KW_WITH_BATTERY: f64 = 60_000.0;

/// 주거용 추정 결과.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResidentialEstimate {
    /// 월 사용량 [kWh]
    pub monthly_consumption_kwh: f64,
    /// 추천 설비 용량 [kW], 0.5 kW 단위
    pub recommended_system_kw: f64,
    /// 월 예상 발전량 [kWh]
    pub monthly_generation_kwh: f64,
    /// 총 설치비 [통화]
    pub total_cost: f64,
    /// 월 절감액 [통화]
    pub monthly_savings: f64,
    /// 단순 회수기간 [년], 소수 첫째 자리
    pub payback_years: f64,
}

/// 월 전기요금과 요금 단가로 주거용 설비를 추정한다.
///
/// `tariff_rate`는 0보다 커야 하며 호출 측에서 검증한다. 전기요금이 0 이하이면
/// 오류 없이 최소 용량(0.5 kW) 설비로 계산된다.
pub fn estimate_residential(
    bill_amount: f64,
    tariff_rate: f64,
    has_battery: bool,
) -> ResidentialEstimate {
    let monthly_consumption_kwh = bill_amount / tariff_rate;
    let recommended_system_kw = round_to_half_kw(monthly_consumption_kwh / KWH_PER_KW_PER_MONTH);
    let cost_per_kw = if has_battery {
        COST_PER_KW_WITH_BATTERY
    } else {
        COST_PER_KW_NO_BATTERY
    };
    let total_cost = recommended_system_kw * cost_per_kw;
    let monthly_generation_kwh = recommended_system_kw * KWH_PER_KW_PER_MONTH;
    let monthly_savings = monthly_generation_kwh * tariff_rate;
    let payback_years = round_to(total_cost / (monthly_savings * 12.0 + EPSILON), 1);

    ResidentialEstimate {
        monthly_consumption_kwh,
        recommended_system_kw,
        monthly_generation_kwh,
        total_cost,
        monthly_savings,
        payback_years,
    }
}
