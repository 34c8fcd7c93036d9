use crate::sizing::{round_to_half_kw, KWH_PER_KW_PER_MONTH, KW_PER_HP, SOLAR_HOURS_PER_DAY};

/// 배터리 미포함 시 kW당 설치비 [통화/kW]
pub const AGR_COST_PER_KW_NO_BATTERY: f64 = 35_000.0;
/// 배터리 포함 시 kW당 설치비 [통화/kW]
pub const AGR_COST_PER_KW_WITH_BATTERY: f64 = 55_000.0;

/// 양수 펌프용 추정 결과. 회수기간은 계산하지 않는다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgricultureEstimate {
    /// 펌프 전력 [kW]
    pub pump_power_kw: f64,
    /// 일 운전 시간 [h]
    pub run_hours_per_day: f64,
    /// 일 소요 에너지 [kWh]
    pub daily_energy_kwh: f64,
    /// 추천 설비 용량 [kW], 0.5 kW 단위
    pub recommended_system_kw: f64,
    /// 월 예상 발전량 [kWh]
    pub monthly_generation_kwh: f64,
    /// 총 설치비 [통화]
    pub total_cost: f64,
}

/// 펌프 마력과 일 운전 시간으로 농업용 설비를 추정한다.
pub fn estimate_agriculture(
    pump_horsepower: f64,
    run_hours_per_day: f64,
    has_battery: bool,
) -> AgricultureEstimate {
    let pump_power_kw = pump_horsepower * KW_PER_HP;
    let daily_energy_kwh = pump_power_kw * run_hours_per_day;
    let recommended_system_kw = round_to_half_kw(daily_energy_kwh / SOLAR_HOURS_PER_DAY);
    let cost_per_kw = if has_battery {
        AGR_COST_PER_KW_WITH_BATTERY
    } else {
        AGR_COST_PER_KW_NO_BATTERY
    };

    AgricultureEstimate {
        pump_power_kw,
        run_hours_per_day,
        daily_energy_kwh,
        recommended_system_kw,
        monthly_generation_kwh: recommended_system_kw * KWH_PER_KW_PER_MONTH,
        total_cost: recommended_system_kw * cost_per_kw,
    }
}
