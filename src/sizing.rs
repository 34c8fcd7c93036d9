//! 두 추정기가 공유하는 기준 상수와 반올림 규칙.

/// 설비 1 kW당 월 평균 발전량 [kWh/월]
pub const KWH_PER_KW_PER_MONTH: f64 = 120.0;

/// 일 평균 일사 시간 [h/일]
pub const SOLAR_HOURS_PER_DAY: f64 = 5.0;

/// 설치 가능한 최소 설비 용량 [kW]
pub const MIN_SYSTEM_KW: f64 = 0.5;

/// 기본 전력 요금 단가 [통화/kWh]
pub const DEFAULT_TARIFF: f64 = 8.0;

/// 0 나눗셈 방지용 작은 값.
pub const EPSILON: f64 = 1e-6;

/// 마력 → kW 환산 계수
pub const KW_PER_HP: f64 = 0.746;

/// 원시 용량을 0.5 kW 단위로 반올림하고 최소 용량으로 하한을 건다.
///
/// 정확히 중간값(x.25, x.75)은 짝수 쪽으로 반올림한다.
pub fn round_to_half_kw(raw_kw: f64) -> f64 {
    MIN_SYSTEM_KW.max((raw_kw * 2.0).round_ties_even() / 2.0)
}

/// 소수점 `digits` 자리로 반올림한다.
pub fn round_to(value: f64, digits: i32) -> f64 {
    let scale = 10f64.powi(digits);
    (value * scale).round_ties_even() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_kw_rounding_snaps_to_nearest_step() {
        assert_eq!(round_to_half_kw(2.083), 2.0);
        assert_eq!(round_to_half_kw(1.492), 1.5);
        assert_eq!(round_to_half_kw(2.8), 3.0);
    }

    #[test]
    fn half_kw_rounding_has_floor() {
        assert_eq!(round_to_half_kw(0.0), MIN_SYSTEM_KW);
        assert_eq!(round_to_half_kw(0.1), MIN_SYSTEM_KW);
        assert_eq!(round_to_half_kw(-4.0), MIN_SYSTEM_KW);
    }

    #[test]
    fn half_kw_ties_go_to_even_step() {
        // 1.25 kW -> 2.5 half-steps -> 2 -> 1.0 kW
        assert_eq!(round_to_half_kw(1.25), 1.0);
        assert_eq!(round_to_half_kw(1.75), 2.0);
    }

    #[test]
    fn round_to_one_decimal() {
        assert!((round_to(3.4722, 1) - 3.5).abs() < 1e-12);
        assert!((round_to(1.492, 2) - 1.49).abs() < 1e-12);
    }
}
