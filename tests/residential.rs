//! 주거용 추정기 회귀 테스트.
use smart_solar_estimator::estimator::{estimate_residential, COST_PER_KW_WITH_BATTERY};

fn is_half_kw_step(kw: f64) -> bool {
    (kw * 2.0 - (kw * 2.0).round()).abs() < 1e-12
}

#[test]
fn two_thousand_bill_at_default_tariff() {
    let res = estimate_residential(2000.0, 8.0, false);
    assert!((res.monthly_consumption_kwh - 250.0).abs() < 1e-9);
    assert_eq!(res.recommended_system_kw, 2.0);
    assert!((res.total_cost - 80_000.0).abs() < 1e-9);
    assert!((res.monthly_generation_kwh - 240.0).abs() < 1e-9);
    assert!((res.monthly_savings - 1920.0).abs() < 1e-9);
    assert!((res.payback_years - 3.5).abs() < 1e-9);
}

#[test]
fn battery_raises_cost_per_kw() {
    let res = estimate_residential(2000.0, 8.0, true);
    assert_eq!(res.recommended_system_kw, 2.0);
    assert!((res.total_cost - 2.0 * COST_PER_KW_WITH_BATTERY).abs() < 1e-9);
    // 120_000 / 23_040 = 5.208 -> 5.2
    assert!((res.payback_years - 5.2).abs() < 1e-9);
}

#[test]
fn zero_bill_gets_minimum_system_and_finite_payback() {
    let res = estimate_residential(0.0, 8.0, false);
    assert_eq!(res.monthly_consumption_kwh, 0.0);
    assert_eq!(res.recommended_system_kw, 0.5);
    assert!(res.payback_years.is_finite());
    assert!((res.total_cost - 20_000.0).abs() < 1e-9);
}

#[test]
fn negative_bill_is_degenerate_not_an_error() {
    let res = estimate_residential(-500.0, 8.0, false);
    assert_eq!(res.recommended_system_kw, 0.5);
    assert!(res.monthly_consumption_kwh < 0.0);
}

#[test]
fn system_size_is_half_kw_multiple_with_floor() {
    for tariff in [2.5, 6.0, 8.0, 11.75] {
        let mut bill = 0.0;
        while bill <= 40_000.0 {
            let res = estimate_residential(bill, tariff, false);
            assert!(res.recommended_system_kw >= 0.5, "bill={bill} tariff={tariff}");
            assert!(is_half_kw_step(res.recommended_system_kw), "bill={bill}");
            bill += 137.0;
        }
    }
}

#[test]
fn doubling_bill_never_shrinks_system() {
    let mut bill = 1.0;
    while bill < 1.0e6 {
        let small = estimate_residential(bill, 8.0, false);
        let large = estimate_residential(bill * 2.0, 8.0, false);
        assert!(large.recommended_system_kw >= small.recommended_system_kw, "bill={bill}");
        bill *= 1.37;
    }
}

#[test]
fn repeated_calls_are_bit_identical() {
    let a = estimate_residential(3456.78, 7.25, true);
    let b = estimate_residential(3456.78, 7.25, true);
    assert_eq!(a.total_cost.to_bits(), b.total_cost.to_bits());
    assert_eq!(a.payback_years.to_bits(), b.payback_years.to_bits());
    assert_eq!(a, b);
}
