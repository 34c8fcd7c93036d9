//! 자재 명세 산출 테스트.
use smart_solar_estimator::catalogue::{self, Category, Rating};
use smart_solar_estimator::estimator::{estimate_agriculture, estimate_residential};
use smart_solar_estimator::materials::{derive_materials, LineQuantity, MaterialsError};

#[test]
fn two_kw_bill_of_materials() {
    let bom = derive_materials(2.0).expect("bom");
    assert_eq!(bom.line(Category::Panel).unwrap().quantity, LineQuantity::Count(5));
    assert_eq!(bom.line(Category::Inverter).unwrap().quantity, LineQuantity::Count(1));
    assert_eq!(bom.line(Category::Battery).unwrap().quantity, LineQuantity::Count(1));
    assert_eq!(bom.line(Category::Structure).unwrap().quantity, LineQuantity::Kilowatts(2.0));
    assert_eq!(bom.line(Category::Protection).unwrap().quantity, LineQuantity::Count(1));
    assert_eq!(bom.line(Category::Cables).unwrap().quantity, LineQuantity::Kilowatts(2.0));
}

#[test]
fn lines_follow_category_order() {
    for kw in [0.5, 1.5, 2.0, 7.5, 20.0] {
        let bom = derive_materials(kw).unwrap();
        let order: Vec<Category> = bom.lines.iter().map(|l| l.category).collect();
        assert_eq!(order, Category::ALL.to_vec());
    }
}

#[test]
fn line_totals_are_quantity_times_price() {
    let bom = derive_materials(7.5).unwrap();
    for line in &bom.lines {
        assert!((line.line_total - line.quantity.as_f64() * line.unit_price).abs() < 1e-9);
    }
    // 17 panels, 1 inverter, 2 batteries, 7.5 kW structure, 1 protection, 7.5 kW cables
    let expected = 17.0 * 12_000.0 + 55_000.0 + 2.0 * 70_000.0 + 7.5 * 4_000.0 + 8_000.0
        + 7.5 * 2_000.0;
    assert!((bom.total() - expected).abs() < 1e-9);
}

#[test]
fn battery_count_scales_every_three_kw() {
    let qty = |kw: f64| derive_materials(kw).unwrap().line(Category::Battery).unwrap().quantity;
    assert_eq!(qty(0.5), LineQuantity::Count(1));
    assert_eq!(qty(3.0), LineQuantity::Count(1));
    assert_eq!(qty(6.0), LineQuantity::Count(2));
    assert_eq!(qty(10.5), LineQuantity::Count(3));
}

#[test]
fn battery_line_present_even_without_battery_option() {
    let res = estimate_residential(2000.0, 8.0, false);
    let bom = derive_materials(res.recommended_system_kw).unwrap();
    assert!(bom.line(Category::Battery).is_some());
}

#[test]
fn panel_line_uses_first_panel_in_catalogue() {
    let bom = derive_materials(1.5).unwrap();
    let panel = bom.line(Category::Panel).unwrap();
    assert_eq!(panel.item_name, "Monocrystalline 450W");
    assert_eq!(panel.unit_price, 12_000.0);
}

#[test]
fn non_positive_size_is_rejected() {
    assert_eq!(derive_materials(0.0), Err(MaterialsError::NonPositiveSystemSize(0.0)));
    assert!(derive_materials(-1.0).is_err());
    assert!(derive_materials(f64::NAN).is_err());
}

#[test]
fn large_counts_stay_exact_below_u32_limit() {
    let bom = derive_materials(1.0e9).unwrap();
    assert_eq!(bom.line(Category::Panel).unwrap().quantity, LineQuantity::Count(2_222_222_223));
    assert_eq!(bom.line(Category::Battery).unwrap().quantity, LineQuantity::Count(333_333_333));
}

#[test]
fn panel_count_beyond_u32_is_an_error() {
    let kw = estimate_residential(1.0e13, 8.0, false).recommended_system_kw;
    assert_eq!(kw, 10_416_666_666.5);
    match derive_materials(kw) {
        Err(MaterialsError::QuantityOverflow { category, count }) => {
            assert_eq!(category, Category::Panel);
            assert!(count > f64::from(u32::MAX));
        }
        other => panic!("expected overflow, got {other:?}"),
    }
}

#[test]
fn estimator_output_feeds_deriver() {
    let res = estimate_agriculture(2.0, 5.0, false);
    let bom = derive_materials(res.recommended_system_kw).unwrap();
    assert_eq!(bom.lines.len(), 6);
    assert_eq!(bom.system_kw, 1.5);
}

#[test]
fn catalogue_contents() {
    let items = catalogue::components();
    assert_eq!(items.len(), 7);
    assert_eq!(items[0].rating, Rating::Watts(450));
    assert_eq!(items[1].rating, Rating::Watts(350));
    assert!(items.iter().all(|c| c.unit_price >= 0.0));
    assert_eq!(
        catalogue::find_component("li-ion 5kwh").map(|c| c.category),
        Some(Category::Battery)
    );
    assert_eq!(catalogue::primary_component(Category::Panel).unwrap().name, "Monocrystalline 450W");
}
