//! 고정 자재 카탈로그. 가격은 참고용 정액이며 실행 중 바뀌지 않는다.
//! 실제 견적 시 공급사 최신 단가로 검증해야 한다.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Panel,
    Inverter,
    Battery,
    Structure,
    Protection,
    Cables,
}

impl Category {
    /// 자재 명세서에 나오는 순서.
    pub const ALL: [Category; 6] = [
        Category::Panel,
        Category::Inverter,
        Category::Battery,
        Category::Structure,
        Category::Protection,
        Category::Cables,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Panel => "Panel",
            Category::Inverter => "Inverter",
            Category::Battery => "Battery",
            Category::Structure => "Structure",
            Category::Protection => "Protection",
            Category::Cables => "Cables",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 정격 표기. 패널만 와트 수치를 가진다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rating {
    Watts(u32),
    Spec(&'static str),
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rating::Watts(w) => write!(f, "{w}W"),
            Rating::Spec(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricedComponent {
    pub category: Category,
    pub name: &'static str,
    pub rating: Rating,
    pub unit_price: f64,
}

impl PricedComponent {
    /// 패널 정격을 kW로 반환한다. 패널이 아니면 None.
    pub fn rating_kw(&self) -> Option<f64> {
        match self.rating {
            Rating::Watts(w) => Some(f64::from(w) / 1000.0),
            Rating::Spec(_) => None,
        }
    }
}

pub fn components() -> &'static [PricedComponent] {
    MATERIALS
}

/// 카테고리에서 자재 명세서에 쓰는 대표 품목(카탈로그상 첫 항목)을 찾는다.
pub fn primary_component(category: Category) -> Option<&'static PricedComponent> {
    MATERIALS.iter().find(|c| c.category == category)
}

pub fn find_component(name: &str) -> Option<&'static PricedComponent> {
    MATERIALS.iter().find(|c| c.name.eq_ignore_ascii_case(name))
}

const MATERIALS: &[PricedComponent] = &[
    item(Category::Panel, "Monocrystalline 450W", Rating::Watts(450), 12_000.0),
    item(Category::Panel, "Polycrystalline 350W", Rating::Watts(350), 8_000.0),
    item(Category::Inverter, "Hybrid Inverter 5kW", Rating::Spec("5kW"), 55_000.0),
    item(Category::Battery, "Li-ion 5kWh", Rating::Spec("5kWh"), 70_000.0),
    item(Category::Structure, "Roof Mounting Kit", Rating::Spec("per kW"), 4_000.0),
    item(Category::Protection, "ACDB/MCB/Protection", Rating::Spec("per system"), 8_000.0),
    item(Category::Cables, "PV Cables & Accessories", Rating::Spec("per kW"), 2_000.0),
];

const fn item(
    category: Category,
    name: &'static str,
    rating: Rating,
    unit_price: f64,
) -> PricedComponent {
    PricedComponent {
        category,
        name,
        rating,
        unit_price,
    }
}
