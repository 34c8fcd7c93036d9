//! 설비 용량으로부터 자재 명세서(BoM)를 산출한다.

use std::fmt;

use crate::catalogue::{self, Category, PricedComponent};

/// 배터리 1개가 담당하는 설비 용량 [kW]
const KW_PER_BATTERY_UNIT: f64 = 3.0;

/// 자재 명세서 산출 오류.
#[derive(Debug, Clone, PartialEq)]
pub enum MaterialsError {
    /// 설비 용량이 0 이하이거나 유한하지 않음
    NonPositiveSystemSize(f64),
    /// 카탈로그에 해당 카테고리 품목이 없음
    MissingComponent(Category),
    /// 개수 단위 수량이 표현 범위(u32)를 넘음
    QuantityOverflow { category: Category, count: f64 },
}

impl fmt::Display for MaterialsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaterialsError::NonPositiveSystemSize(kw) => {
                write!(f, "system size must be positive, got {kw} kW")
            }
            MaterialsError::MissingComponent(c) => write!(f, "no catalogue item for {c}"),
            MaterialsError::QuantityOverflow { category, count } => {
                write!(f, "{category} quantity {count} exceeds {}", u32::MAX)
            }
        }
    }
}

impl std::error::Error for MaterialsError {}

/// 품목 수량. 개수 단위 품목과 kW 비례 품목을 구분한다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineQuantity {
    Count(u32),
    Kilowatts(f64),
}

impl LineQuantity {
    pub fn as_f64(&self) -> f64 {
        match *self {
            LineQuantity::Count(n) => f64::from(n),
            LineQuantity::Kilowatts(kw) => kw,
        }
    }
}

impl fmt::Display for LineQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineQuantity::Count(n) => write!(f, "{n}"),
            LineQuantity::Kilowatts(kw) => write!(f, "{kw:.1}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MaterialLine {
    pub category: Category,
    pub item_name: &'static str,
    pub quantity: LineQuantity,
    pub unit_price: f64,
    pub line_total: f64,
}

impl MaterialLine {
    fn new(component: &PricedComponent, quantity: LineQuantity) -> Self {
        Self {
            category: component.category,
            item_name: component.name,
            quantity,
            unit_price: component.unit_price,
            line_total: quantity.as_f64() * component.unit_price,
        }
    }
}

/// 카테고리당 한 줄, 카탈로그 순서를 따르는 자재 명세서.
#[derive(Debug, Clone, PartialEq)]
pub struct BillOfMaterials {
    pub system_kw: f64,
    pub lines: Vec<MaterialLine>,
}

impl BillOfMaterials {
    pub fn total(&self) -> f64 {
        self.lines.iter().map(|l| l.line_total).sum()
    }

    pub fn line(&self, category: Category) -> Option<&MaterialLine> {
        self.lines.iter().find(|l| l.category == category)
    }
}

/// 이미 정수로 맞춘 개수를 `u32`로 바꾼다. 범위를 넘으면 잘라내지 않고 오류를 낸다.
fn count(category: Category, units: f64) -> Result<LineQuantity, MaterialsError> {
    if units > f64::from(u32::MAX) {
        return Err(MaterialsError::QuantityOverflow {
            category,
            count: units,
        });
    }
    Ok(LineQuantity::Count(units as u32))
}

/// 설비 용량 [kW]에 필요한 자재 명세서를 산출한다.
///
/// 배터리 항목은 배터리 옵션 선택 여부와 관계없이 항상 포함된다.
pub fn derive_materials(system_kw: f64) -> Result<BillOfMaterials, MaterialsError> {
    if !system_kw.is_finite() || system_kw <= 0.0 {
        return Err(MaterialsError::NonPositiveSystemSize(system_kw));
    }

    let mut lines = Vec::with_capacity(Category::ALL.len());
    for category in Category::ALL {
        let component = catalogue::primary_component(category)
            .ok_or(MaterialsError::MissingComponent(category))?;
        let quantity = match category {
            Category::Panel => {
                let panel_kw = component
                    .rating_kw()
                    .ok_or(MaterialsError::MissingComponent(category))?;
                count(category, (system_kw / panel_kw).ceil())?
            }
            Category::Battery => {
                count(category, (system_kw / KW_PER_BATTERY_UNIT).trunc().max(1.0))?
            }
            Category::Inverter | Category::Protection => LineQuantity::Count(1),
            Category::Structure | Category::Cables => LineQuantity::Kilowatts(system_kw),
        };
        lines.push(MaterialLine::new(component, quantity));
    }

    Ok(BillOfMaterials { system_kw, lines })
}
