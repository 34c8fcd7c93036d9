//! 자재 명세서를 CSV 텍스트/파일로 내보낸다.

use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::materials::BillOfMaterials;

/// 주거용 명세서 기본 파일명
pub const RESIDENTIAL_CSV_NAME: &str = "residential_materials.csv";
/// 농업용 명세서 기본 파일명
pub const AGRICULTURE_CSV_NAME: &str = "agriculture_materials.csv";

/// CSV 내보내기 오류.
#[derive(Debug)]
pub enum ExportError {
    /// CSV 직렬화 오류
    Csv(csv::Error),
    /// 파일 입출력 오류
    Io(std::io::Error),
    /// 버퍼를 UTF-8로 해석할 수 없음
    Utf8(std::string::FromUtf8Error),
}

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportError::Csv(e) => write!(f, "CSV error: {e}"),
            ExportError::Io(e) => write!(f, "I/O error: {e}"),
            ExportError::Utf8(e) => write!(f, "encoding error: {e}"),
        }
    }
}

impl std::error::Error for ExportError {}

impl From<csv::Error> for ExportError {
    fn from(value: csv::Error) -> Self {
        ExportError::Csv(value)
    }
}

impl From<std::io::Error> for ExportError {
    fn from(value: std::io::Error) -> Self {
        ExportError::Io(value)
    }
}

impl From<std::string::FromUtf8Error> for ExportError {
    fn from(value: std::string::FromUtf8Error) -> Self {
        ExportError::Utf8(value)
    }
}

#[derive(Serialize)]
struct CsvRow<'a> {
    item: &'a str,
    qty: String,
    unit_price: f64,
    total: f64,
}

/// 명세서를 `item,qty,unit_price,total` 헤더의 CSV 문자열로 만든다.
pub fn materials_csv(bom: &BillOfMaterials) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for line in &bom.lines {
        writer.serialize(CsvRow {
            item: line.item_name,
            qty: line.quantity.to_string(),
            unit_price: line.unit_price,
            total: line.line_total,
        })?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Io(e.into_error()))?;
    Ok(String::from_utf8(bytes)?)
}

/// 명세서를 CSV 파일로 저장한다.
pub fn write_materials_csv(bom: &BillOfMaterials, path: &Path) -> Result<(), ExportError> {
    let content = materials_csv(bom)?;
    fs::write(path, content)?;
    info!(path = %path.display(), lines = bom.lines.len(), "materials CSV written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::derive_materials;

    #[test]
    fn csv_has_header_and_one_row_per_line() {
        let bom = derive_materials(2.0).unwrap();
        let csv = materials_csv(&bom).unwrap();
        let rows: Vec<&str> = csv.lines().collect();
        assert_eq!(rows[0], "item,qty,unit_price,total");
        assert_eq!(rows.len(), 1 + bom.lines.len());
        assert!(rows[1].starts_with("Monocrystalline 450W,5,"));
        assert!(rows[4].starts_with("Roof Mounting Kit,2.0,"));
    }

    #[test]
    fn csv_writes_per_kw_quantity_with_one_decimal() {
        let bom = derive_materials(0.5).unwrap();
        let csv = materials_csv(&bom).unwrap();
        assert!(csv.contains("\nPV Cables & Accessories,0.5,"));
    }

    #[test]
    fn write_to_temp_file() {
        let bom = derive_materials(3.0).unwrap();
        let path = std::env::temp_dir().join("smart_solar_export_test.csv");
        write_materials_csv(&bom, &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("item,qty,unit_price,total"));
        let _ = std::fs::remove_file(&path);
    }
}
