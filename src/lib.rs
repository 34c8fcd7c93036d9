//! 태양광 설비 추정 로직을 라이브러리로 분리하여 CLI와 GUI가 함께 쓴다.

pub mod app;
pub mod catalogue;
pub mod config;
pub mod estimator;
pub mod export;
pub mod format;
pub mod i18n;
pub mod materials;
pub mod session;
pub mod sizing;
pub mod ui_cli;
