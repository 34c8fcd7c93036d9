use std::path::Path;

use tracing::debug;

use crate::config::{Config, ConfigError};
use crate::export::ExportError;
use crate::i18n::{self, Translator};
use crate::materials::MaterialsError;
use crate::session::{SessionContext, SessionError};
use crate::ui_cli::{self, Page};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug)]
pub enum AppError {
    /// 파일 입출력 오류
    Io(std::io::Error),
    /// 설정 저장/로드 오류
    Config(ConfigError),
    /// 자재 명세 산출 오류
    Materials(MaterialsError),
    /// CSV 내보내기 오류
    Export(ExportError),
    /// 로그인 세션 오류
    Session(SessionError),
    /// 계산에 넘길 수 없는 입력값
    InvalidInput { field: &'static str, value: f64 },
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Io(e) => write!(f, "I/O error: {e}"),
            AppError::Config(e) => write!(f, "config error: {e}"),
            AppError::Materials(e) => write!(f, "materials error: {e}"),
            AppError::Export(e) => write!(f, "export error: {e}"),
            AppError::Session(e) => write!(f, "session error: {e}"),
            AppError::InvalidInput { field, value } => {
                write!(f, "invalid {field}: {value} (must be a finite number ≥ 0)")
            }
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        AppError::Io(value)
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        AppError::Config(value)
    }
}

impl From<MaterialsError> for AppError {
    fn from(value: MaterialsError) -> Self {
        AppError::Materials(value)
    }
}

impl From<ExportError> for AppError {
    fn from(value: ExportError) -> Self {
        AppError::Export(value)
    }
}

impl From<SessionError> for AppError {
    fn from(value: SessionError) -> Self {
        AppError::Session(value)
    }
}

/// 계산 전에 셸에서 음수/NaN 입력을 걸러낸다.
pub fn require_non_negative(field: &'static str, value: f64) -> Result<f64, AppError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(AppError::InvalidInput { field, value })
    }
}

/// 설정을 `--config`로 지정된(또는 기본) 경로에 저장한다.
pub fn persist_config(config: &Config, path: &Path) -> Result<(), AppError> {
    config.save_to(path)?;
    debug!(path = %path.display(), "config saved");
    Ok(())
}

/// CLI 애플리케이션의 메인 루프를 실행한다. 설정은 `config_path`로 저장된다.
pub fn run(config: &mut Config, config_path: &Path, tr: &Translator) -> Result<(), AppError> {
    let mut session = SessionContext::new();
    loop {
        let page = ui_cli::main_menu(tr)?;
        debug!(?page, "page selected");
        match page {
            Page::Home => ui_cli::show_home(tr),
            Page::Estimator => ui_cli::handle_estimator(tr, config)?,
            Page::Materials => ui_cli::show_catalogue(tr, config),
            Page::About => ui_cli::show_about(tr),
            Page::More => ui_cli::handle_more(tr, &mut session)?,
            Page::Settings => {
                ui_cli::handle_settings(tr, config)?;
                persist_config(config, config_path)?;
            }
            Page::Exit => {
                persist_config(config, config_path)?;
                println!("{}", tr.t(i18n::keys::APP_EXIT));
                break;
            }
        }
        println!("\n{}", tr.t(i18n::keys::DISCLAIMER));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config;

    #[test]
    fn settings_are_saved_to_the_loaded_path() {
        let dir = std::env::temp_dir().join("smart_solar_app_persist_test");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("alt.toml");

        let mut cfg = config::load_from(&path).unwrap();
        cfg.tariff_rate = 6.5;
        persist_config(&cfg, &path).unwrap();

        assert_eq!(config::load_from(&path).unwrap().tariff_rate, 6.5);
        let entries: Vec<_> = std::fs::read_dir(&dir).unwrap().collect();
        assert_eq!(entries.len(), 1);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn negative_and_nan_inputs_are_rejected() {
        assert_eq!(require_non_negative("bill", 0.0).unwrap(), 0.0);
        assert!(matches!(
            require_non_negative("bill", -1.0),
            Err(AppError::InvalidInput { field: "bill", .. })
        ));
        assert!(require_non_negative("hours", f64::NAN).is_err());
    }
}
