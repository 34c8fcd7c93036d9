use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::sizing::DEFAULT_TARIFF;

/// 기본 설정 파일 경로
pub const CONFIG_FILE: &str = "config.toml";

/// 추정 화면에 미리 채워지는 입력값.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputDefaults {
    /// 월 전기요금 [통화]
    pub bill_amount: f64,
    /// 펌프 마력 [HP]
    pub pump_horsepower: f64,
    /// 펌프 일 운전 시간 [h]
    pub run_hours_per_day: f64,
    pub include_battery: bool,
}

impl Default for InputDefaults {
    fn default() -> Self {
        Self {
            bill_amount: 2000.0,
            pump_horsepower: 2.0,
            run_hours_per_day: 5.0,
            include_battery: false,
        }
    }
}

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 전력 요금 단가 [통화/kWh]
    pub tariff_rate: f64,
    pub currency_symbol: String,
    /// 언어 코드(auto/en/ko)
    pub language: String,
    /// 언어팩 디렉터리(선택)
    pub language_pack_dir: Option<String>,
    pub defaults: InputDefaults,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tariff_rate: DEFAULT_TARIFF,
            currency_symbol: "₹".to_string(),
            language: "auto".to_string(),
            language_pack_dir: None,
            defaults: InputDefaults::default(),
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug)]
pub enum ConfigError {
    /// 파일 입출력 오류
    Io(std::io::Error),
    /// TOML 역직렬화 오류
    Serde(toml::de::Error),
    /// TOML 직렬화 오류
    Serialize(toml::ser::Error),
    /// 요금 단가가 0 이하이거나 유한하지 않음
    InvalidTariff(f64),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Serde(e) => write!(f, "config parse error: {e}"),
            ConfigError::Serialize(e) => write!(f, "config serialize error: {e}"),
            ConfigError::InvalidTariff(v) => {
                write!(f, "tariff_rate must be a positive number, got {v}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        ConfigError::Io(value)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        ConfigError::Serde(value)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(value: toml::ser::Error) -> Self {
        ConfigError::Serialize(value)
    }
}

/// 지정 경로의 설정을 로드한다. 파일이 없으면 기본값을 그 경로에 저장한다.
pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg = Config::from_toml_str(&content)?;
        debug!(path = %path.display(), "config loaded");
        Ok(cfg)
    } else {
        let cfg = Config::default();
        cfg.save_to(path)?;
        info!(path = %path.display(), "default config written");
        Ok(cfg)
    }
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let cfg: Config = toml::from_str(content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.tariff_rate.is_finite() || self.tariff_rate <= 0.0 {
            return Err(ConfigError::InvalidTariff(self.tariff_rate));
        }
        Ok(())
    }

    /// 설정을 로드했던 경로에 다시 저장한다.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let cfg = Config::from_toml_str("tariff_rate = 6.5\n[defaults]\nbill_amount = 3000.0\n")
            .unwrap();
        assert_eq!(cfg.tariff_rate, 6.5);
        assert_eq!(cfg.defaults.bill_amount, 3000.0);
        assert_eq!(cfg.defaults.pump_horsepower, 2.0);
        assert_eq!(cfg.currency_symbol, "₹");
        assert_eq!(cfg.language, "auto");
    }

    #[test]
    fn zero_tariff_is_rejected() {
        let err = Config::from_toml_str("tariff_rate = 0.0").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTariff(v) if v == 0.0));
    }

    #[test]
    fn default_round_trips_through_file() {
        let path = std::env::temp_dir().join("smart_solar_config_test.toml");
        let _ = fs::remove_file(&path);
        let created = load_from(&path).unwrap();
        assert_eq!(created, Config::default());
        let reloaded = load_from(&path).unwrap();
        assert_eq!(reloaded, created);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn edited_settings_reload_from_same_path() {
        let path = std::env::temp_dir().join("smart_solar_config_edit_test.toml");
        let _ = fs::remove_file(&path);
        let mut cfg = load_from(&path).unwrap();
        cfg.tariff_rate = 6.5;
        cfg.language = "auto".into();
        cfg.save_to(&path).unwrap();
        let reloaded = load_from(&path).unwrap();
        assert_eq!(reloaded.tariff_rate, 6.5);
        assert_eq!(reloaded.language, "auto");
        let _ = fs::remove_file(&path);
    }
}
