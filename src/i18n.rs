use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";
    pub const DISCLAIMER: &str = "general.disclaimer";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_HOME: &str = "main_menu.home";
    pub const MAIN_MENU_ESTIMATOR: &str = "main_menu.estimator";
    pub const MAIN_MENU_MATERIALS: &str = "main_menu.materials";
    pub const MAIN_MENU_ABOUT: &str = "main_menu.about";
    pub const MAIN_MENU_MORE: &str = "main_menu.more";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const PROMPT_SELECT: &str = "prompt.select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";
    pub const ERROR_NEGATIVE_VALUE: &str = "error.negative_value";

    pub const HOME_HEADING: &str = "home.heading";
    pub const HOME_LINE1: &str = "home.line1";
    pub const HOME_LINE2: &str = "home.line2";

    pub const ESTIMATOR_HEADING: &str = "estimator.heading";
    pub const ESTIMATOR_MODE_OPTIONS: &str = "estimator.mode_options";
    pub const MODE_RESIDENTIAL: &str = "estimator.mode_residential";
    pub const MODE_AGRICULTURE: &str = "estimator.mode_agriculture";
    pub const PROMPT_BATTERY: &str = "prompt.battery";
    pub const PROMPT_BILL: &str = "prompt.bill";
    pub const PROMPT_PUMP_HP: &str = "prompt.pump_hp";
    pub const PROMPT_RUN_HOURS: &str = "prompt.run_hours";
    pub const BUTTON_ESTIMATE_RESIDENTIAL: &str = "estimator.button_residential";
    pub const BUTTON_ESTIMATE_AGRICULTURE: &str = "estimator.button_agriculture";

    pub const RESULTS_HEADING: &str = "result.heading";
    pub const RESULT_CONSUMPTION: &str = "result.consumption";
    pub const RESULT_SYSTEM_KW: &str = "result.system_kw";
    pub const RESULT_GENERATION: &str = "result.generation";
    pub const RESULT_SAVINGS: &str = "result.savings";
    pub const RESULT_COST: &str = "result.cost";
    pub const RESULT_PAYBACK: &str = "result.payback";
    pub const RESULT_PUMP_KW: &str = "result.pump_kw";
    pub const RESULT_DAILY_ENERGY: &str = "result.daily_energy";

    pub const MATERIALS_LIST_HEADING: &str = "materials.list_heading";
    pub const MATERIALS_TOTAL: &str = "materials.total";
    pub const PROMPT_EXPORT_CSV: &str = "prompt.export_csv";
    pub const EXPORT_SAVED: &str = "materials.export_saved";
    pub const BUTTON_EXPORT_CSV: &str = "materials.button_export";

    pub const COL_ITEM: &str = "column.item";
    pub const COL_QTY: &str = "column.qty";
    pub const COL_UNIT_PRICE: &str = "column.unit_price";
    pub const COL_TOTAL: &str = "column.total";
    pub const COL_CATEGORY: &str = "column.category";
    pub const COL_NAME: &str = "column.name";
    pub const COL_RATING: &str = "column.rating";
    pub const COL_PRICE: &str = "column.price";

    pub const CATALOGUE_HEADING: &str = "catalogue.heading";

    pub const ABOUT_HEADING: &str = "about.heading";
    pub const ABOUT_LINE1: &str = "about.line1";
    pub const ABOUT_LINE2: &str = "about.line2";

    pub const MORE_HEADING: &str = "more.heading";
    pub const LOGIN_HEADING: &str = "more.login_heading";
    pub const LOGIN_ROLE_OPTIONS: &str = "more.role_options";
    pub const ROLE_USER: &str = "more.role_user";
    pub const ROLE_ADMIN: &str = "more.role_admin";
    pub const PROMPT_ADMIN_USERNAME: &str = "prompt.admin_username";
    pub const PROMPT_ADMIN_PASSWORD: &str = "prompt.admin_password";
    pub const BUTTON_LOGIN_USER: &str = "more.button_login_user";
    pub const BUTTON_LOGIN_ADMIN: &str = "more.button_login_admin";
    pub const BUTTON_LOGOUT: &str = "more.button_logout";
    pub const LOGIN_SUCCESS: &str = "more.login_success";
    pub const LOGIN_FAILED: &str = "more.login_failed";
    pub const LOGGED_IN_AS: &str = "more.logged_in_as";
    pub const PROMPT_LOGOUT: &str = "prompt.logout";
    pub const LOGGED_OUT: &str = "more.logged_out";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT_TARIFF: &str = "settings.current_tariff";
    pub const SETTINGS_PROMPT_TARIFF: &str = "settings.prompt_tariff";
    pub const SETTINGS_INVALID: &str = "settings.invalid";
    pub const SETTINGS_SAVED: &str = "settings.saved";
    pub const SETTINGS_LANGUAGE: &str = "settings.language";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    En,
    Ko,
}

impl Language {
    fn from_code(code: &str) -> Self {
        if code.to_lowercase().starts_with("ko") {
            Language::Ko
        } else {
            Language::En
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ko => "ko",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(en/ko)에 따라 번역기를 생성한다. 알 수 없는 코드는 en으로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리를 받아서 번역기를 생성한다.
    /// 디렉터리나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code));
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn has_overrides(&self) -> bool {
        self.overrides.is_some()
    }

    /// 번역을 가져온다. 언어팩 → 내장 문자열 → 영어 → 키 순으로 찾는다.
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        if let Some(v) = self.overrides.as_ref().and_then(|m| m.get(key)) {
            return v;
        }
        let built_in = match self.lang {
            Language::En => en(key),
            Language::Ko => ko(key).or_else(|| en(key)),
        };
        built_in.unwrap_or(key)
    }

    /// `{name}` 자리표시자를 채운 번역을 반환한다.
    pub fn fill(&self, key: &str, vars: &[(&str, String)]) -> String {
        fill_template(self.t(key), vars)
    }
}

pub fn fill_template(template: &str, vars: &[(&str, String)]) -> String {
    let mut out = template.to_string();
    for (k, v) in vars {
        out = out.replace(&format!("{{{k}}}"), v);
    }
    out
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some("ko".into()),
        "en" => Some("en".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(code) = get_locale().as_deref().and_then(normalize_locale_string) {
        return Some(code);
    }
    ["LC_ALL", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|v| normalize_locale_string(&v))
}

/// TOML 언어팩을 로드한다. 형식: key = "value" 플랫 맵 또는 중첩 테이블.
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let path = Path::new(dir).join(format!("{lang}.toml"));
    let content = fs::read_to_string(path).ok()?;
    parse_toml_to_map(&content)
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Goodbye.",
        DISCLAIMER => "Disclaimer: Estimates are approximate. Consult a licensed solar installer for exact sizing.",
        MAIN_MENU_TITLE => "\n=== Smart Solar Estimator ===",
        MAIN_MENU_HOME => "1) Home",
        MAIN_MENU_ESTIMATOR => "2) Estimator",
        MAIN_MENU_MATERIALS => "3) Materials",
        MAIN_MENU_ABOUT => "4) About",
        MAIN_MENU_MORE => "5) More & Login",
        MAIN_MENU_SETTINGS => "6) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Choose page: ",
        PROMPT_SELECT => "Select: ",
        INVALID_SELECTION_RETRY => "Invalid input. Please try again.",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        ERROR_NEGATIVE_VALUE => "Value must be zero or positive.",
        HOME_HEADING => "\n-- Welcome to Smart Solar Estimator --",
        HOME_LINE1 => "Estimate system size, costs, and materials for Residential or Agriculture solar systems.",
        HOME_LINE2 => "Go green, save money, and power your future with solar energy!",
        ESTIMATOR_HEADING => "\n-- Solar Estimator --",
        ESTIMATOR_MODE_OPTIONS => "Mode: 1) Residential  2) Agriculture",
        MODE_RESIDENTIAL => "Residential",
        MODE_AGRICULTURE => "Agriculture",
        PROMPT_BATTERY => "Include battery? (y/N): ",
        PROMPT_BILL => "Monthly electricity bill [{currency}] (enter = {default}): ",
        PROMPT_PUMP_HP => "Pump size [HP] (enter = {default}): ",
        PROMPT_RUN_HOURS => "Pump run hours/day (enter = {default}): ",
        BUTTON_ESTIMATE_RESIDENTIAL => "Estimate Residential System",
        BUTTON_ESTIMATE_AGRICULTURE => "Estimate Pump System",
        RESULTS_HEADING => "\n-- Results --",
        RESULT_CONSUMPTION => "Monthly Consumption (kWh)",
        RESULT_SYSTEM_KW => "Recommended System Size (kW)",
        RESULT_GENERATION => "Estimated Monthly Generation (kWh)",
        RESULT_SAVINGS => "Monthly Savings",
        RESULT_COST => "Estimated Project Cost",
        RESULT_PAYBACK => "Payback (years)",
        RESULT_PUMP_KW => "Pump Power (kW)",
        RESULT_DAILY_ENERGY => "Daily Pump Energy (kWh)",
        MATERIALS_LIST_HEADING => "\n-- Materials List --",
        MATERIALS_TOTAL => "Materials total",
        PROMPT_EXPORT_CSV => "Save materials CSV to {file}? (y/N): ",
        EXPORT_SAVED => "Saved:",
        BUTTON_EXPORT_CSV => "Download Materials CSV",
        COL_ITEM => "Item",
        COL_QTY => "Qty",
        COL_UNIT_PRICE => "Unit price",
        COL_TOTAL => "Total",
        COL_CATEGORY => "Category",
        COL_NAME => "Name",
        COL_RATING => "Rating",
        COL_PRICE => "Price",
        CATALOGUE_HEADING => "\n-- Materials Catalogue --",
        ABOUT_HEADING => "\n-- About Smart Solar Estimator --",
        ABOUT_LINE1 => "This app estimates solar system size, cost, and materials for Residential and Agriculture applications.",
        ABOUT_LINE2 => "Powered by clean energy and smart technology!",
        MORE_HEADING => "\n-- More & Login --",
        LOGIN_HEADING => "Login",
        LOGIN_ROLE_OPTIONS => "Select role: 1) User  2) Admin  (enter to cancel)",
        ROLE_USER => "User",
        ROLE_ADMIN => "Admin",
        PROMPT_ADMIN_USERNAME => "Admin username: ",
        PROMPT_ADMIN_PASSWORD => "Admin password: ",
        BUTTON_LOGIN_USER => "Login as User",
        BUTTON_LOGIN_ADMIN => "Login as Admin",
        BUTTON_LOGOUT => "Logout",
        LOGIN_SUCCESS => "Logged in as {role}",
        LOGIN_FAILED => "Invalid Admin credentials!",
        LOGGED_IN_AS => "Logged in as: {role}",
        PROMPT_LOGOUT => "Logout? (y/N): ",
        LOGGED_OUT => "Logged out.",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_CURRENT_TARIFF => "Current tariff: {tariff} per kWh",
        SETTINGS_PROMPT_TARIFF => "New tariff per kWh (enter to keep): ",
        SETTINGS_INVALID => "Tariff must be a positive number; unchanged.",
        SETTINGS_SAVED => "Tariff set to {tariff} per kWh.",
        SETTINGS_LANGUAGE => "Language",
        _ => return None,
    })
}

fn ko(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        DISCLAIMER => "안내: 추정값은 근사치입니다. 정확한 설계는 태양광 시공 전문가와 상담하세요.",
        MAIN_MENU_TITLE => "\n=== Smart Solar Estimator ===",
        MAIN_MENU_HOME => "1) 홈",
        MAIN_MENU_ESTIMATOR => "2) 추정기",
        MAIN_MENU_MATERIALS => "3) 자재 카탈로그",
        MAIN_MENU_ABOUT => "4) 소개",
        MAIN_MENU_MORE => "5) 더보기 / 로그인",
        MAIN_MENU_SETTINGS => "6) 설정",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        PROMPT_SELECT => "선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        ERROR_INVALID_NUMBER => "숫자를 입력하세요.",
        ERROR_NEGATIVE_VALUE => "0 이상의 값을 입력하세요.",
        HOME_HEADING => "\n-- Smart Solar Estimator에 오신 것을 환영합니다 --",
        HOME_LINE1 => "주거용/농업용 태양광 설비의 용량, 비용, 자재를 추정합니다.",
        HOME_LINE2 => "태양광으로 전기요금을 줄여 보세요!",
        ESTIMATOR_HEADING => "\n-- 태양광 추정기 --",
        ESTIMATOR_MODE_OPTIONS => "모드: 1) 주거용  2) 농업용",
        MODE_RESIDENTIAL => "주거용",
        MODE_AGRICULTURE => "농업용",
        PROMPT_BATTERY => "배터리 포함? (y/N): ",
        PROMPT_BILL => "월 전기요금 [{currency}] (엔터 = {default}): ",
        PROMPT_PUMP_HP => "펌프 마력 [HP] (엔터 = {default}): ",
        PROMPT_RUN_HOURS => "펌프 일 운전 시간 (엔터 = {default}): ",
        BUTTON_ESTIMATE_RESIDENTIAL => "주거용 설비 추정",
        BUTTON_ESTIMATE_AGRICULTURE => "펌프 설비 추정",
        RESULTS_HEADING => "\n-- 결과 --",
        RESULT_CONSUMPTION => "월 사용량 (kWh)",
        RESULT_SYSTEM_KW => "추천 설비 용량 (kW)",
        RESULT_GENERATION => "월 예상 발전량 (kWh)",
        RESULT_SAVINGS => "월 절감액",
        RESULT_COST => "예상 설치비",
        RESULT_PAYBACK => "회수기간 (년)",
        RESULT_PUMP_KW => "펌프 전력 (kW)",
        RESULT_DAILY_ENERGY => "일 펌프 에너지 (kWh)",
        MATERIALS_LIST_HEADING => "\n-- 자재 명세 --",
        MATERIALS_TOTAL => "자재 합계",
        PROMPT_EXPORT_CSV => "자재 명세를 {file}로 저장할까요? (y/N): ",
        EXPORT_SAVED => "저장됨:",
        BUTTON_EXPORT_CSV => "자재 CSV 저장",
        COL_ITEM => "품목",
        COL_QTY => "수량",
        COL_UNIT_PRICE => "단가",
        COL_TOTAL => "합계",
        COL_CATEGORY => "분류",
        COL_NAME => "품명",
        COL_RATING => "정격",
        COL_PRICE => "가격",
        CATALOGUE_HEADING => "\n-- 자재 카탈로그 --",
        ABOUT_HEADING => "\n-- Smart Solar Estimator 소개 --",
        ABOUT_LINE1 => "주거용 및 농업용 태양광 설비의 용량, 비용, 자재를 추정하는 프로그램입니다.",
        ABOUT_LINE2 => "깨끗한 에너지로 움직입니다!",
        MORE_HEADING => "\n-- 더보기 / 로그인 --",
        LOGIN_HEADING => "로그인",
        LOGIN_ROLE_OPTIONS => "역할 선택: 1) 사용자  2) 관리자  (엔터 = 취소)",
        ROLE_USER => "사용자",
        ROLE_ADMIN => "관리자",
        PROMPT_ADMIN_USERNAME => "관리자 아이디: ",
        PROMPT_ADMIN_PASSWORD => "관리자 비밀번호: ",
        BUTTON_LOGIN_USER => "사용자로 로그인",
        BUTTON_LOGIN_ADMIN => "관리자로 로그인",
        BUTTON_LOGOUT => "로그아웃",
        LOGIN_SUCCESS => "{role}(으)로 로그인했습니다",
        LOGIN_FAILED => "관리자 자격이 올바르지 않습니다!",
        LOGGED_IN_AS => "로그인 역할: {role}",
        PROMPT_LOGOUT => "로그아웃할까요? (y/N): ",
        LOGGED_OUT => "로그아웃했습니다.",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_CURRENT_TARIFF => "현재 요금 단가: kWh당 {tariff}",
        SETTINGS_PROMPT_TARIFF => "새 요금 단가 (엔터 = 유지): ",
        SETTINGS_INVALID => "요금 단가는 0보다 커야 합니다. 변경하지 않습니다.",
        SETTINGS_SAVED => "요금 단가가 kWh당 {tariff}로 설정되었습니다.",
        SETTINGS_LANGUAGE => "언어",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_code_falls_back_to_english() {
        let tr = Translator::new("fr");
        assert_eq!(tr.language(), Language::En);
        assert_eq!(tr.t(keys::ROLE_ADMIN), "Admin");
    }

    #[test]
    fn korean_strings_are_built_in() {
        let tr = Translator::new("ko-KR");
        assert_eq!(tr.language(), Language::Ko);
        assert_eq!(tr.t(keys::ROLE_ADMIN), "관리자");
    }

    #[test]
    fn missing_key_returns_key() {
        let tr = Translator::new("en");
        assert_eq!(tr.t("no.such.key"), "no.such.key");
    }

    #[test]
    fn fill_replaces_placeholders() {
        let tr = Translator::new("en");
        let s = tr.fill(keys::LOGGED_IN_AS, &[("role", "Admin".into())]);
        assert_eq!(s, "Logged in as: Admin");
    }

    #[test]
    fn cli_flag_wins_over_config() {
        assert_eq!(resolve_language("ko", Some("en")), "ko");
        assert_eq!(resolve_language("auto", Some("en-US")), "en");
    }

    #[test]
    fn nested_pack_tables_flatten_to_dotted_keys() {
        let map = parse_toml_to_map("[result]\ncost = \"Project cost\"\n").unwrap();
        assert_eq!(map.get("result.cost").map(String::as_str), Some("Project cost"));
    }
}
