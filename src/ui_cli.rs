use std::io::{self, Write};
use std::path::Path;

use tracing::info;

use crate::app::{require_non_negative, AppError};
use crate::catalogue;
use crate::config::Config;
use crate::estimator::{self, AgricultureEstimate, ResidentialEstimate};
use crate::export;
use crate::format;
use crate::i18n::{keys, Translator};
use crate::materials::{self, BillOfMaterials};
use crate::session::{Credentials, DemoCredentials, Role, SessionContext, SessionError};

/// 메인 메뉴 페이지.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Estimator,
    Materials,
    About,
    More,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<Page, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    for key in [
        keys::MAIN_MENU_HOME,
        keys::MAIN_MENU_ESTIMATOR,
        keys::MAIN_MENU_MATERIALS,
        keys::MAIN_MENU_ABOUT,
        keys::MAIN_MENU_MORE,
        keys::MAIN_MENU_SETTINGS,
        keys::MAIN_MENU_EXIT,
    ] {
        println!("{}", tr.t(key));
    }
    loop {
        let sel = read_line(tr.t(keys::PROMPT_MENU_SELECT))?;
        if let Some(page) = map_page(sel.trim()) {
            return Ok(page);
        }
        println!("{}", tr.t(keys::INVALID_SELECTION_RETRY));
    }
}

fn map_page(sel: &str) -> Option<Page> {
    match sel {
        "1" => Some(Page::Home),
        "2" => Some(Page::Estimator),
        "3" => Some(Page::Materials),
        "4" => Some(Page::About),
        "5" => Some(Page::More),
        "6" => Some(Page::Settings),
        "0" => Some(Page::Exit),
        _ => None,
    }
}

pub fn show_home(tr: &Translator) {
    println!("{}", tr.t(keys::HOME_HEADING));
    println!("{}", tr.t(keys::HOME_LINE1));
    println!("{}", tr.t(keys::HOME_LINE2));
}

pub fn show_about(tr: &Translator) {
    println!("{}", tr.t(keys::ABOUT_HEADING));
    println!("{}", tr.t(keys::ABOUT_LINE1));
    println!("{}", tr.t(keys::ABOUT_LINE2));
}

/// 추정기 페이지: 모드 선택 → 입력 → 결과 → 자재 명세 → CSV 저장.
pub fn handle_estimator(tr: &Translator, cfg: &Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::ESTIMATOR_HEADING));
    println!("{}", tr.t(keys::ESTIMATOR_MODE_OPTIONS));
    let mode = read_line(tr.t(keys::PROMPT_SELECT))?;
    let defaults = &cfg.defaults;
    let battery = parse_yes_no(&read_line(tr.t(keys::PROMPT_BATTERY))?, defaults.include_battery);

    let (system_kw, csv_name) = match mode.trim() {
        "1" => {
            let prompt = tr.fill(
                keys::PROMPT_BILL,
                &[
                    ("currency", cfg.currency_symbol.clone()),
                    ("default", defaults.bill_amount.to_string()),
                ],
            );
            let bill = read_non_negative(tr, &prompt, "bill_amount", defaults.bill_amount)?;
            info!(bill, tariff = cfg.tariff_rate, battery, "residential estimate");
            let res = estimator::estimate_residential(bill, cfg.tariff_rate, battery);
            print_lines(&residential_lines(tr, &cfg.currency_symbol, &res));
            (res.recommended_system_kw, export::RESIDENTIAL_CSV_NAME)
        }
        "2" => {
            let hp_prompt = tr.fill(
                keys::PROMPT_PUMP_HP,
                &[("default", defaults.pump_horsepower.to_string())],
            );
            let hp = read_non_negative(tr, &hp_prompt, "pump_horsepower", defaults.pump_horsepower)?;
            let hours_prompt = tr.fill(
                keys::PROMPT_RUN_HOURS,
                &[("default", defaults.run_hours_per_day.to_string())],
            );
            let hours = read_non_negative(
                tr,
                &hours_prompt,
                "run_hours_per_day",
                defaults.run_hours_per_day,
            )?;
            info!(hp, hours, battery, "agriculture estimate");
            let res = estimator::estimate_agriculture(hp, hours, battery);
            print_lines(&agriculture_lines(tr, &cfg.currency_symbol, &res));
            (res.recommended_system_kw, export::AGRICULTURE_CSV_NAME)
        }
        _ => {
            println!("{}", tr.t(keys::INVALID_SELECTION_RETRY));
            return Ok(());
        }
    };

    let bom = materials::derive_materials(system_kw)?;
    print_lines(&bom_lines(tr, &cfg.currency_symbol, &bom));

    let prompt = tr.fill(keys::PROMPT_EXPORT_CSV, &[("file", csv_name.to_string())]);
    if parse_yes_no(&read_line(&prompt)?, false) {
        export::write_materials_csv(&bom, Path::new(csv_name))?;
        println!("{} {csv_name}", tr.t(keys::EXPORT_SAVED));
    }
    Ok(())
}

pub fn show_catalogue(tr: &Translator, cfg: &Config) {
    print_lines(&catalogue_lines(tr, &cfg.currency_symbol));
}

/// 로그인/로그아웃 페이지.
pub fn handle_more(tr: &Translator, session: &mut SessionContext) -> Result<(), AppError> {
    println!("{}", tr.t(keys::MORE_HEADING));
    if let Some(role) = session.role() {
        println!("{}", tr.fill(keys::LOGGED_IN_AS, &[("role", role_label(tr, role))]));
        if parse_yes_no(&read_line(tr.t(keys::PROMPT_LOGOUT))?, false) {
            session.logout();
            println!("{}", tr.t(keys::LOGGED_OUT));
        }
        return Ok(());
    }

    println!("{}", tr.t(keys::LOGIN_HEADING));
    println!("{}", tr.t(keys::LOGIN_ROLE_OPTIONS));
    let role = match read_line(tr.t(keys::PROMPT_SELECT))?.trim() {
        "1" => Role::User,
        "2" => Role::Admin,
        _ => return Ok(()),
    };
    session.begin_login(role)?;
    let credentials = match role {
        Role::User => Credentials::default(),
        Role::Admin => {
            let username = read_line(tr.t(keys::PROMPT_ADMIN_USERNAME))?;
            let password = read_line(tr.t(keys::PROMPT_ADMIN_PASSWORD))?;
            Credentials::new(username.trim(), password.trim())
        }
    };
    match session.authenticate(&credentials, &DemoCredentials) {
        Ok(role) => {
            println!("{}", tr.fill(keys::LOGIN_SUCCESS, &[("role", role_label(tr, role))]));
        }
        Err(SessionError::InvalidCredentials) => {
            println!("{}", tr.t(keys::LOGIN_FAILED));
            session.cancel();
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

/// 설정 메뉴: 요금 단가 변경.
pub fn handle_settings(tr: &Translator, cfg: &mut Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    println!(
        "{}",
        tr.fill(keys::SETTINGS_CURRENT_TARIFF, &[("tariff", cfg.tariff_rate.to_string())])
    );
    let sel = read_line(tr.t(keys::SETTINGS_PROMPT_TARIFF))?;
    if sel.trim().is_empty() {
        return Ok(());
    }
    match sel.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => {
            cfg.tariff_rate = v;
            info!(tariff = v, "tariff changed");
            println!("{}", tr.fill(keys::SETTINGS_SAVED, &[("tariff", v.to_string())]));
        }
        _ => println!("{}", tr.t(keys::SETTINGS_INVALID)),
    }
    Ok(())
}

pub fn role_label(tr: &Translator, role: Role) -> String {
    match role {
        Role::User => tr.t(keys::ROLE_USER).to_string(),
        Role::Admin => tr.t(keys::ROLE_ADMIN).to_string(),
    }
}

/// 주거용 결과 표시 행.
pub fn residential_lines(tr: &Translator, symbol: &str, res: &ResidentialEstimate) -> Vec<String> {
    vec![
        tr.t(keys::RESULTS_HEADING).to_string(),
        metric(tr, keys::RESULT_CONSUMPTION, format::decimal(res.monthly_consumption_kwh, 1)),
        metric(tr, keys::RESULT_SYSTEM_KW, format::kilowatts(res.recommended_system_kw)),
        metric(tr, keys::RESULT_GENERATION, format::whole(res.monthly_generation_kwh)),
        metric(tr, keys::RESULT_SAVINGS, format::currency(symbol, res.monthly_savings)),
        metric(tr, keys::RESULT_COST, format::currency(symbol, res.total_cost)),
        metric(tr, keys::RESULT_PAYBACK, format!("{:.1}", res.payback_years)),
    ]
}

/// 농업용 결과 표시 행.
pub fn agriculture_lines(tr: &Translator, symbol: &str, res: &AgricultureEstimate) -> Vec<String> {
    vec![
        tr.t(keys::RESULTS_HEADING).to_string(),
        metric(tr, keys::RESULT_PUMP_KW, format::decimal(res.pump_power_kw, 2)),
        metric(tr, keys::RESULT_DAILY_ENERGY, format::decimal(res.daily_energy_kwh, 1)),
        metric(tr, keys::RESULT_SYSTEM_KW, format::kilowatts(res.recommended_system_kw)),
        metric(tr, keys::RESULT_GENERATION, format::whole(res.monthly_generation_kwh)),
        metric(tr, keys::RESULT_COST, format::currency(symbol, res.total_cost)),
    ]
}

/// 자재 명세 표 행.
pub fn bom_lines(tr: &Translator, symbol: &str, bom: &BillOfMaterials) -> Vec<String> {
    let mut out = vec![
        tr.t(keys::MATERIALS_LIST_HEADING).to_string(),
        format!(
            "{:<26} {:>6} {:>12} {:>12}",
            tr.t(keys::COL_ITEM),
            tr.t(keys::COL_QTY),
            tr.t(keys::COL_UNIT_PRICE),
            tr.t(keys::COL_TOTAL)
        ),
    ];
    for line in &bom.lines {
        out.push(format!(
            "{:<26} {:>6} {:>12} {:>12}",
            line.item_name,
            line.quantity.to_string(),
            format::currency(symbol, line.unit_price),
            format::currency(symbol, line.line_total)
        ));
    }
    out.push(metric(tr, keys::MATERIALS_TOTAL, format::currency(symbol, bom.total())));
    out
}

/// 카탈로그 표 행.
pub fn catalogue_lines(tr: &Translator, symbol: &str) -> Vec<String> {
    let mut out = vec![
        tr.t(keys::CATALOGUE_HEADING).to_string(),
        format!(
            "{:<11} {:<26} {:<11} {:>10}",
            tr.t(keys::COL_CATEGORY),
            tr.t(keys::COL_NAME),
            tr.t(keys::COL_RATING),
            tr.t(keys::COL_PRICE)
        ),
    ];
    for c in catalogue::components() {
        out.push(format!(
            "{:<11} {:<26} {:<11} {:>10}",
            c.category.as_str(),
            c.name,
            c.rating.to_string(),
            format::currency(symbol, c.unit_price)
        ));
    }
    out
}

fn metric(tr: &Translator, key: &str, value: String) -> String {
    format!("{}: {value}", tr.t(key))
}

pub fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}

/// y/yes/예 는 참, 빈 입력은 기본값, 그 외는 거짓.
pub fn parse_yes_no(input: &str, default: bool) -> bool {
    match input.trim().to_lowercase().as_str() {
        "" => default,
        "y" | "yes" | "예" | "네" => true,
        _ => false,
    }
}

/// 빈 입력이면 기본값, 숫자가 아니면 None.
pub fn parse_number_or_default(input: &str, default: f64) -> Option<f64> {
    let s = input.trim();
    if s.is_empty() {
        return Some(default);
    }
    s.parse::<f64>().ok()
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush().map_err(AppError::Io)?;
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).map_err(AppError::Io)?;
    Ok(buf)
}

fn read_non_negative(
    tr: &Translator,
    prompt: &str,
    field: &'static str,
    default: f64,
) -> Result<f64, AppError> {
    loop {
        let s = read_line(prompt)?;
        match parse_number_or_default(&s, default) {
            Some(v) => match require_non_negative(field, v) {
                Ok(v) => return Ok(v),
                Err(_) => println!("{}", tr.t(keys::ERROR_NEGATIVE_VALUE)),
            },
            None => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_selection_maps_to_pages() {
        assert_eq!(map_page("2"), Some(Page::Estimator));
        assert_eq!(map_page("0"), Some(Page::Exit));
        assert_eq!(map_page("9"), None);
    }

    #[test]
    fn yes_no_parsing() {
        assert!(parse_yes_no("Y\n", false));
        assert!(parse_yes_no("\n", true));
        assert!(!parse_yes_no("n", true));
        assert!(!parse_yes_no("", false));
    }

    #[test]
    fn number_parsing_uses_default_on_empty() {
        assert_eq!(parse_number_or_default("  \n", 2000.0), Some(2000.0));
        assert_eq!(parse_number_or_default("3500\n", 2000.0), Some(3500.0));
        assert_eq!(parse_number_or_default("abc", 2000.0), None);
    }

    #[test]
    fn residential_lines_show_formatted_values() {
        let tr = Translator::new("en");
        let res = estimator::estimate_residential(2000.0, 8.0, false);
        let lines = residential_lines(&tr, "₹", &res);
        assert!(lines.contains(&"Monthly Consumption (kWh): 250.0".to_string()));
        assert!(lines.contains(&"Recommended System Size (kW): 2.0".to_string()));
        assert!(lines.contains(&"Estimated Monthly Generation (kWh): 240".to_string()));
        assert!(lines.contains(&"Monthly Savings: ₹1,920".to_string()));
        assert!(lines.contains(&"Estimated Project Cost: ₹80,000".to_string()));
        assert!(lines.contains(&"Payback (years): 3.5".to_string()));
    }

    #[test]
    fn agriculture_lines_show_pump_figures() {
        let tr = Translator::new("en");
        let res = estimator::estimate_agriculture(2.0, 5.0, false);
        let lines = agriculture_lines(&tr, "₹", &res);
        assert!(lines.contains(&"Pump Power (kW): 1.49".to_string()));
        assert!(lines.contains(&"Daily Pump Energy (kWh): 7.5".to_string()));
        assert!(lines.contains(&"Estimated Project Cost: ₹52,500".to_string()));
    }

    #[test]
    fn catalogue_lists_every_component() {
        let tr = Translator::new("en");
        let lines = catalogue_lines(&tr, "₹");
        assert_eq!(lines.len(), 2 + catalogue::components().len());
        assert!(lines.iter().any(|l| l.contains("Polycrystalline 350W")));
    }
}
