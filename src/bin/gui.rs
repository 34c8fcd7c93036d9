#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use eframe::{egui, App, Frame};
use image::GenericImageView;
use rfd::FileDialog;
use smart_solar_estimator::{
    app::require_non_negative,
    catalogue, config,
    estimator::{self, AgricultureEstimate, ResidentialEstimate},
    export, format,
    i18n::{self, keys},
    materials::{self, BillOfMaterials},
    session::{Credentials, DemoCredentials, Role, SessionContext},
    ui_cli::role_label,
};
use std::{
    env, fs,
    path::{Path, PathBuf},
};
use tracing::{info, level_filters::LevelFilter, warn};

fn main() -> Result<(), eframe::Error> {
    tracing_subscriber::fmt()
        .without_time()
        .compact()
        .with_writer(std::io::stderr)
        .with_max_level(LevelFilter::INFO)
        .init();

    let cli = parse_args(env::args().skip(1));
    let mut viewport = egui::ViewportBuilder::default().with_inner_size([960.0, 680.0]);
    if let Some(icon) = load_app_icon() {
        viewport = viewport.with_icon(icon);
    }
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    let app_cfg = config::load_from(&cli.config_path).unwrap_or_else(|e| {
        warn!("config load failed, using defaults: {e}");
        config::Config::default()
    });
    eframe::run_native(
        "Smart Solar Estimator",
        options,
        Box::new(move |_cc| Box::new(GuiApp::new(app_cfg, cli.config_path, &cli.lang))),
    )
}

struct GuiArgs {
    lang: String,
    config_path: PathBuf,
}

/// `--lang xx`/`--lang=xx`/`-L xx` 와 `--config path`/`--config=path` 를 읽는다.
fn parse_args(args: impl IntoIterator<Item = String>) -> GuiArgs {
    let mut parsed = GuiArgs {
        lang: "auto".to_string(),
        config_path: PathBuf::from(config::CONFIG_FILE),
    };
    let mut args = args.into_iter();
    while let Some(a) = args.next() {
        if let Some(val) = a.strip_prefix("--lang=") {
            parsed.lang = val.to_string();
        } else if let Some(val) = a.strip_prefix("--config=") {
            parsed.config_path = PathBuf::from(val);
        } else if a == "--lang" || a == "-L" {
            if let Some(val) = args.next() {
                parsed.lang = val;
            }
        } else if a == "--config" {
            if let Some(val) = args.next() {
                parsed.config_path = PathBuf::from(val);
            }
        }
    }
    parsed
}

fn load_app_icon() -> Option<egui::IconData> {
    let search = ["icon.png", "assets/icon.png", "../assets/icon.png"];
    let path = search.iter().find(|p| Path::new(*p).exists())?;
    let bytes = fs::read(path).ok()?;
    let img = image::load_from_memory(&bytes).ok()?;
    let (w, h) = img.dimensions();
    Some(egui::IconData {
        rgba: img.to_rgba8().into_raw(),
        width: w,
        height: h,
    })
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Tab {
    Home,
    Estimator,
    Materials,
    About,
    More,
    Settings,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Mode {
    Residential,
    Agriculture,
}

enum Estimate {
    Residential(ResidentialEstimate),
    Agriculture(AgricultureEstimate),
}

struct GuiApp {
    config: config::Config,
    config_path: PathBuf,
    tr: i18n::Translator,
    tab: Tab,
    // 추정기
    mode: Mode,
    battery: bool,
    bill: f64,
    pump_hp: f64,
    run_hours: f64,
    estimate: Option<Estimate>,
    bom: Option<BillOfMaterials>,
    status: Option<String>,
    // 로그인
    session: SessionContext,
    login_role: Role,
    username: String,
    password: String,
    login_message: Option<String>,
    // 설정
    tariff_input: f64,
    lang_input: String,
}

impl GuiApp {
    /// `cli_lang`은 번역기에만 적용되고 저장되는 `config.language`는 건드리지 않는다.
    fn new(config: config::Config, config_path: PathBuf, cli_lang: &str) -> Self {
        let lang_code = i18n::resolve_language(cli_lang, Some(config.language.as_str()));
        let tr = i18n::Translator::new_with_pack(&lang_code, config.language_pack_dir.as_deref());
        info!(lang = %lang_code, overrides = tr.has_overrides(), "GUI language resolved");
        let defaults = config.defaults.clone();
        Self {
            tariff_input: config.tariff_rate,
            lang_input: config.language.clone(),
            tr,
            tab: Tab::Home,
            mode: Mode::Residential,
            battery: defaults.include_battery,
            bill: defaults.bill_amount,
            pump_hp: defaults.pump_horsepower,
            run_hours: defaults.run_hours_per_day,
            estimate: None,
            bom: None,
            status: None,
            session: SessionContext::new(),
            login_role: Role::User,
            username: String::new(),
            password: String::new(),
            login_message: None,
            config,
            config_path,
        }
    }

    fn symbol(&self) -> &str {
        &self.config.currency_symbol
    }

    fn run_estimate(&mut self) {
        let system_kw = match self.mode {
            Mode::Residential => match require_non_negative("bill_amount", self.bill) {
                Ok(bill) => {
                    let res =
                        estimator::estimate_residential(bill, self.config.tariff_rate, self.battery);
                    let kw = res.recommended_system_kw;
                    self.estimate = Some(Estimate::Residential(res));
                    kw
                }
                Err(e) => {
                    self.status = Some(e.to_string());
                    return;
                }
            },
            Mode::Agriculture => {
                let checked = require_non_negative("pump_horsepower", self.pump_hp).and_then(|hp| {
                    require_non_negative("run_hours_per_day", self.run_hours).map(|h| (hp, h))
                });
                match checked {
                    Ok((hp, hours)) => {
                        let res = estimator::estimate_agriculture(hp, hours, self.battery);
                        let kw = res.recommended_system_kw;
                        self.estimate = Some(Estimate::Agriculture(res));
                        kw
                    }
                    Err(e) => {
                        self.status = Some(e.to_string());
                        return;
                    }
                }
            }
        };
        info!(mode = ?self.mode, system_kw, "estimate computed");
        match materials::derive_materials(system_kw) {
            Ok(bom) => {
                self.bom = Some(bom);
                self.status = None;
            }
            Err(e) => {
                self.bom = None;
                self.status = Some(e.to_string());
            }
        }
    }

    fn export_csv(&mut self) {
        let Some(bom) = &self.bom else {
            return;
        };
        let default_name = match self.estimate {
            Some(Estimate::Agriculture(_)) => export::AGRICULTURE_CSV_NAME,
            _ => export::RESIDENTIAL_CSV_NAME,
        };
        let Some(path) = FileDialog::new()
            .set_file_name(default_name)
            .add_filter("CSV", &["csv"])
            .save_file()
        else {
            return;
        };
        self.status = Some(match export::write_materials_csv(bom, &path) {
            Ok(()) => format!("{} {}", self.tr.t(keys::EXPORT_SAVED), path.display()),
            Err(e) => format!("{}: {e}", self.tr.t(keys::ERROR_PREFIX)),
        });
    }

    fn login(&mut self) {
        self.login_message = None;
        if let Err(e) = self.session.begin_login(self.login_role) {
            self.login_message = Some(e.to_string());
            return;
        }
        let credentials = match self.login_role {
            Role::User => Credentials::default(),
            Role::Admin => Credentials::new(self.username.trim(), self.password.as_str()),
        };
        match self.session.authenticate(&credentials, &DemoCredentials) {
            Ok(role) => {
                self.password.clear();
                self.login_message = Some(
                    self.tr
                        .fill(keys::LOGIN_SUCCESS, &[("role", role_label(&self.tr, role))]),
                );
            }
            Err(_) => {
                self.session.cancel();
                self.login_message = Some(self.tr.t(keys::LOGIN_FAILED).to_string());
            }
        }
    }

    fn apply_settings(&mut self) {
        if !self.tariff_input.is_finite() || self.tariff_input <= 0.0 {
            self.status = Some(self.tr.t(keys::SETTINGS_INVALID).to_string());
            self.tariff_input = self.config.tariff_rate;
            return;
        }
        self.config.tariff_rate = self.tariff_input;
        self.config.language = self.lang_input.trim().to_string();
        let resolved = i18n::resolve_language(&self.config.language, None);
        self.tr = i18n::Translator::new_with_pack(&resolved, self.config.language_pack_dir.as_deref());
        self.status = Some(match self.config.save_to(&self.config_path) {
            Ok(()) => self
                .tr
                .fill(keys::SETTINGS_SAVED, &[("tariff", self.config.tariff_rate.to_string())]),
            Err(e) => format!("{}: {e}", self.tr.t(keys::ERROR_PREFIX)),
        });
    }

    fn ui_nav(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        let label = |key: &str| {
            tr.t(key)
                .trim_start_matches(|c: char| c.is_ascii_digit() || c == ')' || c == ' ')
                .to_string()
        };
        for (tab, text) in [
            (Tab::Home, label(keys::MAIN_MENU_HOME)),
            (Tab::Estimator, label(keys::MAIN_MENU_ESTIMATOR)),
            (Tab::Materials, label(keys::MAIN_MENU_MATERIALS)),
            (Tab::About, label(keys::MAIN_MENU_ABOUT)),
            (Tab::More, label(keys::MAIN_MENU_MORE)),
            (Tab::Settings, label(keys::MAIN_MENU_SETTINGS)),
        ] {
            let button = egui::Button::new(text)
                .selected(self.tab == tab)
                .min_size(egui::vec2(ui.available_width(), 32.0));
            if ui.add(button).clicked() {
                self.tab = tab;
            }
            ui.add_space(4.0);
        }
    }

    fn ui_home(&self, ui: &mut egui::Ui) {
        ui.heading(self.tr.t(keys::HOME_HEADING).trim());
        ui.label(self.tr.t(keys::HOME_LINE1));
        ui.label(self.tr.t(keys::HOME_LINE2));
    }

    fn ui_about(&self, ui: &mut egui::Ui) {
        ui.heading(self.tr.t(keys::ABOUT_HEADING).trim());
        ui.label(self.tr.t(keys::ABOUT_LINE1));
        ui.label(self.tr.t(keys::ABOUT_LINE2));
    }

    fn ui_estimator(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        ui.heading(tr.t(keys::ESTIMATOR_HEADING).trim());
        ui.horizontal(|ui| {
            ui.radio_value(&mut self.mode, Mode::Residential, tr.t(keys::MODE_RESIDENTIAL));
            ui.radio_value(&mut self.mode, Mode::Agriculture, tr.t(keys::MODE_AGRICULTURE));
        });
        let battery_label = tr
            .t(keys::PROMPT_BATTERY)
            .trim_end_matches(": ")
            .trim_end_matches(" (y/N)");
        ui.checkbox(&mut self.battery, battery_label);
        ui.add_space(6.0);

        let symbol = self.config.currency_symbol.clone();

        egui::Grid::new("estimator_inputs")
            .num_columns(2)
            .spacing([12.0, 8.0])
            .show(ui, |ui| match self.mode {
                Mode::Residential => {
                    ui.label(prompt_label(&tr, keys::PROMPT_BILL, &symbol));
                    ui.add(
                        egui::DragValue::new(&mut self.bill)
                            .speed(50.0)
                            .clamp_range(0.0..=f64::MAX),
                    );
                    ui.end_row();
                }
                Mode::Agriculture => {
                    ui.label(prompt_label(&tr, keys::PROMPT_PUMP_HP, &symbol));
                    ui.add(
                        egui::DragValue::new(&mut self.pump_hp)
                            .speed(0.1)
                            .clamp_range(0.0..=f64::MAX),
                    );
                    ui.end_row();
                    ui.label(prompt_label(&tr, keys::PROMPT_RUN_HOURS, &symbol));
                    ui.add(
                        egui::DragValue::new(&mut self.run_hours)
                            .speed(0.1)
                            .clamp_range(0.0..=24.0),
                    );
                    ui.end_row();
                }
            });

        let button_key = match self.mode {
            Mode::Residential => keys::BUTTON_ESTIMATE_RESIDENTIAL,
            Mode::Agriculture => keys::BUTTON_ESTIMATE_AGRICULTURE,
        };
        if ui.button(tr.t(button_key)).clicked() {
            self.run_estimate();
        }

        if let Some(estimate) = &self.estimate {
            ui.separator();
            ui.heading(tr.t(keys::RESULTS_HEADING).trim());
            let symbol = symbol.as_str();
            let rows: Vec<(&str, String)> = match estimate {
                Estimate::Residential(res) => vec![
                    (keys::RESULT_CONSUMPTION, format::decimal(res.monthly_consumption_kwh, 1)),
                    (keys::RESULT_SYSTEM_KW, format::kilowatts(res.recommended_system_kw)),
                    (keys::RESULT_GENERATION, format::whole(res.monthly_generation_kwh)),
                    (keys::RESULT_SAVINGS, format::currency(symbol, res.monthly_savings)),
                    (keys::RESULT_COST, format::currency(symbol, res.total_cost)),
                    (keys::RESULT_PAYBACK, format!("{:.1}", res.payback_years)),
                ],
                Estimate::Agriculture(res) => vec![
                    (keys::RESULT_PUMP_KW, format::decimal(res.pump_power_kw, 2)),
                    (keys::RESULT_DAILY_ENERGY, format::decimal(res.daily_energy_kwh, 1)),
                    (keys::RESULT_SYSTEM_KW, format::kilowatts(res.recommended_system_kw)),
                    (keys::RESULT_GENERATION, format::whole(res.monthly_generation_kwh)),
                    (keys::RESULT_COST, format::currency(symbol, res.total_cost)),
                ],
            };
            egui::Grid::new("estimate_results")
                .num_columns(2)
                .striped(true)
                .show(ui, |ui| {
                    for (key, value) in rows {
                        ui.label(tr.t(key));
                        ui.strong(value);
                        ui.end_row();
                    }
                });
        }

        if let Some(bom) = &self.bom {
            ui.separator();
            ui.heading(tr.t(keys::MATERIALS_LIST_HEADING).trim());
            bom_grid(ui, &tr, &symbol, bom);
        }
        if self.bom.is_some() && ui.button(tr.t(keys::BUTTON_EXPORT_CSV)).clicked() {
            self.export_csv();
        }
    }

    fn ui_materials(&self, ui: &mut egui::Ui) {
        let tr = &self.tr;
        ui.heading(tr.t(keys::CATALOGUE_HEADING).trim());
        egui::Grid::new("catalogue")
            .num_columns(4)
            .striped(true)
            .spacing([16.0, 6.0])
            .show(ui, |ui| {
                for key in [keys::COL_CATEGORY, keys::COL_NAME, keys::COL_RATING, keys::COL_PRICE] {
                    ui.strong(tr.t(key));
                }
                ui.end_row();
                for c in catalogue::components() {
                    ui.label(c.category.as_str());
                    ui.label(c.name);
                    ui.label(c.rating.to_string());
                    ui.label(format::currency(self.symbol(), c.unit_price));
                    ui.end_row();
                }
            });
    }

    fn ui_more(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        ui.heading(tr.t(keys::MORE_HEADING).trim());
        if let Some(role) = self.session.role() {
            ui.label(tr.fill(keys::LOGGED_IN_AS, &[("role", role_label(&tr, role))]));
            if ui.button(tr.t(keys::BUTTON_LOGOUT)).clicked() {
                self.session.logout();
                self.login_message = Some(tr.t(keys::LOGGED_OUT).to_string());
            }
        } else {
            ui.strong(tr.t(keys::LOGIN_HEADING));
            ui.horizontal(|ui| {
                ui.radio_value(&mut self.login_role, Role::User, tr.t(keys::ROLE_USER));
                ui.radio_value(&mut self.login_role, Role::Admin, tr.t(keys::ROLE_ADMIN));
            });
            let button_key = match self.login_role {
                Role::User => keys::BUTTON_LOGIN_USER,
                Role::Admin => {
                    ui.horizontal(|ui| {
                        ui.label(tr.t(keys::PROMPT_ADMIN_USERNAME));
                        ui.text_edit_singleline(&mut self.username);
                    });
                    ui.horizontal(|ui| {
                        ui.label(tr.t(keys::PROMPT_ADMIN_PASSWORD));
                        ui.add(egui::TextEdit::singleline(&mut self.password).password(true));
                    });
                    keys::BUTTON_LOGIN_ADMIN
                }
            };
            if ui.button(tr.t(button_key)).clicked() {
                self.login();
            }
        }
        if let Some(msg) = &self.login_message {
            ui.label(msg);
        }
    }

    fn ui_settings(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        ui.heading(tr.t(keys::SETTINGS_HEADING).trim());
        egui::Grid::new("settings").num_columns(2).show(ui, |ui| {
            ui.label(tr.t(keys::SETTINGS_PROMPT_TARIFF).trim_end_matches(": "));
            ui.add(
                egui::DragValue::new(&mut self.tariff_input)
                    .speed(0.1)
                    .clamp_range(0.01..=f64::MAX),
            );
            ui.end_row();
            ui.label(tr.t(keys::SETTINGS_LANGUAGE));
            egui::ComboBox::from_id_source("language")
                .selected_text(self.lang_input.clone())
                .show_ui(ui, |ui| {
                    for code in ["auto", "en", "ko"] {
                        ui.selectable_value(&mut self.lang_input, code.to_string(), code);
                    }
                });
            ui.end_row();
        });
        if ui.button("OK").clicked() {
            self.apply_settings();
        }
    }
}

/// 입력 프롬프트 문구를 라벨용으로 다듬는다.
fn prompt_label(tr: &i18n::Translator, key: &str, symbol: &str) -> String {
    let text = tr.fill(key, &[("currency", symbol.to_string()), ("default", String::new())]);
    match text.find(" (") {
        Some(idx) => text[..idx].to_string(),
        None => text.trim_end_matches(": ").to_string(),
    }
}

fn bom_grid(ui: &mut egui::Ui, tr: &i18n::Translator, symbol: &str, bom: &BillOfMaterials) {
    egui::Grid::new("bom")
        .num_columns(4)
        .striped(true)
        .spacing([16.0, 6.0])
        .show(ui, |ui| {
            for key in [keys::COL_ITEM, keys::COL_QTY, keys::COL_UNIT_PRICE, keys::COL_TOTAL] {
                ui.strong(tr.t(key));
            }
            ui.end_row();
            for line in &bom.lines {
                ui.label(line.item_name);
                ui.label(line.quantity.to_string());
                ui.label(format::currency(symbol, line.unit_price));
                ui.label(format::currency(symbol, line.line_total));
                ui.end_row();
            }
            ui.strong(tr.t(keys::MATERIALS_TOTAL));
            ui.label("");
            ui.label("");
            ui.strong(format::currency(symbol, bom.total()));
            ui.end_row();
        });
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Smart Solar Estimator");
                if let Some(role) = self.session.role() {
                    ui.separator();
                    ui.label(role_label(&self.tr, role));
                }
            });
        });

        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            if let Some(status) = &self.status {
                ui.label(status);
            }
            ui.small(self.tr.t(keys::DISCLAIMER));
        });

        egui::SidePanel::left("nav")
            .resizable(false)
            .default_width(180.0)
            .show(ctx, |ui| self.ui_nav(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| match self.tab {
                Tab::Home => self.ui_home(ui),
                Tab::Estimator => self.ui_estimator(ui),
                Tab::Materials => self.ui_materials(ui),
                Tab::About => self.ui_about(ui),
                Tab::More => self.ui_more(ui),
                Tab::Settings => self.ui_settings(ui),
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smart_solar_estimator::catalogue::Category;

    fn app() -> GuiApp {
        let cfg = config::Config {
            language: "en".into(),
            ..config::Config::default()
        };
        GuiApp::new(cfg, env::temp_dir().join("smart_solar_gui_test.toml"), "auto")
    }

    fn args(list: &[&str]) -> GuiArgs {
        parse_args(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn command_line_options_are_parsed() {
        let a = args(&[]);
        assert_eq!(a.lang, "auto");
        assert_eq!(a.config_path, PathBuf::from(config::CONFIG_FILE));

        let a = args(&["-L", "ko", "--config", "alt.toml"]);
        assert_eq!(a.lang, "ko");
        assert_eq!(a.config_path, PathBuf::from("alt.toml"));

        let a = args(&["--lang=en", "--config=other/solar.toml"]);
        assert_eq!(a.lang, "en");
        assert_eq!(a.config_path, PathBuf::from("other/solar.toml"));
    }

    #[test]
    fn cli_language_does_not_leak_into_saved_settings() {
        let dir = env::temp_dir().join("smart_solar_gui_settings_test");
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("alt.toml");

        let mut app = GuiApp::new(config::Config::default(), path.clone(), "ko");
        assert_eq!(app.tr.language(), i18n::Language::Ko);
        assert_eq!(app.lang_input, "auto");

        app.tariff_input = 6.5;
        app.apply_settings();
        let saved = config::load_from(&path).unwrap();
        assert_eq!(saved.tariff_rate, 6.5);
        assert_eq!(saved.language, "auto");
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn new_app_uses_config_defaults() {
        let app = app();
        assert_eq!(app.bill, 2000.0);
        assert_eq!(app.pump_hp, 2.0);
        assert_eq!(app.run_hours, 5.0);
        assert!(!app.battery);
        assert_eq!(app.tab, Tab::Home);
    }

    #[test]
    fn residential_estimate_fills_materials() {
        let mut app = app();
        app.run_estimate();
        let bom = app.bom.as_ref().unwrap();
        assert_eq!(bom.system_kw, 2.0);
        assert!(matches!(app.estimate, Some(Estimate::Residential(_))));
        assert!(app.status.is_none());
    }

    #[test]
    fn agriculture_estimate_fills_materials() {
        let mut app = app();
        app.mode = Mode::Agriculture;
        app.run_estimate();
        let bom = app.bom.as_ref().unwrap();
        assert_eq!(bom.system_kw, 1.5);
        assert_eq!(
            bom.line(Category::Panel).unwrap().quantity,
            materials::LineQuantity::Count(4)
        );
    }

    #[test]
    fn negative_bill_sets_status() {
        let mut app = app();
        app.bill = -10.0;
        app.run_estimate();
        assert!(app.status.is_some());
        assert!(app.bom.is_none());
    }

    #[test]
    fn admin_login_requires_demo_credentials() {
        let mut app = app();
        app.login_role = Role::Admin;
        app.username = "admin".into();
        app.password = "wrong".into();
        app.login();
        assert!(!app.session.is_logged_in());
        assert_eq!(app.login_message.as_deref(), Some("Invalid Admin credentials!"));

        app.password = "admin123".into();
        app.login();
        assert_eq!(app.session.role(), Some(Role::Admin));
        assert!(app.password.is_empty());
    }

    #[test]
    fn prompt_label_strips_default_hint() {
        let tr = i18n::Translator::new("en");
        assert_eq!(prompt_label(&tr, keys::PROMPT_BILL, "₹"), "Monthly electricity bill [₹]");
        assert_eq!(prompt_label(&tr, keys::PROMPT_PUMP_HP, "₹"), "Pump size [HP]");
    }
}
