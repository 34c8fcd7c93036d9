use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use smart_solar_estimator::app::{self, require_non_negative, AppError};
use smart_solar_estimator::{config, estimator, export, i18n, materials, ui_cli};
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(author, version, about = "Solar system size, cost and materials estimator")]
struct Cli {
    /// 표시 언어 (auto/en/ko)
    #[arg(long, short = 'L', default_value = "auto")]
    lang: String,

    /// 설정 파일 경로
    #[arg(long, default_value = config::CONFIG_FILE)]
    config: PathBuf,

    /// 디버그 로그 출력
    #[arg(long, short)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// 월 전기요금으로 주거용 설비를 추정한다
    Residential {
        /// 월 전기요금
        #[arg(long)]
        bill: f64,
        /// kWh당 요금 (기본: 설정값)
        #[arg(long)]
        tariff: Option<f64>,
        #[command(flatten)]
        common: CommonArgs,
    },
    /// 펌프 마력과 운전 시간으로 농업용 설비를 추정한다
    Agriculture {
        /// 펌프 마력 [HP]
        #[arg(long)]
        hp: f64,
        /// 일 운전 시간
        #[arg(long)]
        hours: f64,
        #[command(flatten)]
        common: CommonArgs,
    },
    /// 설비 용량[kW]에 대한 자재 명세를 출력한다
    Materials {
        #[arg(long)]
        kw: f64,
        /// CSV 저장 경로
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// 자재 카탈로그를 출력한다
    Catalogue,
}

#[derive(Args)]
struct CommonArgs {
    /// 배터리 포함
    #[arg(long)]
    battery: bool,
    /// 자재 명세 CSV 저장 경로
    #[arg(long)]
    csv: Option<PathBuf>,
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 CLI 애플리케이션을 실행한다.
fn main() {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .without_time()
        .compact()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose {
            LevelFilter::DEBUG
        } else {
            LevelFilter::WARN
        })
        .init();

    if let Err(err) = try_run(cli) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn try_run(cli: Cli) -> Result<(), AppError> {
    let mut cfg = config::load_from(&cli.config)?;
    let lang = i18n::resolve_language(&cli.lang, Some(cfg.language.as_str()));
    let tr = i18n::Translator::new_with_pack(&lang, cfg.language_pack_dir.as_deref());

    let Some(command) = cli.command else {
        return app::run(&mut cfg, &cli.config, &tr);
    };

    let symbol = cfg.currency_symbol.as_str();
    let (system_kw, csv) = match command {
        Command::Residential {
            bill,
            tariff,
            common,
        } => {
            let bill = require_non_negative("bill", bill)?;
            let tariff = tariff.unwrap_or(cfg.tariff_rate);
            if !tariff.is_finite() || tariff <= 0.0 {
                return Err(config::ConfigError::InvalidTariff(tariff).into());
            }
            let res = estimator::estimate_residential(bill, tariff, common.battery);
            ui_cli::print_lines(&ui_cli::residential_lines(&tr, symbol, &res));
            (res.recommended_system_kw, common.csv)
        }
        Command::Agriculture { hp, hours, common } => {
            let hp = require_non_negative("hp", hp)?;
            let hours = require_non_negative("hours", hours)?;
            let res = estimator::estimate_agriculture(hp, hours, common.battery);
            ui_cli::print_lines(&ui_cli::agriculture_lines(&tr, symbol, &res));
            (res.recommended_system_kw, common.csv)
        }
        Command::Materials { kw, csv } => (kw, csv),
        Command::Catalogue => {
            ui_cli::print_lines(&ui_cli::catalogue_lines(&tr, symbol));
            return Ok(());
        }
    };

    let bom = materials::derive_materials(system_kw)?;
    ui_cli::print_lines(&ui_cli::bom_lines(&tr, symbol, &bom));
    if let Some(path) = csv {
        export::write_materials_csv(&bom, &path)?;
        println!("{} {}", tr.t(i18n::keys::EXPORT_SAVED), path.display());
    }
    Ok(())
}
