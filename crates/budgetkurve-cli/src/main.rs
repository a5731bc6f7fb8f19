use anyhow::Result;
use clap::{Arg, ArgMatches, Command, ValueHint};
use log::LevelFilter;
use std::path::PathBuf;

use budgetkurve_chart::io::TableReaderConfig;
use budgetkurve_cli::check::run_check;
use budgetkurve_cli::render::{delimiter_from_name, load_render_config, run_render, RenderConfig};

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(
            env_logger::Env::default().filter_or("BUDGETKURVE_LOG", "error,budgetkurve=info"),
        )
        .init();

    let matches = Command::new("budgetkurve")
        .version(clap::crate_version!())
        .about("\u{1F4CA} Budgetkurve CLI - Budget vs. Regnskab Deviation Charts")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("render")
                .about("Render the deviation chart from a monthly table")
                .arg(
                    Arg::new("input")
                        .help(
                            "Path to the delimited monthly table with the columns \
                             'Budget', 'Regnskab' and 'Regnskab t-1'",
                        )
                        .required(false)
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("config")
                        .short('c')
                        .long("config")
                        .help("Path to a JSON render configuration file")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("title")
                        .short('t')
                        .long("title")
                        .value_parser(clap::builder::NonEmptyStringValueParser::new())
                        .help(
                            "Chart caption. Overrides the title specified in the \
                             configuration file.",
                        )
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output_file")
                        .short('o')
                        .long("output")
                        .help("Path to write the PNG chart. Defaults to budget_vs_regnskab.png.")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("delimiter")
                        .long("delimiter")
                        .help("Column delimiter of the input table. Detected when omitted.")
                        .value_parser(["comma", "semicolon", "tab"])
                        .value_hint(ValueHint::Other),
                ),
        )
        .subcommand(
            Command::new("check")
                .about("Validate a monthly table without rendering")
                .arg(
                    Arg::new("input")
                        .help("Path to the delimited monthly table")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("delimiter")
                        .long("delimiter")
                        .help("Column delimiter of the input table. Detected when omitted.")
                        .value_parser(["comma", "semicolon", "tab"])
                        .value_hint(ValueHint::Other),
                ),
        )
        .help_template(
            "{usage-heading} {usage}\n\n\
             {about-with-newline}\n\
             Version {version}\n\n\
             {all-args}{after-help}",
        )
        .get_matches();

    match matches.subcommand() {
        Some(("render", sub_m)) => handle_render(sub_m),
        Some(("check", sub_m)) => handle_check(sub_m),
        _ => unreachable!("Subcommand is required by CLI configuration"),
    }
}

fn handle_render(matches: &ArgMatches) -> Result<()> {
    let input = match matches.get_one::<PathBuf>("input") {
        Some(input) => input,
        None => {
            eprintln!("Ingen inputfil angivet. Angiv en CSV-fil med relevante data.");
            return Ok(());
        }
    };
    eprintln!("[Budgetkurve::Render] Rendering table: {:?}", input);

    let mut config = if let Some(config_path) = matches.get_one::<PathBuf>("config") {
        eprintln!("[Budgetkurve::Render] Using config: {:?}", config_path);
        load_render_config(config_path)?
    } else {
        eprintln!("[Budgetkurve::Render] No config provided; using defaults.");
        RenderConfig::default()
    };
    config.apply_arguments(matches);

    match run_render(input, &config) {
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Rendering failed: {:#}", e);
            std::process::exit(1)
        }
    }
}

fn handle_check(matches: &ArgMatches) -> Result<()> {
    let input: &PathBuf = matches.get_one("input").unwrap();
    let delimiter = match matches.get_one::<String>("delimiter") {
        Some(name) => Some(delimiter_from_name(name)?),
        None => None,
    };
    let reader_config = TableReaderConfig { delimiter };

    match run_check(input, &reader_config) {
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Validation failed: {:#}", e);
            std::process::exit(1)
        }
    }
}
