use clap::{
    crate_authors, crate_description, crate_version, value_parser, Arg, ArgAction, ArgMatches,
    Command,
};
use pretty_env_logger::env_logger::Builder;
use snafu::ResultExt;
use std::env;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::exit;

use constellix_records::arecord::{ARecordConfig, ARecordResource, HostState};
use constellix_records::common::{Client, ConfigSnafu, DecodeSnafu, Result};
use constellix_records::Config;

/// Map a log level onto its syslog(3) priority.
fn syslog_priority(level: log::Level) -> u8 {
    match level {
        log::Level::Error => 3,
        log::Level::Warn => 4,
        log::Level::Info => 6,
        log::Level::Debug | log::Level::Trace => 7,
    }
}

/// Install the logger. `RUST_LOG_STYLE=SYSTEMD` prints `<priority>target: message`
/// lines for journald, anything else gets the coloured pretty format.
/// Defaults to `info` unless `RUST_LOG` is set.
fn setup_logger() {
    let journald = env::var("RUST_LOG_STYLE").is_ok_and(|style| style == "SYSTEMD");
    let mut builder: Builder = if journald {
        let mut builder = Builder::new();
        builder.format(|buf, record| {
            writeln!(
                buf,
                "<{}>{}: {}",
                syslog_priority(record.level()),
                record.target(),
                record.args()
            )
        });
        builder
    } else {
        pretty_env_logger::formatted_builder()
    };

    if env::var_os("RUST_LOG").is_some() {
        builder.parse_default_env();
    } else {
        builder.filter_level(log::LevelFilter::Info);
    }
    builder.init();
}

fn state_command(name: &'static str, about: &'static str) -> Command {
    Command::new(name).about(about).arg(
        Arg::new("state")
            .long("state")
            .required(true)
            .value_parser(value_parser!(PathBuf))
            .help("JSON file holding the declared record state"),
    )
}

fn read_state(path: &Path) -> Result<ARecordConfig> {
    let file = File::open(path).map_err(|err| {
        ConfigSnafu {
            message: format!("Failed to open {}: {err}", path.display()),
            prefix: "state",
        }
        .build()
    })?;
    let state: HostState = serde_json::from_reader(BufReader::new(file)).context(DecodeSnafu {
        message: format!("Failed to read state from {}", path.display()),
    })?;
    ARecordConfig::try_from(state)
}

fn run<C: Client>(resource: &ARecordResource<C>, args: &ArgMatches) -> Result<ARecordConfig> {
    let (op, sub) = match args.subcommand() {
        Some(pair) => pair,
        None => {
            return ConfigSnafu {
                message: "no operation given, see --help",
                prefix: "cli",
            }
            .fail()
        }
    };

    if op == "import" {
        let id: &String = sub.get_one("id").expect("id is required");
        return resource.import(id);
    }

    let path: &PathBuf = sub.get_one("state").expect("state is required");
    let declared = read_state(path)?;
    match op {
        "create" => resource.create(&declared),
        "read" => resource.read(&declared),
        "update" => resource.update(&declared),
        "delete" => resource.delete(&declared),
        _ => unreachable!("unknown subcommand {op}"),
    }
}

pub(crate) fn main() {
    let cli = Command::new("constellix-records")
        .about(format!(
            "{}\n{} {}",
            crate_description!(),
            "Credentials are read from CONSTELLIX__API_KEY and CONSTELLIX__SECRET_KEY.",
            "Prefix a value with @ to read it from a file.",
        ))
        .arg(
            Arg::new("check")
                .action(ArgAction::SetTrue)
                .short('t')
                .long("test")
                .help("Check the configuration"),
        )
        .subcommand(state_command("create", "Create the declared record"))
        .subcommand(state_command("read", "Refresh the declared record from the API"))
        .subcommand(state_command("update", "Push the declared record to the API"))
        .subcommand(state_command("delete", "Delete the declared record"))
        .subcommand(
            Command::new("import")
                .about("Build the declared state of an existing record")
                .arg(
                    Arg::new("id")
                        .required(true)
                        .help("Record to import, as sourceType:domainId:recordId"),
                ),
        )
        .version(crate_version!())
        .author(crate_authors!("\n"));

    let args = cli.get_matches();

    setup_logger();

    let resource = match Config::from_env()
        .map_err(|err| err.to_string())
        .and_then(|config| config.get_resource().map_err(|err| err.to_string()))
    {
        Ok(r) => r,
        Err(err) => {
            eprintln!("{err}");
            exit(2);
        }
    };

    if args.get_flag("check") {
        tracing::info!(
            base_url = resource.client().base_url().as_str(),
            "Configuration is valid."
        );
        exit(0);
    }

    let config = match run(&resource, &args) {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(error = %err, "Operation failed");
            eprintln!("{err}");
            exit(1);
        }
    };

    match serde_json::to_string_pretty(&HostState::from(&config)) {
        Ok(json) => println!("{json}"),
        Err(err) => {
            eprintln!("Failed to serialize state: {err}");
            exit(1);
        }
    }
}
