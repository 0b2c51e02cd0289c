use clap::{Arg, ArgAction, Command};
use colored::*;
use std::process;

use relaycheck::{
    config::ProbeConfig,
    lookup,
    output::{OutputConfig, OutputFormat, OutputManager, ProbeReport},
    probe::ConnectivityProbe,
};

fn build_cli() -> Command {
    Command::new("relaycheck")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Single-shot TCP/SMTP connectivity probe with actionable diagnostics")
        .arg(
            Arg::new("host")
                .help("Target host to probe (falls back to the configured target)")
                .index(1),
        )
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .value_parser(clap::value_parser!(u16).range(1..))
                .help("Target port [default: 25]"),
        )
        .arg(
            Arg::new("timeout")
                .short('t')
                .long("timeout")
                .value_parser(clap::value_parser!(u64))
                .help("Connect and handshake timeout in milliseconds [default: 10000]"),
        )
        .arg(
            Arg::new("ehlo")
                .long("ehlo")
                .help("Identity to announce in the EHLO greeting"),
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .default_value("text")
                .help("Output format: text, json"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Write the report to a file instead of stdout"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Load settings from a TOML file instead of ~/.relaycheck.toml"),
        )
        .arg(
            Arg::new("no-ip-lookup")
                .long("no-ip-lookup")
                .action(ArgAction::SetTrue)
                .help("Skip the best-effort public IP lookup"),
        )
        .arg(
            Arg::new("no-color")
                .long("no-color")
                .action(ArgAction::SetTrue)
                .help("Disable colored output"),
        )
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let matches = build_cli().get_matches();

    let mut config = match matches.get_one::<String>("config") {
        Some(path) => match ProbeConfig::from_toml_file(path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("{} {}", "[!]".bright_red().bold(), err);
                process::exit(2);
            }
        },
        None => ProbeConfig::load_default_config(),
    };

    if let Some(host) = matches.get_one::<String>("host") {
        config.target = host.clone();
    }
    if let Some(port) = matches.get_one::<u16>("port") {
        config.port = *port;
    }
    if let Some(timeout) = matches.get_one::<u64>("timeout") {
        config.timeout = *timeout;
    }
    if let Some(ehlo) = matches.get_one::<String>("ehlo") {
        config.ehlo_identity = ehlo.clone();
    }
    if matches.get_flag("no-ip-lookup") {
        config.skip_ip_lookup = true;
    }

    let format = match matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("text")
        .parse::<OutputFormat>()
    {
        Ok(format) => format,
        Err(err) => {
            eprintln!("{} {}", "[!]".bright_red().bold(), err);
            process::exit(2);
        }
    };

    let output_manager = OutputManager::new(OutputConfig {
        format,
        file: matches.get_one::<String>("output").cloned(),
        colored: !matches.get_flag("no-color"),
    });

    let probe = match ConnectivityProbe::new(config.clone()) {
        Ok(probe) => probe,
        Err(err) => {
            eprintln!("{} {}", "[!]".bright_red().bold(), err);
            process::exit(2);
        }
    };

    // Informational only; the probe result never depends on this.
    let my_ip = if config.skip_ip_lookup {
        "skipped".to_string()
    } else {
        lookup::public_ip().await
    };

    match probe.probe().await {
        Ok(outcome) => {
            let succeeded = outcome.is_success();
            let report = ProbeReport::new(config.target.clone(), config.port, my_ip, outcome);

            if let Err(err) = output_manager.write_report(&report) {
                eprintln!("{} {}", "[!]".bright_red().bold(), err);
                process::exit(2);
            }

            process::exit(if succeeded { 0 } else { 1 });
        }
        Err(err) => {
            eprintln!("{} {}", "[!]".bright_red().bold(), err);
            process::exit(2);
        }
    }
}
