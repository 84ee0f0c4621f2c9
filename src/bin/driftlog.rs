//! Command-line front end for the drift log rollups.
//!
//! Usage:
//!   driftlog <command> [args] [options]
//!
//! Commands:
//!   overview                 - Per-user summary cards
//!   user <user_id>           - One user's journey report
//!   manifest                 - Fingerprint and data-quality manifest of the dataset
//!
//! Options:
//!   --data=<path>            Dataset path (default: $DRIFT_DATA or mock_data.json)
//!   --search=<term>          Filter the overview by user, mood or constellation
//!   --pretty                 Pretty-print JSON

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use driftlog::config::Config;
use driftlog::data::{default_manifest_path, load_file, load_or_empty};
use driftlog::logging::{log, obj, v_str, Domain, Level};
use driftlog::report::{JourneyReport, Overview};

fn print_usage() {
    eprintln!("Usage: driftlog <command> [args] [options]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  overview               Per-user summary cards");
    eprintln!("  user <user_id>         One user's journey report");
    eprintln!("  manifest               Dataset fingerprint and warnings");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --data=<path>          Dataset path");
    eprintln!("  --search=<term>        Overview search filter");
    eprintln!("  --pretty               Pretty-print JSON");
}

fn emit<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", text);
    Ok(())
}

fn cmd_manifest(cfg: &Config) -> Result<()> {
    let path = Path::new(&cfg.data_path);
    let (_, manifest) = load_file(path, &cfg.collection_key)?;
    let out_path = default_manifest_path(path);
    fs::write(&out_path, serde_json::to_string_pretty(&manifest)?)
        .with_context(|| format!("failed to write {}", out_path.display()))?;
    emit(&manifest, cfg.pretty)?;
    eprintln!("wrote manifest {}", out_path.display());
    Ok(())
}

fn run(args: &[String]) -> Result<i32> {
    let Some(cmd) = args.get(1) else {
        print_usage();
        return Ok(1);
    };

    let mut cfg = Config::from_env();
    let mut search = String::new();
    let mut positional = Vec::new();
    for arg in &args[2..] {
        if let Some(v) = arg.strip_prefix("--data=") {
            cfg = cfg.with_data_path(v);
        } else if let Some(v) = arg.strip_prefix("--search=") {
            search = v.to_string();
        } else if arg == "--pretty" {
            cfg.pretty = true;
        } else {
            positional.push(arg.as_str());
        }
    }

    log(
        Level::Debug,
        Domain::System,
        "startup",
        obj(&[
            ("command", v_str(cmd)),
            ("path", v_str(&cfg.data_path)),
            ("collection", v_str(&cfg.collection_key)),
        ]),
    );

    match cmd.as_str() {
        "overview" => {
            let store = load_or_empty(&cfg);
            emit(&Overview::build(&store, &search), cfg.pretty)?;
        }
        "user" => {
            let Some(user_id) = positional.first() else {
                eprintln!("Usage: driftlog user <user_id>");
                return Ok(1);
            };
            let store = load_or_empty(&cfg);
            match JourneyReport::build(&store, user_id) {
                Some(report) => emit(&report, cfg.pretty)?,
                None => {
                    eprintln!("no entries for user {}", user_id);
                    return Ok(2);
                }
            }
        }
        "manifest" => cmd_manifest(&cfg)?,
        _ => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            return Ok(1);
        }
    }
    Ok(0)
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    match run(&args) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("driftlog failed: {:#}", err);
            std::process::exit(3);
        }
    }
}
