// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! maphook CLI
//!
//! Shows which headers a request would be dispatched with under a given
//! hook configuration. Performs no network I/O.

use std::env;
use std::process::ExitCode;

use maphook::config::CONFIG_ENV;
use maphook::{HookConfig, Request};

#[derive(Debug, Default)]
struct InspectArgs {
    config_path: Option<String>,
    headers: Vec<(String, String)>,
    filters: Vec<String>,
    log_requests: bool,
    urls: Vec<String>,
}

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("maphook=info".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::from(1);
    }

    match args[1].as_str() {
        "inspect" => match parse_inspect_args(&args[2..]) {
            Ok(inspect) => run_inspect(inspect),
            Err(msg) => {
                eprintln!("{}", msg);
                eprintln!("Usage: maphook inspect [--config <path>] [--header NAME:VALUE]... [--filter SUBSTR]... <url>...");
                ExitCode::from(1)
            }
        },
        "--help" | "-h" | "help" => {
            print_usage();
            ExitCode::SUCCESS
        }
        "--version" | "-v" | "version" => {
            println!("maphook {}", maphook::VERSION);
            ExitCode::SUCCESS
        }
        cmd => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            ExitCode::from(1)
        }
    }
}

fn print_usage() {
    println!(
        r#"maphook - Header injection for map renderer requests

USAGE:
    maphook <COMMAND> [OPTIONS]

COMMANDS:
    inspect <url>...    Show the headers each URL would be requested with
    help                Show this help message
    version             Show version information

INSPECT OPTIONS:
    --config <path>          JSON hook config (default: ${env})
    --header NAME:VALUE      Header to inject (repeatable)
    --filter SUBSTR          Only inject into URLs containing SUBSTR (repeatable)
    --log                    Log every request passing the hook

EXAMPLES:
    maphook inspect --header X-Api-Key:abc --filter tiles.example.com \
        https://tiles.example.com/1/2/3.png https://other.example.com/
    {env}=hook.json maphook inspect https://tiles.example.com/style.json
"#,
        env = CONFIG_ENV
    );
}

fn parse_inspect_args(args: &[String]) -> Result<InspectArgs, String> {
    let mut parsed = InspectArgs::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                let path = iter.next().ok_or("--config requires a path")?;
                parsed.config_path = Some(path.clone());
            }
            "--header" => {
                let raw = iter.next().ok_or("--header requires NAME:VALUE")?;
                let (name, value) = raw
                    .split_once(':')
                    .ok_or_else(|| format!("Invalid header '{}', expected NAME:VALUE", raw))?;
                parsed
                    .headers
                    .push((name.trim().to_string(), value.trim().to_string()));
            }
            "--filter" => {
                let filter = iter.next().ok_or("--filter requires a substring")?;
                parsed.filters.push(filter.clone());
            }
            "--log" => parsed.log_requests = true,
            flag if flag.starts_with("--") => return Err(format!("Unknown option: {}", flag)),
            url => parsed.urls.push(url.to_string()),
        }
    }

    if parsed.urls.is_empty() {
        return Err("No URLs given".to_string());
    }
    Ok(parsed)
}

fn build_config(args: &InspectArgs) -> maphook::Result<HookConfig> {
    let path = args.config_path.clone().or_else(|| env::var(CONFIG_ENV).ok());
    let mut config = match path {
        Some(path) => HookConfig::from_file(path)?,
        None => HookConfig::new(),
    };

    for (name, value) in &args.headers {
        config = config.header(name.as_str(), value.as_str());
    }
    for filter in &args.filters {
        config = config.filter(filter.as_str());
    }
    if args.log_requests {
        config = config.log_requests(true);
    }
    Ok(config)
}

fn run_inspect(args: InspectArgs) -> ExitCode {
    let config = match build_config(&args) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {}", e);
            return ExitCode::from(1);
        }
    };

    config.apply();

    let mut failed = false;
    for url in &args.urls {
        match Request::get(url) {
            Ok(request) => {
                println!("\n=== {} ===", request.url);
                if request.headers.is_empty() {
                    println!("  (no headers)");
                }
                for (name, value) in request.headers.iter() {
                    println!("  {}: {}", name, value.to_str().unwrap_or("<binary>"));
                }
            }
            Err(e) => {
                eprintln!("Skipping '{}': {}", url, e);
                failed = true;
            }
        }
    }

    if failed {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}
