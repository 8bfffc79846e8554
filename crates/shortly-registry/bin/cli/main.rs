mod cli;

use crate::cli::{Command, LogFormatArg, CLI};
use anyhow::Context;
use clap::Parser;
use shortly_core::{Clock, Store};
use shortly_generator::Generator;
use shortly_registry::{RegistryConfig, UrlRegistry};
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEMO_URLS: &[(&str, Option<&str>)] = &[
    ("https://www.rust-lang.org/learn", None),
    ("https://doc.rust-lang.org/book/ch04-01-what-is-ownership.html", Some("own")),
    ("https://crates.io/crates/serde", None),
];

fn main() -> anyhow::Result<()> {
    let cli = CLI::parse();
    init_tracing(cli.log_format);

    let config = RegistryConfig::builder()
        .base_url(cli.base_url)
        .storage_path(cli.storage_path)
        .build();

    let mut registry = UrlRegistry::open(config);

    let config = registry.config();
    info!(
        base_url = %config.base_url,
        storage_path = %config.storage_path.display(),
        code_length = config.code_length,
        "opened registry"
    );

    match cli.command {
        Some(command) => run(&mut registry, command),
        None => demo(&mut registry),
    }
}

fn init_tracing(format: LogFormatArg) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match format {
        LogFormatArg::Text => builder.init(),
        LogFormatArg::Json => builder.json().init(),
    }
}

fn run<S: Store, G: Generator, C: Clock>(
    registry: &mut UrlRegistry<S, G, C>,
    command: Command,
) -> anyhow::Result<()> {
    match command {
        Command::Shorten { url, custom_code } => {
            let record = registry
                .create(&url, custom_code.as_deref())
                .with_context(|| format!("failed to shorten {url}"))?;
            println!(
                "Short URL: {}",
                registry.full_short_url(record.short_code.as_str())
            );
            println!("Code: {}", record.short_code);
        }
        Command::Expand { code } => match registry.resolve(&code, false) {
            Some(url) => println!("{url}"),
            None => println!("Short code not found: {code}"),
        },
        Command::Visit { code } => match registry.resolve(&code, true) {
            Some(url) => println!("{url}"),
            None => println!("Short code not found: {code}"),
        },
        Command::Stats { code } => match registry.stats(code.as_deref()) {
            Some(stats) => println!("{}", serde_json::to_string_pretty(&stats)?),
            None => println!("Short code not found: {}", code.unwrap_or_default()),
        },
        Command::List => {
            if registry.is_empty() {
                println!("No short URLs yet.");
            }
            for record in registry.list() {
                println!(
                    "{}  {}  ({} clicks)",
                    record.short_code, record.original_url, record.click_count
                );
            }
        }
        Command::Delete { code } => {
            if registry.delete(&code) {
                println!("Deleted {code}");
            } else {
                println!("Short code not found: {code}");
            }
        }
    }

    Ok(())
}

/// Shortens a few URLs, follows one of them twice, and prints the stats.
fn demo<S: Store, G: Generator, C: Clock>(
    registry: &mut UrlRegistry<S, G, C>,
) -> anyhow::Result<()> {
    println!("== shorten");
    let mut codes = Vec::with_capacity(DEMO_URLS.len());
    for (url, custom_code) in DEMO_URLS {
        let record = match registry.create(url, *custom_code) {
            Ok(record) => record,
            Err(err) => {
                println!("  {url}: {err}");
                continue;
            }
        };
        println!(
            "  {} -> {}",
            registry.full_short_url(record.short_code.as_str()),
            record.original_url
        );
        codes.push(record.short_code);
    }

    println!("== resolve");
    if let Some(code) = codes.first() {
        for _ in 0..2 {
            if let Some(url) = registry.resolve(code.as_str(), true) {
                println!("  {code} -> {url}");
            }
        }
    }

    println!("== invalid input");
    if let Err(err) = registry.create("not-a-url", None) {
        println!("  {err}");
    }

    println!("== stats");
    println!("{}", serde_json::to_string_pretty(&registry.summary())?);

    Ok(())
}
