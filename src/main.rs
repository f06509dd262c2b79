//! `naming-router`: inspect how a configuration routes names.
//!
//! # Architecture Overview
//!
//! ```text
//!   name ──▶ name::split ──▶ provider::resolver ──▶ dispatch ──▶ backend context
//!                                   ▲                   ▲
//!                               environment         plugin registry
//!                                   ▲
//!                            config (TOML file)
//! ```
//!
//! The binary carries no backend plugins, so `resolve` reports which tier
//! would serve a name with an empty registry.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde_json::{json, Value};

use naming_router::config::{load_config, RouterConfig};
use naming_router::name::{split, Name};
use naming_router::observability::logging::init_logging;
use naming_router::plugin::PluginRegistry;
use naming_router::provider::ProviderUri;
use naming_router::routing::RoutingContext;
use naming_router::NamingError;

#[derive(Parser)]
#[command(name = "naming-router")]
#[command(about = "Inspect naming context routing for a configuration", long_about = None)]
struct Cli {
    /// Router configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level, overriding the configuration
    #[arg(short, long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split a name into URL scheme and residual name
    Split { name: String },
    /// Show the provider endpoints derived from the environment
    Providers,
    /// Show which tier would serve a name
    Resolve { name: String },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match load_config(path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("Error: {}", err);
                return ExitCode::FAILURE;
            }
        },
        None => RouterConfig::default(),
    };

    let level = cli
        .log_level
        .as_deref()
        .unwrap_or(config.observability.log_level.as_str());
    init_logging(level);

    let router = RoutingContext::from_config(&config, PluginRegistry::empty());
    let report = match cli.command {
        Commands::Split { name } => split_report(&name),
        Commands::Providers => providers_report(&router),
        Commands::Resolve { name } => resolve_report(&router, &name),
    };

    match report {
        Ok(value) => {
            print_json(&value);
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::debug!(error = %err, "Command failed");
            print_json(&json!({ "error": err.to_string() }));
            ExitCode::FAILURE
        }
    }
}

fn split_report(input: &str) -> Result<Value, NamingError> {
    let name = Name::parse(input)?;
    let split = split(&name);
    Ok(json!({
        "name": input,
        "url_scheme": split.url_scheme(),
        "residual": split.residual().components(),
        "residual_name": split.residual().to_string(),
    }))
}

fn providers_report(router: &RoutingContext) -> Result<Value, NamingError> {
    let uris = router.provider_uris()?;
    Ok(json!({
        "providers": uris.map(|uris| uris.iter().map(uri_report).collect::<Vec<_>>()),
    }))
}

fn resolve_report(router: &RoutingContext, input: &str) -> Result<Value, NamingError> {
    let name = Name::parse(input)?;
    let split = split(&name);
    let resolution = router.resolve(&name)?;
    let forwarded = if resolution.legacy_name_form {
        name.to_string()
    } else {
        split.residual().to_string()
    };
    Ok(json!({
        "name": input,
        "url_scheme": split.url_scheme(),
        "tier": resolution.tier.as_str(),
        "legacy_name_form": resolution.legacy_name_form,
        "forwarded_name": forwarded,
    }))
}

fn uri_report(uri: &ProviderUri) -> Value {
    json!({
        "uri": uri.as_str(),
        "scheme": uri.scheme(),
        "host": uri.host(),
        "port": uri.port(),
    })
}

fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(err) => eprintln!("Error: {}", err),
    }
}
