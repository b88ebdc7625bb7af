use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use skysense::{
    Dashboard, ProviderClient, SkySenseConfig, locations, logging, report, web,
};
use tracing::warn;

const USAGE: &str = "\
Usage: skysense [--config PATH] [--verbose] <command>

Commands:
  serve [--port N]                 Run the web dashboard API
  dashboard [--city QUERY]         Print a weather report for a location
  locations [--region ID] [--province ID] [--search TEXT]
                                   Browse the location catalog
  help                             Show this message";

#[derive(Debug, Default)]
struct GlobalArgs {
    config: Option<PathBuf>,
    verbose: bool,
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Serve {
        port: Option<u16>,
    },
    Dashboard {
        city: Option<String>,
    },
    Locations {
        region: Option<String>,
        province: Option<String>,
        search: Option<String>,
    },
    Help,
}

fn parse_args<I>(args: I) -> Result<(GlobalArgs, Command)>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let mut global = GlobalArgs::default();
    let mut command_name = None;
    let mut rest = Vec::new();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "-c" if command_name.is_none() => {
                let path = args.next().context("--config requires a path")?;
                global.config = Some(PathBuf::from(path));
            }
            "--verbose" | "-v" => global.verbose = true,
            _ if command_name.is_none() => command_name = Some(arg),
            _ => rest.push(arg),
        }
    }

    let mut flags = rest.into_iter();
    let command = match command_name.as_deref() {
        None | Some("help" | "--help" | "-h") => Command::Help,
        Some("serve") => {
            let mut port = None;
            while let Some(flag) = flags.next() {
                match flag.as_str() {
                    "--port" | "-p" => {
                        let value = flag_value(&mut flags, &flag)?;
                        port = Some(
                            value
                                .parse()
                                .with_context(|| format!("Invalid port '{value}'"))?,
                        );
                    }
                    other => bail!("Unknown option for serve: {other}"),
                }
            }
            Command::Serve { port }
        }
        Some("dashboard") => {
            let mut city = None;
            while let Some(flag) = flags.next() {
                match flag.as_str() {
                    "--city" => city = Some(flag_value(&mut flags, &flag)?),
                    other => bail!("Unknown option for dashboard: {other}"),
                }
            }
            Command::Dashboard { city }
        }
        Some("locations") => {
            let (mut region, mut province, mut search) = (None, None, None);
            while let Some(flag) = flags.next() {
                match flag.as_str() {
                    "--region" => region = Some(flag_value(&mut flags, &flag)?),
                    "--province" => province = Some(flag_value(&mut flags, &flag)?),
                    "--search" => search = Some(flag_value(&mut flags, &flag)?),
                    other => bail!("Unknown option for locations: {other}"),
                }
            }
            Command::Locations {
                region,
                province,
                search,
            }
        }
        Some(other) => bail!("Unknown command: {other}"),
    };

    Ok((global, command))
}

fn flag_value(flags: &mut impl Iterator<Item = String>, flag: &str) -> Result<String> {
    flags
        .next()
        .with_context(|| format!("{flag} requires a value"))
}

fn load_config(global: &GlobalArgs) -> Result<SkySenseConfig> {
    if let Some(path) = &global.config {
        if !path.exists() {
            bail!("Config file not found: {}", path.display());
        }
    }
    let mut config = SkySenseConfig::load_from_path(global.config.clone())?;
    if global.verbose {
        config.logging.level = "debug".to_string();
    }
    Ok(config)
}

async fn run_dashboard(config: &SkySenseConfig, city: Option<String>) -> Result<()> {
    let client = ProviderClient::new(&config.api)?;
    let query = city.unwrap_or_else(|| config.dashboard.default_city.clone());
    let selection = locations::selection_for_query(&query);

    let mut dashboard = Dashboard::new(Arc::new(client), selection)
        .with_forecast_days(config.dashboard.forecast_days as usize);
    if let Err(e) = dashboard.refresh().await {
        warn!(error = %e, "Dashboard refresh failed");
    }

    print!("{}", report::render_text(&dashboard.view(&config.chart.layout())));
    Ok(())
}

fn print_locations(region: Option<&str>, province: Option<&str>, search: Option<&str>) {
    let view = locations::catalog_view(region, province, search);

    let regions: Vec<String> = view
        .regions
        .iter()
        .map(|r| {
            if r.id == view.region.id {
                format!("[{}]", r.name)
            } else {
                r.name.to_string()
            }
        })
        .collect();
    println!("Regions: {}", regions.join("  "));
    println!("Province: {} ({})", view.province.name, view.province.id);

    if view.cities.is_empty() {
        println!("No cities match.");
    }
    for city in &view.cities {
        println!("  {:<20} {}", city.label, city.query);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let (global, command) = parse_args(env::args().skip(1))?;

    if command == Command::Help {
        println!("{USAGE}");
        return Ok(());
    }

    let mut config = load_config(&global)?;
    logging::init(&config.logging);

    match command {
        Command::Serve { port } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            let client = ProviderClient::new(&config.api)?;
            web::run(&config, Arc::new(client)).await
        }
        Command::Dashboard { city } => run_dashboard(&config, city).await,
        Command::Locations {
            region,
            province,
            search,
        } => {
            print_locations(region.as_deref(), province.as_deref(), search.as_deref());
            Ok(())
        }
        Command::Help => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<(GlobalArgs, Command)> {
        parse_args(args.iter().map(ToString::to_string))
    }

    #[test]
    fn test_no_command_is_help() {
        let (_, command) = parse(&[]).unwrap();
        assert_eq!(command, Command::Help);
    }

    #[test]
    fn test_global_flags() {
        let (global, command) = parse(&["--config", "sky.toml", "-v", "serve", "--port", "9000"]).unwrap();
        assert_eq!(global.config, Some(PathBuf::from("sky.toml")));
        assert!(global.verbose);
        assert_eq!(command, Command::Serve { port: Some(9000) });
    }

    #[test]
    fn test_locations_flags() {
        let (_, command) = parse(&["locations", "--region", "luzon", "--search", "city"]).unwrap();
        assert_eq!(
            command,
            Command::Locations {
                region: Some("luzon".to_string()),
                province: None,
                search: Some("city".to_string()),
            }
        );
    }

    #[test]
    fn test_errors() {
        assert!(parse(&["forecast"]).is_err());
        assert!(parse(&["serve", "--port", "http"]).is_err());
        assert!(parse(&["dashboard", "--city"]).is_err());
        assert!(parse(&["--config"]).is_err());
    }
}
