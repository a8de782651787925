use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use sentinel_cli::app::App;
use sentinel_cli::cli::{Cli, Commands, ConfigCommands};
use sentinel_cli::core::{ApiClient, EndpointInfo, NewEndpoint};
use sentinel_cli::utils::{self, format_age, format_response_time, truncate_string, AppConfig};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    // Set up logging on stderr, keeping stdout for command output
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(EnvFilter::new(filter))
        .init();

    let server_url = utils::resolve_server_url(cli.server.as_deref());
    let timeout = utils::resolve_timeout_secs(cli.timeout);
    let api = ApiClient::new(&server_url, timeout)?;

    match cli.command {
        None => {
            // No command - run interactive TUI
            let mut app = App::new(api);
            app.run().await?;
        }
        Some(Commands::List) => {
            handle_list(&api).await?;
        }
        Some(Commands::Add {
            name,
            url,
            method,
            expected_status,
        }) => {
            handle_add(&api, name, url, method, expected_status).await?;
        }
        Some(Commands::Check { id, all }) => {
            handle_check(&api, id, all).await?;
        }
        Some(Commands::Delete { id }) => {
            handle_delete(&api, &id).await?;
        }
        Some(Commands::History { id }) => {
            // Navigation is delegated to whatever the user opens URLs with
            println!("{}", api.history_url(&id));
        }
        Some(Commands::Config { command }) => {
            handle_config(command, &server_url)?;
        }
    }

    Ok(())
}

fn print_endpoint_table(endpoints: &[EndpointInfo]) {
    println!("Monitored endpoints ({})\n", endpoints.len());
    println!(
        "{:<10} {:<26} {:<40} {:<7} {:<7} {:<20} {:<7} {:<7}",
        "ID", "Name", "URL", "Method", "Expect", "Last check", "Status", "Health"
    );
    println!("{}", "-".repeat(126));

    for endpoint in endpoints {
        let last_check = endpoint
            .last_check
            .as_deref()
            .map(format_age)
            .unwrap_or_else(|| "-".to_string());
        let status = endpoint
            .last_status
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".to_string());
        let health = if endpoint.last_check.is_none() {
            "-".normal()
        } else if endpoint.is_healthy {
            "up".green()
        } else {
            "down".red()
        };

        println!(
            "{:<10} {:<26} {:<40} {:<7} {:<7} {:<20} {:<7} {}",
            endpoint.id,
            truncate_string(&endpoint.name, 24),
            truncate_string(&endpoint.url, 38),
            endpoint.method,
            endpoint.expected_status,
            last_check,
            status,
            health
        );
    }
}

async fn handle_list(api: &ApiClient) -> Result<()> {
    let endpoints = api.list_endpoints().await?;
    print_endpoint_table(&endpoints);
    Ok(())
}

async fn handle_add(
    api: &ApiClient,
    name: String,
    url: String,
    method: String,
    expected_status: u16,
) -> Result<()> {
    let endpoint = NewEndpoint {
        name,
        url,
        method: method.to_uppercase(),
        expected_status,
    };

    let errors = endpoint.validate();
    if !errors.is_empty() {
        for error in &errors {
            eprintln!("{} {}", "✗".red(), error);
        }
        anyhow::bail!("endpoint rejected by client-side validation");
    }

    api.create_endpoint(&endpoint).await?;
    println!("{} Endpoint '{}' added", "✓".green(), endpoint.name);

    // Reload the view
    let endpoints = api.list_endpoints().await?;
    print_endpoint_table(&endpoints);

    Ok(())
}

async fn handle_check(api: &ApiClient, id: Option<String>, all: bool) -> Result<()> {
    if all {
        return handle_check_all(api).await;
    }

    let id = id.ok_or_else(|| anyhow::anyhow!("endpoint id required (or pass --all)"))?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    spinner.set_message(format!("Checking {}...", id));
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));

    let result = api.check_endpoint(&id).await;
    spinner.finish_and_clear();

    // A failed check leaves the view alone: nothing changed server-side
    let report = result?;
    println!(
        "{} {}: response time {}",
        "✓".green(),
        id,
        format_response_time(report.response_time)
    );

    // Reload the view
    let endpoints = api.list_endpoints().await?;
    print_endpoint_table(&endpoints);

    Ok(())
}

async fn handle_check_all(api: &ApiClient) -> Result<()> {
    let endpoints = api.list_endpoints().await?;
    if endpoints.is_empty() {
        println!("No endpoints to check.");
        return Ok(());
    }

    // Independent probes, gathered together; one failure never aborts the sweep
    let checks = endpoints.iter().map(|endpoint| {
        let id = endpoint.id.clone();
        async move { (id.clone(), api.check_endpoint(&id).await) }
    });
    let results = join_all(checks).await;

    let total = results.len();
    let mut failures = 0;
    for (id, result) in results {
        match result {
            Ok(report) => println!(
                "{} {:<26} response time {}",
                "✓".green(),
                id,
                format_response_time(report.response_time)
            ),
            Err(e) => {
                failures += 1;
                println!("{} {:<26} {}", "✗".red(), id, e);
            }
        }
    }
    println!();

    // Reload once after the sweep
    let endpoints = api.list_endpoints().await?;
    print_endpoint_table(&endpoints);

    if failures > 0 {
        anyhow::bail!("{} of {} checks failed", failures, total);
    }

    Ok(())
}

async fn handle_delete(api: &ApiClient, id: &str) -> Result<()> {
    // Anything but 204 comes back as an error here, and the view stays put
    api.delete_endpoint(id).await?;
    println!("{} Endpoint {} deleted", "✓".green(), id);

    // Reload the view
    let endpoints = api.list_endpoints().await?;
    print_endpoint_table(&endpoints);

    Ok(())
}

fn handle_config(command: ConfigCommands, server_url: &str) -> Result<()> {
    match command {
        ConfigCommands::View => {
            let config = AppConfig::load()?;
            println!("Active server URL: {}", server_url);
            println!("Config file:       {}", AppConfig::config_path()?.display());
            println!(
                "  server_url   = {}",
                config.server_url.as_deref().unwrap_or("(unset)")
            );
            println!(
                "  timeout_secs = {}",
                config
                    .timeout_secs
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "(unset)".to_string())
            );
        }

        ConfigCommands::Path => {
            println!("{}", AppConfig::config_path()?.display());
        }

        ConfigCommands::SetServer { url } => {
            if !utils::is_valid_url(&url) {
                anyhow::bail!("not an http(s) URL: {}", url);
            }
            let mut config = AppConfig::load()?;
            config.set_server_url(url.clone())?;
            println!("{} Server URL saved: {}", "✓".green(), url);
        }
    }

    Ok(())
}
