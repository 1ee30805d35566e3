use anyhow::{Context, Result};
use clap::Parser;
use dm1881_cli::cli::{Cli, Command, MetaKind};
use dm1881_core::ConfigOverrides;
use dm1881_rs::Client;
use serde_json::Value;

mod telemetry;

/// File settings first, command line and environment on top
fn load_overrides(cli: &Cli) -> Result<ConfigOverrides> {
    let file = if cli.config.exists() {
        ConfigOverrides::load(&cli.config)
            .with_context(|| format!("Failed to load {}", cli.config.display()))?
    } else {
        tracing::debug!("{} not found, using defaults", cli.config.display());
        ConfigOverrides::default()
    };

    Ok(file.merge(cli.overrides()))
}

async fn run(cli: &Cli, client: &Client) -> Result<Value> {
    let output = match &cli.command {
        Command::Search(args) => {
            serde_json::to_value(client.search(&args.query, args.query_arguments()).await?)?
        }
        Command::Person(args) => serde_json::to_value(
            client
                .search_person(&args.query, args.query_arguments())
                .await?,
        )?,
        Command::Company(args) => serde_json::to_value(
            client
                .search_company(&args.query, args.query_arguments())
                .await?,
        )?,
        Command::Phone(args) => serde_json::to_value(
            client
                .search_phone(&args.query, args.query_arguments())
                .await?,
        )?,
        Command::Meta { kind } => match kind {
            MetaKind::Filter => serde_json::to_value(client.meta_filters().await?)?,
            MetaKind::SortBy => serde_json::to_value(client.meta_sorters().await?)?,
            MetaKind::Facet => serde_json::to_value(client.meta_facets().await?)?,
            MetaKind::All => serde_json::to_value(client.meta().await?)?,
        },
    };

    Ok(output)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let _guard = telemetry::init_telemetry(&cli.log_dir, cli.debug)?;

    let overrides = load_overrides(&cli)?;
    let client = Client::from_overrides(overrides).context("Invalid client configuration")?;

    tracing::info!(
        environment = %client.config().environment(),
        base_uri = client.config().base_uri(),
        "dm1881 client ready"
    );

    let output = run(&cli, &client).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
