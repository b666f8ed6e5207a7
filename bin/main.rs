use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use otp_mcp_server::runtime::{self, Config};
use otp_mcp_server::server::Server;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Clap styling
const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Debug, clap::Parser)]
#[command(
    version,
    styles = STYLES,
    about = "Open Targets Platform MCP - category subsets of the GraphQL schema",
)]
struct Args {
    /// Path to the config file. Without one, config is read from OTP_MCP_ environment variables
    #[arg(long, short = 'c', env = "OTP_MCP_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, clap::Subcommand)]
enum Command {
    /// List every category with its description and expanded type count
    List,

    /// Print the combined SDL of one or more categories
    Lookup {
        #[arg(required = true)]
        categories: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config: Config = match args.config.as_ref() {
        Some(path) => runtime::read_config(path)
            .with_context(|| format!("Could not load config from {}", path.display()))?,
        None => runtime::read_config_from_env().context("Could not load config from environment")?,
    };

    let (logging_layer, _guard) =
        runtime::logging::LoggingLayerBuilder::new().build(&config.logging);
    tracing_subscriber::registry()
        .with(logging_layer)
        .with(config.logging.env_filter()?)
        .init();

    info!(
        "Open Targets Platform MCP v{} // (c) Open Targets // Licensed under Apache-2.0",
        env!("CARGO_PKG_VERSION")
    );

    let running = Server::builder()
        .schema_source(config.schema)
        .category_source(config.categories)
        .subschema_depth(config.subschema_depth)
        .build()
        .start()
        .await?;

    match args.command {
        Command::List => {
            for subschema in running.cache().iter() {
                println!(
                    "{}\t{}\t{} types",
                    subschema.name,
                    subschema.description,
                    subschema.expanded_types.len()
                );
            }
        }
        Command::Lookup { categories } => {
            println!("{}", running.lookup(&categories)?);
        }
    }

    Ok(())
}
