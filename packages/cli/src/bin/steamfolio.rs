use clap::{Parser, Subcommand};
use colored::*;
use std::process;

use steamfolio_cli::display::{library_table, profile_header, sync_summary_line};
use steamfolio_cli::logging::init_tracing;
use steamfolio_cli::server::serve;
use steamfolio_cli::AppContext;
use steamfolio_config::AppConfig;

#[derive(Parser)]
#[command(name = "steamfolio")]
#[command(about = "Steamfolio - Steam library sync and portfolio server")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the JSON API server
    Serve {
        /// Port to listen on (overrides STEAMFOLIO_PORT)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Link a local user to a Steam account
    Link {
        /// Local user identifier
        #[arg(long)]
        user: String,
        /// 64-bit Steam ID
        #[arg(long)]
        steamid: String,
    },
    /// Pull the latest library and profile data from Steam
    Sync {
        /// Profile ID
        #[arg(long)]
        profile: i64,
    },
    /// Print a profile's library, most played first
    Library {
        /// Profile ID
        #[arg(long)]
        profile: i64,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    if let Err(e) = run(cli.command).await {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

async fn run(command: Commands) -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    let context = AppContext::from_config(config).await?;

    match command {
        Commands::Serve { port } => {
            let port = port.unwrap_or(context.config.port);
            serve(context, port).await
        }
        Commands::Link { user, steamid } => {
            let profile = context.portfolio.link_profile(&user, &steamid).await?;
            println!(
                "{} user {} is profile {} (steam {})",
                "✓".green(),
                profile.user_id.cyan(),
                profile.id.to_string().cyan(),
                profile.steamid64
            );
            Ok(())
        }
        Commands::Sync { profile } => {
            let summary = context.portfolio.force_sync(profile).await?;
            println!("{} {}", "✓".green(), sync_summary_line(&summary));
            Ok(())
        }
        Commands::Library { profile } => {
            let entries = context.portfolio.library(profile).await?;
            let profile = context.portfolio.get_profile(profile).await?;

            println!("{}", profile_header(&profile));
            if entries.is_empty() {
                println!("{}", "No games found".yellow());
                return Ok(());
            }

            println!("{}", library_table(&entries));
            println!("Total: {} games", entries.len().to_string().cyan());
            Ok(())
        }
    }
}
