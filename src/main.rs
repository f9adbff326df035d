use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use mikan::app::AppContext;
use mikan::cli::{commands, Cli, Commands, FavAction};
use mikan::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;
    let ctx = AppContext::new(cli.db, config)?;

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Top { page } => {
            commands::top(&ctx, page).await?;
        }
        Commands::Search { query, page } => {
            commands::search(&ctx, &query, page).await?;
        }
        Commands::Fav { action } => match action {
            FavAction::List => {
                commands::list_favorites(&ctx)?;
            }
            FavAction::Remove { id } => {
                commands::remove_favorite(&ctx, id)?;
            }
        },
        Commands::Tui => {
            mikan::tui::run(Arc::new(ctx)).await?;
        }
    }

    Ok(())
}
