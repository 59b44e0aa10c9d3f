use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;

use scm_catalogue::config::{Cli, Command, Config};
use scm_catalogue::provisioning::assign_tracking_links;
use scm_catalogue::routes::AppState;
use scm_catalogue::store::ProductStore;
use scm_catalogue::{init_tracing, serve, shutdown_signal};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);
    let config = Config::from_cli(&cli);

    let store = ProductStore::open(&config.metadata_path)
        .await
        .with_context(|| format!("loading {}", config.metadata_path.display()))?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            let listener = TcpListener::bind(&config.bind_addr)
                .await
                .with_context(|| format!("binding {}", config.bind_addr))?;
            let state = AppState::new(store, config);
            serve(listener, state, shutdown_signal()).await?;
            info!("Catalogue stopped");
        }
        Command::AssignTrackingLinks { frontend_url } => {
            let count = assign_tracking_links(&store, &config.data_dir, &frontend_url).await?;
            println!(
                "Assigned tracking links to {count} products in {}",
                config.metadata_path.display()
            );
        }
    }
    Ok(())
}
