use anyhow::Context;
use clap::Parser;
use inventory_admin::config::AppConfig;
use inventory_admin::{HtmlPage, HttpInventoryApi, InventoryController, UiEvent};
use log::info;

/// Loads the inventory page against the REST API and prints the rendered
/// table and notifications.
#[derive(Parser, Debug)]
#[command(name = "inventory-admin")]
struct Cli {
    /// Filter by brand after the initial load
    #[arg(long)]
    brand: Option<String>,
    /// Filter by model after the initial load
    #[arg(long)]
    model: Option<String>,
    /// Maximum price filter
    #[arg(long)]
    max_price: Option<String>,
    /// Show collection statistics
    #[arg(long)]
    stats: bool,
    /// Show only records with low stock
    #[arg(long)]
    low_stock: bool,
    /// Override the API base URL from the configuration
    #[arg(long)]
    base_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = AppConfig::load().context("cargando configuración")?;
    if let Some(base_url) = cli.base_url {
        config.api.base_url = base_url;
    }
    let api = HttpInventoryApi::new(&config.api);
    info!("Iniciando el panel de inventario contra {}", api.collection_url());

    let mut controller = InventoryController::new(api, HtmlPage::new());
    controller.dispatch(UiEvent::PageReady).await;

    if cli.brand.is_some() || cli.model.is_some() || cli.max_price.is_some() {
        let search = controller.view_mut().search_form_mut();
        search.brand = cli.brand.unwrap_or_default();
        search.model = cli.model.unwrap_or_default();
        search.max_price = cli.max_price.unwrap_or_default();
        controller.dispatch(UiEvent::Search).await;
    }
    if cli.low_stock {
        controller.dispatch(UiEvent::ShowLowStock).await;
    }
    if cli.stats {
        controller.dispatch(UiEvent::ShowStatistics).await;
    }

    print!("{}", controller.view().to_html());
    Ok(())
}
