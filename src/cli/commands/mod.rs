//! Subcommand handlers

use anyhow::Result;
use serde::Serialize;
use uuid::Uuid;

use geodata_marketplace_client::models::ServerResponse;
use geodata_marketplace_client::{
    CatalogueQuery, Location, MarketplaceClient, NavigationDecision,
};

use crate::output;

pub enum CartCommand {
    Show,
    Add { product: Uuid, pricing_model: Uuid },
    Remove(Uuid),
    Clear,
}

/// Print an envelope: raw JSON, or its messages followed by the formatted
/// payload
fn report<R: Serialize>(
    response: &ServerResponse<R>,
    json: bool,
    format: impl FnOnce(&R) -> String,
) -> Result<()> {
    if json {
        return output::print_json(response);
    }
    output::print_messages(&response.messages);
    if !response.success {
        anyhow::bail!("Request was not successful");
    }
    if let Some(result) = &response.result {
        print!("{}", format(result));
    }
    Ok(())
}

pub async fn handle_config(client: &MarketplaceClient, locale: Option<&str>, json: bool) -> Result<()> {
    let response = client.load_configuration(locale).await?;
    report(&response, json, output::format_configuration)
}

pub async fn handle_search(
    client: &MarketplaceClient,
    query: String,
    page: u32,
    size: Option<u32>,
    json: bool,
) -> Result<()> {
    let size = size.unwrap_or(client.config().page_size);
    let response = client
        .catalogue()
        .find(CatalogueQuery::new(query, page, size))
        .await?;
    report(&response, json, output::format_search_page)
}

pub async fn handle_item(client: &MarketplaceClient, id: Uuid, json: bool) -> Result<()> {
    let response = client.catalogue().find_one(id).await?;
    report(&response, json, output::format_item)
}

pub async fn handle_cart(client: &MarketplaceClient, command: CartCommand, json: bool) -> Result<()> {
    let response = match command {
        CartCommand::Show => client.refresh_cart().await?,
        CartCommand::Add {
            product,
            pricing_model,
        } => {
            let lookup = client.catalogue().find_one(product).await?;
            match lookup.result {
                Some(item) if lookup.success => {
                    client.add_item_to_cart(&item, pricing_model).await?
                }
                _ => {
                    output::print_messages(&lookup.messages);
                    anyhow::bail!("Catalogue item {} not found", product);
                }
            }
        }
        CartCommand::Remove(id) => client.remove_from_cart(id).await?,
        CartCommand::Clear => client.clear_cart().await?,
    };
    report(&response, json, output::format_cart)
}

pub async fn handle_ratings(
    client: &MarketplaceClient,
    id: Uuid,
    provider: bool,
    json: bool,
) -> Result<()> {
    let response = if provider {
        client.rating().get_provider_ratings(id).await?
    } else {
        client.rating().get_asset_ratings(id).await?
    };
    report(&response, json, |ratings| output::format_ratings(ratings))
}

pub fn handle_route(client: &MarketplaceClient, path: &str) -> Result<()> {
    let (resolved, decision) = client.router().check(path)?;
    match decision {
        NavigationDecision::Proceed => {
            let target = client.navigate(path)?;
            println!(
                "{} -> {} ({})",
                path,
                target.path,
                target.name.as_deref().unwrap_or("unnamed")
            );
        }
        NavigationDecision::Redirect(location) => {
            let target = match &location {
                Location::Path(p) => p.clone(),
                Location::Named(_) => client.router().location_path(&location)?,
            };
            println!(
                "{} ({}) redirected by guard to {}",
                resolved.path,
                resolved.name.as_deref().unwrap_or("unnamed"),
                target
            );
        }
    }
    Ok(())
}
