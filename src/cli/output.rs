//! Output formatting for the CLI

use serde::Serialize;

use geodata_marketplace_client::models::{
    Cart, CatalogueItem, Configuration, QueryResultPage, Rating, ServerMessage, rating,
};

/// Print any value as pretty JSON
pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_messages(messages: &[ServerMessage]) {
    for message in messages {
        match &message.description {
            Some(description) => {
                eprintln!("{:?} {}: {}", message.level, message.code, description)
            }
            None => eprintln!("{:?} {}", message.level, message.code),
        }
    }
}

pub fn format_configuration(config: &Configuration) -> String {
    let mut output = String::new();
    let providers: Vec<String> = config
        .auth_providers
        .iter()
        .map(|p| format!("{:?}", p))
        .collect();
    output.push_str(&format!("Auth providers: {}\n", providers.join(", ")));
    output.push_str(&format!("Asset file types: {}\n", config.asset.file_types.len()));
    for file_type in &config.asset.file_types {
        output.push_str(&format!(
            "  {} ({}): {}\n",
            file_type.format,
            file_type.category,
            file_type.extensions.join(", ")
        ));
    }
    output
}

fn item_title(item: &CatalogueItem) -> &str {
    item.metadata.title.as_deref().unwrap_or("(untitled)")
}

pub fn format_search_page(page: &QueryResultPage<CatalogueItem>) -> String {
    let mut output = format!(
        "Page {} of {} ({} item(s) total)\n",
        page.page_request.page + 1,
        page.page_count().max(1),
        page.count
    );
    for item in &page.items {
        let publisher = item
            .publisher
            .as_ref()
            .map(|p| p.name.as_str())
            .unwrap_or("-");
        let price = item
            .cheapest_pricing_model()
            .map(|m| format!("{:.2} {}", m.total_price(), m.totals().currency))
            .unwrap_or_else(|| "-".to_string());
        output.push_str(&format!(
            "{}  {}  [{}]  from {}\n",
            item.id,
            item_title(item),
            publisher,
            price
        ));
    }
    output
}

pub fn format_item(item: &CatalogueItem) -> String {
    let mut output = format!("{}\n  Id: {}\n", item_title(item), item.id);
    if let Some(abstract_text) = &item.metadata.abstract_text {
        output.push_str(&format!("  Abstract: {}\n", abstract_text));
    }
    if !item.metadata.keywords.is_empty() {
        output.push_str(&format!("  Keywords: {}\n", item.metadata.keywords.join(", ")));
    }
    output.push_str("  Pricing models:\n");
    for model in &item.pricing_models {
        let totals = model.totals();
        output.push_str(&format!(
            "    {} {}: {:.2} + {:.2} tax = {:.2} {}\n",
            model.kind(),
            totals.id,
            totals.total_price_excluding_tax,
            totals.tax,
            totals.total_price,
            totals.currency
        ));
    }
    output
}

pub fn format_cart(cart: &Cart) -> String {
    if cart.is_empty() {
        return "Cart is empty\n".to_string();
    }
    let mut output = String::new();
    for entry in &cart.items {
        output.push_str(&format!(
            "{}  {}  {} {:.2}\n",
            entry.id,
            item_title(&entry.product),
            entry.pricing_model.kind(),
            entry.pricing_model.total_price()
        ));
    }
    output.push_str(&format!(
        "Total: {:.2} {} ({:.2} tax, {} item(s))\n",
        cart.total_price, cart.currency, cart.tax_total, cart.total_items
    ));
    output
}

pub fn format_ratings(ratings: &[Rating]) -> String {
    let mut output = match rating::average(ratings) {
        Some(avg) => format!("{} rating(s), average {:.1}\n", ratings.len(), avg),
        None => "No ratings\n".to_string(),
    };
    for r in ratings {
        output.push_str(&format!(
            "  {:.1}  {}\n",
            r.value,
            r.comment.as_deref().unwrap_or("")
        ));
    }
    output
}
