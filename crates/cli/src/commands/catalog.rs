//! Products and categories.

use murti_admin::AdminApi;
use murti_admin::types::{CategoryQuery, ProductQuery, StockUpdate};
use murti_core::ProductId;

use crate::error::CliError;
use crate::output::print_json;

pub async fn list_products(api: &AdminApi, query: &ProductQuery) -> Result<(), CliError> {
    let page = api.products().list(query).await?;
    tracing::info!(
        shown = page.items.len(),
        total = page.pagination.total,
        page = page.pagination.current_page,
        pages = page.pagination.total_pages,
        "Products"
    );
    print_json(&page)
}

pub async fn get_product(api: &AdminApi, id: &ProductId) -> Result<(), CliError> {
    print_json(&api.products().get(id).await?)
}

/// Toggle the active status, or the featured flag when `featured` is set.
pub async fn toggle_product(api: &AdminApi, id: &ProductId, featured: bool) -> Result<(), CliError> {
    let products = api.products();
    let product = if featured {
        products.toggle_featured(id).await?
    } else {
        products.toggle_status(id).await?
    };
    print_json(&product)
}

/// Build a stock update from the mutually exclusive `--set/--add/--subtract` flags.
pub fn stock_update(
    set: Option<u32>,
    add: Option<u32>,
    subtract: Option<u32>,
    reason: Option<String>,
) -> Result<StockUpdate, CliError> {
    let update = match (set, add, subtract) {
        (Some(quantity), None, None) => StockUpdate::set(quantity),
        (None, Some(quantity), None) => StockUpdate::add(quantity),
        (None, None, Some(quantity)) => StockUpdate::subtract(quantity),
        _ => {
            return Err(CliError::InvalidArgs(
                "exactly one of --set, --add or --subtract is required",
            ));
        }
    };
    Ok(match reason {
        Some(reason) => update.with_reason(reason),
        None => update,
    })
}

pub async fn update_stock(api: &AdminApi, id: &ProductId, update: &StockUpdate) -> Result<(), CliError> {
    let product = api.products().update_stock(id, update).await?;
    tracing::info!(product_id = %id, stock = product.stock, status = %product.stock_status(), "Stock updated");
    print_json(&product)
}

pub async fn list_categories(api: &AdminApi, query: &CategoryQuery) -> Result<(), CliError> {
    print_json(&api.categories().list(query).await?)
}
