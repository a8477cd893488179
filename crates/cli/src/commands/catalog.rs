//! List the catalog.

use tracing::info;

use bitbazaar_storefront::catalog;

/// Log every catalog product in display order.
pub fn list() {
    for product in catalog::products() {
        info!(
            id = %product.id,
            title = %product.title,
            price = %product.unit_price().display(),
            shipping = %product.unit_shipping().display(),
            delivery = %product.delivery_date,
            "Product"
        );
    }
    info!(count = catalog::products().len(), "Catalog listed");
}
