//! Catalog seeding
//!
//! Loads the two brand catalogs from `<assets>/celeste.json` and
//! `<assets>/mewave.json`. Safe to run repeatedly: stores are matched by name
//! and products by `(store, name)`.

use std::{io, path::Path};

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::products::{
    ProductsService, ProductsServiceError,
    data::{NewProduct, NewStore},
    records::{ProductUuid, StoreRecord, StoreUuid},
};

/// Stores created by the seeder, with their catalog file.
const STORES: [(&str, &str, &str); 2] = [
    ("Celeste", "Women's fashion brand", "celeste.json"),
    ("Mewave", "Streetwear brand", "mewave.json"),
];

/// One entry of a catalog file.
#[derive(Debug, Clone, Deserialize)]
struct CatalogEntry {
    #[serde(default)]
    category: String,
    name: String,
    #[serde(default)]
    description: String,
    price: Decimal,
    #[serde(default)]
    sizes: Vec<String>,
    #[serde(default)]
    available_units: i32,
    #[serde(default)]
    image: String,
}

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to create store {name}")]
    Store {
        name: &'static str,
        #[source]
        source: ProductsServiceError,
    },
}

#[derive(Debug, Error)]
enum CatalogError {
    #[error("failed to read catalog")]
    Read(#[from] io::Error),

    #[error("failed to parse catalog")]
    Parse(#[from] serde_json::Error),
}

/// Counts of what a seeding run did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub stores: usize,
    pub products: usize,
    pub skipped: usize,
}

/// Ensure the brand stores exist and upsert every product in their catalogs.
///
/// Only a store that cannot be written is fatal. Unreadable catalogs and
/// rejected products are logged and skipped.
pub async fn seed(
    products: &dyn ProductsService,
    assets_dir: &Path,
) -> Result<SeedSummary, SeedError> {
    let mut summary = SeedSummary::default();

    for (name, description, file) in STORES {
        let store = products
            .upsert_store(NewStore {
                uuid: StoreUuid::new(),
                name: name.to_string(),
                description: description.to_string(),
            })
            .await
            .map_err(|source| SeedError::Store { name, source })?;

        summary.stores += 1;

        let path = assets_dir.join(file);

        let entries = match read_catalog(&path).await {
            Ok(entries) => entries,
            Err(error) => {
                warn!(path = %path.display(), "skipping {name} catalog: {error}");
                continue;
            }
        };

        for entry in entries {
            if seed_product(products, &store, entry).await {
                summary.products += 1;
            } else {
                summary.skipped += 1;
            }
        }
    }

    info!(
        stores = summary.stores,
        products = summary.products,
        skipped = summary.skipped,
        "seeded catalog"
    );

    Ok(summary)
}

async fn read_catalog(path: &Path) -> Result<Vec<CatalogEntry>, CatalogError> {
    let bytes = tokio::fs::read(path).await?;

    Ok(serde_json::from_slice(&bytes)?)
}

async fn seed_product(
    products: &dyn ProductsService,
    store: &StoreRecord,
    entry: CatalogEntry,
) -> bool {
    let name = entry.name.clone();

    let result = products
        .upsert_product(NewProduct {
            uuid: ProductUuid::new(),
            store_uuid: store.uuid,
            name: entry.name,
            description: entry.description,
            category: entry.category,
            price: entry.price,
            available_units: entry.available_units,
            image_path: entry.image,
            sizes: entry.sizes,
        })
        .await;

    match result {
        Ok(_) => true,
        Err(error) => {
            warn!(store = %store.name, product = %name, "failed to seed product: {error}");
            false
        }
    }
}
