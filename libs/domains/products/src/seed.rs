//! Startup seeding with synthetic catalog data.

use core_config::{ConfigError, FromEnv, env_parse_or};
use observability::CatalogMetrics;
use rand::Rng;
use rand::seq::IndexedRandom;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::models::Product;
use crate::repository::ProductRepository;

pub const DEFAULT_SEED_COUNT: usize = 50;

const ADJECTIVES: &[&str] = &[
    "Small", "Ergonomic", "Rustic", "Intelligent", "Gorgeous", "Incredible", "Fantastic",
    "Practical", "Sleek", "Awesome", "Generic", "Handcrafted", "Handmade", "Licensed",
    "Refined", "Unbranded", "Tasty", "Modern", "Recycled", "Luxurious",
];

const MATERIALS: &[&str] = &[
    "Steel", "Wooden", "Concrete", "Plastic", "Cotton", "Granite", "Rubber", "Metal", "Soft",
    "Fresh", "Frozen", "Bronze", "Marble", "Wool",
];

const NOUNS: &[&str] = &[
    "Chair", "Car", "Computer", "Keyboard", "Mouse", "Bike", "Ball", "Gloves", "Pants",
    "Shirt", "Table", "Shoes", "Hat", "Towels", "Soap", "Tuna", "Chicken", "Fish", "Cheese",
    "Bacon", "Pizza", "Salad", "Sausages", "Chips",
];

const DESCRIPTIONS: &[&str] = &[
    "Ergonomic executive chair upholstered in bonded black leather and PVC padded seat and back for all-day comfort and support",
    "The automobile layout consists of a front-engine design, with transaxle-type transmissions mounted at the rear of the engine and four wheel drive",
    "New ABC 13 9370, 13.3, 5th Gen CoreA5-8250U, 8GB RAM, 256GB SSD, power UHD Graphics, OS 10 Home, OS Office A & J 2016",
    "The slim & simple Maple Gaming Keyboard from Dev Byte comes with a sleek body and 7- Color RGB LED Back-lighting for smart functionality",
    "The Apollotech B340 is an affordable wireless mouse with reliable connectivity, 12 months battery life and modern design",
    "The Nagasaki Lander is the trademarked name of several series of Nagasaki sport bikes, that started with the 1984 ABC800J",
    "The Football Is Good For Training And Recreational Purposes",
    "Carbonite web goalkeeper gloves are ergonomically designed to give easy fit",
    "Boston's most advanced compression wear technology increases muscle oxygenation, stabilizes active muscles",
    "New range of formal shirts are designed keeping you in mind. With fits and styling that will make you stand apart",
    "The beautiful range of Apple Naturalé that has an exciting mix of natural ingredients. With the Goodness of 100% Natural Ingredients",
    "Andy shoes are designed to keeping in mind durability as well as trends, the most stylish range of shoes & sandals",
];

/// Seeding configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedConfig {
    /// Number of products to generate at startup (0 disables seeding)
    pub count: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_SEED_COUNT,
        }
    }
}

impl FromEnv for SeedConfig {
    /// - SEED_COUNT: defaults to 50
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            count: env_parse_or("SEED_COUNT", DEFAULT_SEED_COUNT)?,
        })
    }
}

/// What a seeding run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeedReport {
    pub inserted: usize,
    pub duplicates: usize,
}

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, items: &[&'a str]) -> &'a str {
    items.choose(rng).copied().unwrap_or_default()
}

/// Generate one commerce-style product: a three-word name, a blurb and a
/// price between 10.00 and 1000.00 with two decimal places.
pub fn generate_product<R: Rng + ?Sized>(rng: &mut R) -> Product {
    let name = format!(
        "{} {} {}",
        pick(rng, ADJECTIVES),
        pick(rng, MATERIALS),
        pick(rng, NOUNS)
    );
    let cents: i64 = rng.random_range(1_000..=100_000);

    Product {
        id: uuid::Builder::from_random_bytes(rng.random()).into_uuid(),
        name,
        description: pick(rng, DESCRIPTIONS).to_string(),
        price: Decimal::new(cents, 2),
    }
}

/// Generate `count` products without touching any repository.
pub fn generate_products<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<Product> {
    (0..count).map(|_| generate_product(rng)).collect()
}

/// Add `products` through the repository, skipping ids that already exist.
pub async fn seed_products<R: ProductRepository + ?Sized>(
    repository: &R,
    products: Vec<Product>,
) -> ProductResult<SeedReport> {
    let mut report = SeedReport::default();

    for product in products {
        let id: Uuid = product.id;
        match repository.add(product).await {
            Ok(()) => report.inserted += 1,
            Err(ProductError::Conflict(_)) => {
                tracing::warn!(product_id = %id, "Skipped seeded product with duplicate id");
                report.duplicates += 1;
            }
            Err(e) => return Err(e),
        }
    }

    CatalogMetrics::record_seeded(report.inserted, report.duplicates);
    tracing::info!(
        inserted = report.inserted,
        duplicates = report.duplicates,
        "Seeded product catalog"
    );
    Ok(report)
}

/// Fill the repository with `config.count` random products.
pub async fn seed_catalog<R: ProductRepository + ?Sized>(
    repository: &R,
    config: &SeedConfig,
) -> ProductResult<SeedReport> {
    // ThreadRng is not Send; generate before the first await.
    let products = generate_products(&mut rand::rng(), config.count);
    seed_products(repository, products).await
}
