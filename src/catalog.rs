use anyhow::Result;
use async_trait::async_trait;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::attributes::{ProductAttributes, known};
use crate::data_models::{Product, SearchResult};

/// How many products are sampled when no filter applies or nothing matches.
pub const FALLBACK_SAMPLE_SIZE: usize = 10;

/// Source of the full product list the search runs over.
#[async_trait]
pub trait Catalog: Send + Sync {
    async fn products(&self) -> Result<Vec<Product>>;
}

#[derive(Debug, Default, Clone)]
pub struct InMemoryCatalog {
    products: Vec<Product>,
}

impl InMemoryCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }
}

#[async_trait]
impl Catalog for InMemoryCatalog {
    async fn products(&self) -> Result<Vec<Product>> {
        Ok(self.products.clone())
    }
}

/// Exact-match constraints on catalog attributes. `None` means unconstrained.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProductFilter {
    pub colour: Option<String>,
    pub individual_category: Option<String>,
    pub category: Option<String>,
    pub category_by_gender: Option<String>,
}

impl ProductFilter {
    /// Only colour and the two category levels narrow the search; gender stays
    /// unconstrained.
    pub fn from_attributes(attributes: &ProductAttributes) -> Self {
        Self {
            colour: known(&attributes.colour).map(str::to_string),
            individual_category: known(&attributes.individual_category).map(str::to_string),
            category: known(&attributes.category).map(str::to_string),
            category_by_gender: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.colour.is_none()
            && self.individual_category.is_none()
            && self.category.is_none()
            && self.category_by_gender.is_none()
    }

    pub fn matches(&self, product: &Product) -> bool {
        fn field_matches(wanted: &Option<String>, actual: &Option<String>) -> bool {
            match wanted {
                Some(wanted) => actual.as_deref() == Some(wanted.as_str()),
                None => true,
            }
        }

        field_matches(&self.colour, &product.colour)
            && field_matches(&self.individual_category, &product.individual_category)
            && field_matches(&self.category, &product.category)
            && field_matches(&self.category_by_gender, &product.category_by_gender)
    }
}

fn sample<R: Rng + ?Sized>(products: &[Product], rng: &mut R) -> Vec<SearchResult> {
    products
        .choose_multiple(rng, FALLBACK_SAMPLE_SIZE.min(products.len()))
        .map(|p| p.listing.clone())
        .collect()
}

/// Runs `filter` over `products`.
///
/// Matches come back in catalog order. With no active filter, or when the
/// filter matches nothing, a random sample of up to [`FALLBACK_SAMPLE_SIZE`]
/// products is returned instead.
pub fn search_products<R: Rng + ?Sized>(
    products: &[Product],
    filter: &ProductFilter,
    rng: &mut R,
) -> Vec<SearchResult> {
    log::info!("searching {} products with filter {:?}", products.len(), filter);

    if filter.is_empty() {
        let results = sample(products, rng);
        log::info!("no filters applied, randomly selected {} products", results.len());
        return results;
    }

    let matched: Vec<SearchResult> = products
        .iter()
        .filter(|p| filter.matches(p))
        .map(|p| p.listing.clone())
        .collect();

    if matched.is_empty() {
        let results = sample(products, rng);
        log::info!(
            "no products matched the filters, randomly selected {} as fallback",
            results.len()
        );
        return results;
    }

    log::info!("{} products matched the filters", matched.len());
    matched
}
