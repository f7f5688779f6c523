use anyhow::Result;
use rand::SeedableRng;
use rand::rngs::StdRng;

use lookbook::attributes::parse_attributes;
use lookbook::catalog::{
    Catalog, FALLBACK_SAMPLE_SIZE, InMemoryCatalog, ProductFilter, search_products,
};
use lookbook::data_models::{Product, SearchResult};

mod test_helpers {
    use super::*;

    pub fn product(name: &str, category: &str, individual: &str, colour: &str) -> Product {
        Product::new(SearchResult::new(name, 10.0, 4.0, 3, format!("/img/{name}.png")))
            .with_category(category)
            .with_individual_category(individual)
            .with_colour(colour)
            .with_gender("Women")
    }

    pub fn catalog() -> Vec<Product> {
        vec![
            product("black jeans 1", "Western", "jeans", "Black"),
            product("blue jeans", "Western", "jeans", "Blue"),
            product("black top", "Western", "tops", "Black"),
            product("black jeans 2", "Western", "jeans", "Black"),
            product("red kurta", "Indian Wear", "kurtas", "Red"),
        ]
    }

    pub fn many(count: usize) -> Vec<Product> {
        (0..count)
            .map(|i| product(&format!("item {i}"), "Western", "tops", "White"))
            .collect()
    }

    pub fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    pub fn names(results: &[SearchResult]) -> Vec<&str> {
        results.iter().map(|r| r.name.as_str()).collect()
    }
}

use test_helpers::*;

#[test]
fn test_matches_all_active_filters_in_catalog_order() {
    let filter = ProductFilter {
        colour: Some("Black".into()),
        individual_category: Some("jeans".into()),
        category: Some("Western".into()),
        category_by_gender: None,
    };
    let results = search_products(&catalog(), &filter, &mut rng());
    assert_eq!(names(&results), ["black jeans 1", "black jeans 2"]);
}

#[test]
fn test_single_filter() {
    let filter = ProductFilter {
        colour: Some("Black".into()),
        ..ProductFilter::default()
    };
    let results = search_products(&catalog(), &filter, &mut rng());
    assert_eq!(names(&results), ["black jeans 1", "black top", "black jeans 2"]);
}

#[test]
fn test_matches_are_not_capped() {
    let filter = ProductFilter {
        colour: Some("White".into()),
        ..ProductFilter::default()
    };
    let results = search_products(&many(25), &filter, &mut rng());
    assert_eq!(results.len(), 25);
}

#[test]
fn test_no_filter_samples_up_to_ten() {
    let results = search_products(&many(25), &ProductFilter::default(), &mut rng());
    assert_eq!(results.len(), FALLBACK_SAMPLE_SIZE);

    let results = search_products(&catalog(), &ProductFilter::default(), &mut rng());
    assert_eq!(results.len(), 5);
}

#[test]
fn test_no_match_falls_back_to_sample() {
    let filter = ProductFilter {
        colour: Some("Gold".into()),
        ..ProductFilter::default()
    };
    let catalog = many(12);
    let results = search_products(&catalog, &filter, &mut rng());
    assert_eq!(results.len(), FALLBACK_SAMPLE_SIZE);
    for result in &results {
        assert!(catalog.iter().any(|p| p.listing == *result));
    }
}

#[test]
fn test_empty_catalog_returns_nothing() {
    let filter = ProductFilter {
        colour: Some("Black".into()),
        ..ProductFilter::default()
    };
    assert!(search_products(&[], &filter, &mut rng()).is_empty());
    assert!(search_products(&[], &ProductFilter::default(), &mut rng()).is_empty());
}

#[test]
fn test_filter_from_attributes_skips_placeholders_and_gender() {
    let attributes = parse_attributes(
        "Category: Western\nIndividual_category: NA\ncategory_by_Gender: Women\ncolour: Black",
    );
    let filter = ProductFilter::from_attributes(&attributes);
    assert_eq!(filter.category.as_deref(), Some("Western"));
    assert_eq!(filter.individual_category, None);
    assert_eq!(filter.colour.as_deref(), Some("Black"));
    assert_eq!(filter.category_by_gender, None);
}

#[test]
fn test_products_without_attribute_never_match_that_filter() {
    let bare = Product::new(SearchResult::new("plain", 1.0, 1.0, 1, "/p.png"));
    let filter = ProductFilter {
        category: Some("Western".into()),
        ..ProductFilter::default()
    };
    assert!(!filter.matches(&bare));
    assert!(ProductFilter::default().matches(&bare));
}

#[tokio::test]
async fn test_in_memory_catalog_returns_everything() -> Result<()> {
    let catalog = InMemoryCatalog::new(catalog());
    let products = catalog.products().await?;
    assert_eq!(products.len(), 5);
    assert_eq!(products[4].listing.name, "red kurta");
    Ok(())
}

#[test]
fn test_product_json_uses_catalog_field_names() -> Result<()> {
    let json = r#"{
        "name": "Black Jeans",
        "price": 24.5,
        "avg_rating": 4.1,
        "ratingCount": 12,
        "img": "/img/jeans.png",
        "Category": "Western",
        "Individual_category": "jeans",
        "category_by_Gender": "Women",
        "colour": "Black"
    }"#;
    let product: Product = serde_json::from_str(json)?;
    assert_eq!(product.id, None);
    assert_eq!(product.listing.rating_count, 12);
    assert_eq!(product.individual_category.as_deref(), Some("jeans"));
    assert_eq!(product.category_by_gender.as_deref(), Some("Women"));
    Ok(())
}
