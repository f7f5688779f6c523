use mongodb::bson::oid::ObjectId;
use serde::de::{self, Deserializer, Unexpected, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One result record as it travels over `/search` and lands on a card.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub name: String,
    pub price: f64,
    pub avg_rating: f64,
    #[serde(rename = "ratingCount", deserialize_with = "deserialize_count")]
    pub rating_count: u64,
    pub img: String,
}

/// Accepts whole numbers however they were encoded; catalogs exported from
/// dataframes store counts as `10.0`.
fn deserialize_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    struct CountVisitor;

    impl<'de> Visitor<'de> for CountVisitor {
        type Value = u64;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a non-negative whole number")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<u64, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<u64, E> {
            u64::try_from(v).map_err(|_| E::invalid_value(Unexpected::Signed(v), &self))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<u64, E> {
            if v >= 0.0 && v.fract() == 0.0 && v < u64::MAX as f64 {
                Ok(v as u64)
            } else {
                Err(E::invalid_value(Unexpected::Float(v), &self))
            }
        }
    }

    deserializer.deserialize_any(CountVisitor)
}

impl SearchResult {
    pub fn new(
        name: impl Into<String>,
        price: f64,
        avg_rating: f64,
        rating_count: u64,
        img: impl Into<String>,
    ) -> SearchResult {
        SearchResult {
            name: name.into(),
            price,
            avg_rating,
            rating_count,
            img: img.into(),
        }
    }
}

/// A catalog record: the card fields plus the attributes the backend filters on.
/// Field names follow the catalog's stored payloads.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Product {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    #[serde(flatten)]
    pub listing: SearchResult,

    #[serde(rename = "Category", default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(
        rename = "Individual_category",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub individual_category: Option<String>,
    #[serde(
        rename = "category_by_Gender",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub category_by_gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colour: Option<String>,
}

impl Product {
    pub fn new(listing: SearchResult) -> Product {
        Product {
            id: None,
            listing,
            category: None,
            individual_category: None,
            category_by_gender: None,
            colour: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_individual_category(mut self, individual_category: impl Into<String>) -> Self {
        self.individual_category = Some(individual_category.into());
        self
    }

    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.category_by_gender = Some(gender.into());
        self
    }

    pub fn with_colour(mut self, colour: impl Into<String>) -> Self {
        self.colour = Some(colour.into());
        self
    }
}

#[test]
fn test_rating_count_accepts_whole_floats() {
    let result: SearchResult = serde_json::from_str(
        r#"{"name":"a","price":1,"avg_rating":4.5,"ratingCount":10.0,"img":"/a.png"}"#,
    )
    .unwrap();
    assert_eq!(result.rating_count, 10);

    for bad in ["10.5", "-1", "\"ten\""] {
        let json = format!(
            r#"{{"name":"a","price":1,"avg_rating":4.5,"ratingCount":{bad},"img":"/a.png"}}"#
        );
        assert!(serde_json::from_str::<SearchResult>(&json).is_err(), "{bad}");
    }
}
