use serde::{Deserialize, Serialize};

/// Placeholder the extraction prompt uses for "not known".
pub const NOT_AVAILABLE: &str = "NA";

/// Product attributes pulled out of the model's `Key: "value"` reply.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ProductAttributes {
    pub category: String,
    pub individual_category: String,
    pub category_by_gender: String,
    pub colour: String,
    pub move_on: bool,
    pub follow_up_message: String,
}

impl Default for ProductAttributes {
    fn default() -> Self {
        ProductAttributes {
            category: NOT_AVAILABLE.to_string(),
            individual_category: NOT_AVAILABLE.to_string(),
            category_by_gender: NOT_AVAILABLE.to_string(),
            colour: NOT_AVAILABLE.to_string(),
            move_on: false,
            follow_up_message: NOT_AVAILABLE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Category,
    IndividualCategory,
    CategoryByGender,
    Colour,
    MoveOn,
    FollowUpMessage,
}

impl Field {
    fn from_key(key: &str) -> Option<Field> {
        match key {
            "Category" => Some(Field::Category),
            "Individual_category" => Some(Field::IndividualCategory),
            "category_by_Gender" => Some(Field::CategoryByGender),
            "colour" => Some(Field::Colour),
            "MOVE_ON" => Some(Field::MoveOn),
            "FOLLOW_UP_MESSAGE" => Some(Field::FollowUpMessage),
            _ => None,
        }
    }
}

/// Raw field values; `MOVE_ON` stays textual until the end so continuation
/// lines can still be appended to it.
struct RawFields {
    values: [String; 6],
}

impl RawFields {
    fn new() -> Self {
        let mut values: [String; 6] = std::array::from_fn(|_| NOT_AVAILABLE.to_string());
        values[Field::MoveOn as usize] = "false".to_string();
        RawFields { values }
    }

    fn get_mut(&mut self, field: Field) -> &mut String {
        &mut self.values[field as usize]
    }

    fn take(&mut self, field: Field) -> String {
        std::mem::take(&mut self.values[field as usize])
    }
}

fn strip_quotes(value: &str) -> &str {
    value.trim_matches('"')
}

/// Parses the extractor's reply into [`ProductAttributes`].
///
/// Lines with a `:` assign to a known key and make it current; unknown keys are
/// ignored. Lines without a `:` continue the current key's value. Missing keys
/// keep their `NA` default, and `MOVE_ON` is true only for a literal `true`
/// (case-insensitive).
pub fn parse_attributes(response: &str) -> ProductAttributes {
    log::info!("parsing extractor response");

    let mut fields = RawFields::new();
    let mut current: Option<Field> = None;

    for line in response.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some((key, value)) = line.split_once(':') {
            if let Some(field) = Field::from_key(key.trim()) {
                *fields.get_mut(field) = strip_quotes(value.trim()).to_string();
                current = Some(field);
            }
        } else if let Some(field) = current {
            let slot = fields.get_mut(field);
            slot.push(' ');
            slot.push_str(strip_quotes(line));
        }
    }

    let attributes = ProductAttributes {
        category: fields.take(Field::Category),
        individual_category: fields.take(Field::IndividualCategory),
        category_by_gender: fields.take(Field::CategoryByGender),
        colour: fields.take(Field::Colour),
        move_on: fields.take(Field::MoveOn).to_lowercase() == "true",
        follow_up_message: fields.take(Field::FollowUpMessage),
    };

    log::debug!("parsed attributes: {:?}", attributes);
    attributes
}

/// `None` for the `NA` placeholder, otherwise the value.
pub fn known(value: &str) -> Option<&str> {
    if value == NOT_AVAILABLE {
        None
    } else {
        Some(value)
    }
}

#[test]
fn test_known_filters_placeholder() {
    assert_eq!(known("NA"), None);
    assert_eq!(known("Black"), Some("Black"));
    assert_eq!(known("na"), Some("na"));
}
