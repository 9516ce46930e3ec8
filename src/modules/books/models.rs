use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A book in the catalogue.
///
/// `title` and `author` are the documented payload fields; any other members
/// of the JSON object are kept verbatim in `extra` and echoed back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Book {
    /// Server-assigned identifier; zero until the book is stored
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: i64,
    /// Title of the book
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// Author of the book
    #[serde(default, deserialize_with = "null_as_default")]
    pub author: String,
    /// Client-supplied fields without a dedicated member
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Book {
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            id: 0,
            title: title.into(),
            author: author.into(),
            extra: Map::new(),
        }
    }
}

/// JSON `null` decodes to the field's zero value, same as an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_fields_take_defaults() {
        let book: Book = serde_json::from_value(json!({})).unwrap();
        assert_eq!(book, Book::default());
    }

    #[test]
    fn null_fields_take_defaults() {
        let book: Book = serde_json::from_value(json!({
            "id": null,
            "title": null,
            "author": "Frank Herbert"
        }))
        .unwrap();

        assert_eq!(book, Book::new("", "Frank Herbert"));
    }

    #[test]
    fn unknown_fields_are_echoed_back() {
        let book: Book = serde_json::from_value(json!({
            "title": "Dune",
            "author": "Frank Herbert",
            "year": 1965,
            "tags": ["sf"]
        }))
        .unwrap();

        assert_eq!(book.extra["year"], json!(1965));
        assert_eq!(
            serde_json::to_value(&book).unwrap(),
            json!({
                "id": 0,
                "title": "Dune",
                "author": "Frank Herbert",
                "year": 1965,
                "tags": ["sf"]
            })
        );
    }

    #[test]
    fn wrong_field_type_fails_to_decode() {
        let result = serde_json::from_value::<Book>(json!({"title": 7}));
        assert!(result.is_err());
    }
}
