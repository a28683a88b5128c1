use serde::{Deserialize, Serialize};

use crate::entities::movie;

pub const MAX_RATING: u8 = 5;

/// A movie as it travels over the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub release_year: Option<i32>,
    pub watch: bool,
    pub rating: Option<u8>,
}

impl From<movie::Model> for Movie {
    fn from(m: movie::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            description: m.description,
            release_year: m.release_year,
            watch: m.watch,
            rating: m.rating.and_then(|r| u8::try_from(r).ok()),
        }
    }
}

/// Body of `POST /movies`. `title` is optional here so that a missing title
/// is reported as a validation error instead of a body rejection.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMovie {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_year: Option<i32>,
    #[serde(default)]
    pub watch: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
}

/// Body of `PUT /movies/{id}`. An absent rating clears the stored one.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MovieUpdate {
    pub watch: bool,
    #[serde(default)]
    pub rating: Option<u8>,
}

/// Body of `PATCH /movies/{id}`; only the fields present are written.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoviePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watch: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
}

impl MoviePatch {
    pub fn watch(watch: bool) -> Self {
        Self { watch: Some(watch), rating: None }
    }

    pub fn rating(rating: u8) -> Self {
        Self { watch: None, rating: Some(rating) }
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movie_serializes_camel_case() {
        let movie = Movie {
            id: 7,
            title: "Alien".to_string(),
            description: None,
            release_year: Some(1979),
            watch: true,
            rating: Some(4),
        };
        let json = serde_json::to_value(&movie).unwrap();
        assert_eq!(json["releaseYear"], 1979);
        assert_eq!(json["description"], serde_json::Value::Null);
        assert_eq!(json["rating"], 4);
    }

    #[test]
    fn patch_omits_absent_fields() {
        let json = serde_json::to_string(&MoviePatch::rating(3)).unwrap();
        assert_eq!(json, r#"{"rating":3}"#);
    }

    #[test]
    fn new_movie_defaults_watch_to_false() {
        let new: NewMovie = serde_json::from_str(r#"{"title":"Heat"}"#).unwrap();
        assert!(!new.watch);
        assert_eq!(new.release_year, None);
    }
}
