use std::fmt;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A book on the reading list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Identifier taken from the request path
    pub id: i64,
    /// Instant the record was built; never changed afterwards
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub title: String,
    /// Publication year
    pub published: i32,
    pub pages: i32,
    /// Genre tags in display order
    pub genres: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    /// Optimistic concurrency counter
    pub version: i32,
}

/// Request model for adding a book. Missing fields decode to zero values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateBook {
    pub title: String,
    pub published: i32,
    pub pages: i32,
    pub genres: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
}

/// Partial update payload. `None` means "leave the stored value alone".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateBook {
    pub title: Option<String>,
    pub published: Option<i32>,
    pub pages: Option<i32>,
    pub genres: Option<Vec<String>>,
    pub rating: Option<f64>,
}

/// Apply `patch` on top of `base`.
///
/// Scalars are replaced whenever the patch carries a value, zero included.
/// `genres` is only replaced by a non-empty list, so `[]` cannot clear it.
pub fn merge(mut base: Book, patch: UpdateBook) -> Book {
    if let Some(title) = patch.title {
        base.title = title;
    }
    if let Some(published) = patch.published {
        base.published = published;
    }
    if let Some(pages) = patch.pages {
        base.pages = pages;
    }
    if let Some(genres) = patch.genres.filter(|genres| !genres.is_empty()) {
        base.genres = genres;
    }
    if let Some(rating) = patch.rating {
        base.rating = Some(rating);
    }
    base
}

struct Genres<'a>(&'a [String]);

impl fmt::Display for Genres<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.join(", "))
    }
}

struct Rating(Option<f64>);

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(rating) => write!(f, "{rating}"),
            None => f.write_str("none"),
        }
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "id={} title={:?} published={} pages={} genres={} rating={} version={}",
            self.id,
            self.title,
            self.published,
            self.pages,
            Genres(&self.genres),
            Rating(self.rating),
            self.version
        )
    }
}

impl fmt::Display for CreateBook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "title={:?} published={} pages={} genres={} rating={}",
            self.title,
            self.published,
            self.pages,
            Genres(&self.genres),
            Rating(self.rating)
        )
    }
}
