//! Book model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Book record as stored in the `books` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    /// Assigned by storage on creation, never reused
    pub id: i64,
    pub title: String,
    pub author: String,
    /// Publication year
    pub year: Option<i32>,
    pub genre: Option<String>,
}

/// Create or replace book request
///
/// Updates are full replacements, so the same payload serves both
/// `POST /books` and `PUT /books/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate, ToSchema)]
pub struct BookInput {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,
    #[validate(length(min = 1, max = 100, message = "Author must be 1-100 characters"))]
    pub author: String,
    #[validate(range(min = 1000, max = 9999, message = "Year must be between 1000 and 9999"))]
    #[serde(default)]
    pub year: Option<i32>,
    #[validate(length(max = 50, message = "Genre must be at most 50 characters"))]
    #[serde(default)]
    pub genre: Option<String>,
}

impl Book {
    /// Does this record carry exactly the fields of `input`?
    pub fn matches(&self, input: &BookInput) -> bool {
        self.title == input.title
            && self.author == input.author
            && self.year == input.year
            && self.genre == input.genre
    }
}
