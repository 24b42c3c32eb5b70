//! Author model and related types

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::{book::BookShort, find_field, FieldMeta};

/// Full author model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Author {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl Author {
    pub const FIELDS: &'static [FieldMeta] = &[
        FieldMeta::new("first_name", "first name", Some(100)),
        FieldMeta::new("last_name", "last name", Some(100)),
        FieldMeta::new("date_of_birth", "date of birth", None),
        FieldMeta::new("date_of_death", "Dead", None),
    ];

    pub fn field(name: &str) -> Option<&'static FieldMeta> {
        find_field(Self::FIELDS, name)
    }

    /// Canonical detail page of this author
    pub fn get_absolute_url(&self) -> String {
        format!("/author/{}", self.id)
    }
}

/// "last, first"
impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.last_name, self.first_name)
    }
}

/// Author as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthorResponse {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
    /// Display name ("last, first")
    pub name: String,
    pub url: String,
}

impl From<Author> for AuthorResponse {
    fn from(author: Author) -> Self {
        Self {
            name: author.to_string(),
            url: author.get_absolute_url(),
            id: author.id,
            first_name: author.first_name,
            last_name: author.last_name,
            date_of_birth: author.date_of_birth,
            date_of_death: author.date_of_death,
        }
    }
}

/// Short author reference embedded in book payloads
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthorShort {
    pub id: i32,
    pub name: String,
    pub url: String,
}

impl From<&Author> for AuthorShort {
    fn from(author: &Author) -> Self {
        Self {
            id: author.id,
            name: author.to_string(),
            url: author.get_absolute_url(),
        }
    }
}

/// Author page: the author and their books
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthorDetail {
    pub author: AuthorResponse,
    pub books: Vec<BookShort>,
}

/// Create/update author form
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct AuthorForm {
    #[validate(length(min = 1, max = 100, message = "Enter between 1 and 100 characters"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100, message = "Enter between 1 and 100 characters"))]
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl From<Author> for AuthorForm {
    fn from(author: Author) -> Self {
        Self {
            first_name: author.first_name,
            last_name: author.last_name,
            date_of_birth: author.date_of_birth,
            date_of_death: author.date_of_death,
        }
    }
}
