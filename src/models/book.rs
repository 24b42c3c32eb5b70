//! Book (catalog title) model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::{
    author::AuthorShort, book_instance::BookInstanceResponse, find_field, genre::Genre,
    language::Language, FieldMeta,
};

/// Book model from database. A title, not a physical copy.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub summary: String,
    pub isbn: String,
    pub author_id: Option<i32>,
    pub language_id: Option<i32>,
}

impl Book {
    pub const FIELDS: &'static [FieldMeta] = &[
        FieldMeta::new("title", "title", Some(200)),
        FieldMeta::new("author", "author", None),
        FieldMeta::new("summary", "summary", Some(1000)),
        FieldMeta::new("isbn", "ISBN", Some(13)),
        FieldMeta::new("genre", "genre", None),
        FieldMeta::new("language", "language", None),
    ];

    pub fn field(name: &str) -> Option<&'static FieldMeta> {
        find_field(Self::FIELDS, name)
    }

    pub fn get_absolute_url(&self) -> String {
        book_url(self.id)
    }
}

pub fn book_url(id: i32) -> String {
    format!("/book/{}", id)
}

/// Names of the first three genres, comma separated
pub fn display_genre(genres: &[Genre]) -> String {
    genres
        .iter()
        .take(3)
        .map(|g| g.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Row shape of book list queries (book joined with its author)
#[derive(Debug, Clone, FromRow)]
pub struct BookShortRow {
    pub id: i32,
    pub title: String,
    pub author_id: Option<i32>,
    pub author_first_name: Option<String>,
    pub author_last_name: Option<String>,
}

impl From<BookShortRow> for BookShort {
    fn from(row: BookShortRow) -> Self {
        let author = match (row.author_id, row.author_last_name, row.author_first_name) {
            (Some(id), Some(last), Some(first)) => Some(AuthorShort {
                id,
                name: format!("{}, {}", last, first),
                url: format!("/author/{}", id),
            }),
            _ => None,
        };
        BookShort {
            url: book_url(row.id),
            id: row.id,
            title: row.title,
            author,
        }
    }
}

/// Short book representation for lists
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookShort {
    pub id: i32,
    pub title: String,
    pub author: Option<AuthorShort>,
    pub url: String,
}

/// Book page: the title, its classification and every copy
#[derive(Debug, Serialize, ToSchema)]
pub struct BookDetail {
    pub id: i32,
    pub title: String,
    pub summary: String,
    pub isbn: String,
    pub url: String,
    pub author: Option<AuthorShort>,
    pub genres: Vec<Genre>,
    pub display_genre: String,
    pub language: Option<Language>,
    pub copies: Vec<BookInstanceResponse>,
}

/// Create/update book form
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct BookForm {
    #[validate(length(min = 1, max = 200, message = "Enter between 1 and 200 characters"))]
    pub title: String,
    /// Author id
    pub author: Option<i32>,
    #[validate(length(min = 1, max = 1000, message = "Enter between 1 and 1000 characters"))]
    pub summary: String,
    #[validate(length(min = 1, max = 13, message = "Enter a 13 character ISBN"))]
    pub isbn: String,
    /// Genre ids
    #[validate(length(min = 1, message = "Select at least one genre"))]
    pub genre: Vec<i32>,
    /// Language id
    pub language: Option<i32>,
}

impl BookForm {
    /// Pre-fill the form from a stored book and its genre ids
    pub fn from_book(book: Book, genre: Vec<i32>) -> Self {
        Self {
            title: book.title,
            author: book.author_id,
            summary: book.summary,
            isbn: book.isbn,
            genre,
            language: book.language_id,
        }
    }
}

/// Book form plus the choices its select fields offer
#[derive(Debug, Serialize, ToSchema)]
pub struct BookFormContext {
    pub form: BookForm,
    pub authors: Vec<AuthorShort>,
    pub genres: Vec<Genre>,
    pub languages: Vec<Language>,
}
