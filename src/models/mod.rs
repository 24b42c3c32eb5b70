//! Data models for the Local Library catalog

pub mod author;
pub mod book;
pub mod book_instance;
pub mod genre;
pub mod language;
pub mod pagination;
pub mod user;

use std::borrow::Cow;

use validator::{ValidationError, ValidationErrors};

// Re-export commonly used types
pub use author::{Author, AuthorForm};
pub use book::{Book, BookForm, BookShort};
pub use book_instance::{BookInstance, LoanStatus, RenewBookForm};
pub use genre::Genre;
pub use language::Language;
pub use pagination::{Page, PageQuery, PageWindow};
pub use user::{Permission, User, UserClaims};

/// Declared metadata of a model field (verbose label, length limit)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMeta {
    pub name: &'static str,
    pub label: &'static str,
    pub max_length: Option<usize>,
}

impl FieldMeta {
    pub const fn new(name: &'static str, label: &'static str, max_length: Option<usize>) -> Self {
        Self { name, label, max_length }
    }
}

/// Look up a field by name in a model's field table
pub fn find_field(fields: &'static [FieldMeta], name: &str) -> Option<&'static FieldMeta> {
    fields.iter().find(|f| f.name == name)
}

/// Build a single-field validation error with a human readable message
pub fn field_error(field: &'static str, code: &'static str, message: &'static str) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    add_field_error(&mut errors, field, code, message);
    errors
}

pub fn add_field_error(
    errors: &mut ValidationErrors,
    field: &'static str,
    code: &'static str,
    message: &'static str,
) {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::from(message));
    errors.add(field, error);
}
