//! Book instance (loanable physical copy) model and the renewal form

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::ValidationErrors;

use super::{book::book_url, field_error};
use crate::error::{AppError, AppResult};

/// Copy availability. Stored as a one letter code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum LoanStatus {
    Maintenance,
    OnLoan,
    Available,
    Reserved,
}

impl LoanStatus {
    pub fn code(&self) -> &'static str {
        match self {
            LoanStatus::Maintenance => "m",
            LoanStatus::OnLoan => "o",
            LoanStatus::Available => "a",
            LoanStatus::Reserved => "r",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LoanStatus::Maintenance => "Maintenance",
            LoanStatus::OnLoan => "On loan",
            LoanStatus::Available => "Available",
            LoanStatus::Reserved => "Reserved",
        }
    }
}

impl Default for LoanStatus {
    fn default() -> Self {
        LoanStatus::Maintenance
    }
}

impl std::fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for LoanStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "m" => Ok(LoanStatus::Maintenance),
            "o" => Ok(LoanStatus::OnLoan),
            "a" => Ok(LoanStatus::Available),
            "r" => Ok(LoanStatus::Reserved),
            _ => Err(format!("Invalid loan status code: {}", s)),
        }
    }
}

// SQLx conversion for LoanStatus (TEXT column holding the code)
impl sqlx::Type<Postgres> for LoanStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<Postgres>>::compatible(ty)
    }
}

impl<'r> Decode<'r, Postgres> for LoanStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for LoanStatus {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        <&str as Encode<Postgres>>::encode(self.code(), buf)
    }
}

/// Book instance from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BookInstance {
    pub id: Uuid,
    pub book_id: Option<i32>,
    pub imprint: String,
    /// None when the copy is not on loan
    pub due_back: Option<NaiveDate>,
    pub status: LoanStatus,
    pub borrower_id: Option<i32>,
}

impl BookInstance {
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        is_overdue(self.due_back, today)
    }

    /// Only a copy on loan has a due date to move
    pub fn ensure_renewable(&self) -> AppResult<()> {
        match self.status {
            LoanStatus::OnLoan => Ok(()),
            status => Err(AppError::Conflict(format!(
                "Book instance {} cannot be renewed: status is {}",
                self.id, status
            ))),
        }
    }

    /// Available copies carry no loan data, copies on loan carry both due date and borrower
    pub fn is_consistent(&self) -> bool {
        match self.status {
            LoanStatus::Available => self.due_back.is_none() && self.borrower_id.is_none(),
            LoanStatus::OnLoan => self.due_back.is_some() && self.borrower_id.is_some(),
            LoanStatus::Maintenance | LoanStatus::Reserved => true,
        }
    }
}

fn is_overdue(due_back: Option<NaiveDate>, today: NaiveDate) -> bool {
    due_back.map(|d| d < today).unwrap_or(false)
}

/// Copy as listed on a book page
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookInstanceResponse {
    pub id: Uuid,
    pub book_id: Option<i32>,
    pub imprint: String,
    pub due_back: Option<NaiveDate>,
    pub status: LoanStatus,
    pub is_overdue: bool,
}

impl BookInstanceResponse {
    pub fn new(copy: BookInstance, today: NaiveDate) -> Self {
        Self {
            is_overdue: copy.is_overdue(today),
            id: copy.id,
            book_id: copy.book_id,
            imprint: copy.imprint,
            due_back: copy.due_back,
            status: copy.status,
        }
    }
}

/// Row shape of borrowed-copy queries (copy joined with book and borrower)
#[derive(Debug, Clone, FromRow)]
pub struct LoanedCopyRow {
    pub id: Uuid,
    pub book_id: Option<i32>,
    pub title: Option<String>,
    pub imprint: String,
    pub due_back: Option<NaiveDate>,
    pub status: LoanStatus,
    pub borrower_id: Option<i32>,
    pub borrower_username: Option<String>,
}

/// Borrowed copy as listed on the borrowed pages
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoanedCopy {
    pub id: Uuid,
    pub book_id: Option<i32>,
    pub book_url: Option<String>,
    pub title: Option<String>,
    pub imprint: String,
    pub due_back: Option<NaiveDate>,
    pub status: LoanStatus,
    pub borrower_id: Option<i32>,
    pub borrower: Option<String>,
    pub is_overdue: bool,
}

impl LoanedCopy {
    pub fn from_row(row: LoanedCopyRow, today: NaiveDate) -> Self {
        Self {
            is_overdue: is_overdue(row.due_back, today),
            book_url: row.book_id.map(book_url),
            id: row.id,
            book_id: row.book_id,
            title: row.title,
            imprint: row.imprint,
            due_back: row.due_back,
            status: row.status,
            borrower_id: row.borrower_id,
            borrower: row.borrower_username,
        }
    }
}

/// Date proposed on the renewal form
pub const RENEWAL_PROPOSED_WEEKS: i64 = 3;
/// Latest accepted renewal date, counted from today
pub const RENEWAL_MAX_WEEKS: i64 = 4;

pub fn proposed_renewal_date(today: NaiveDate) -> NaiveDate {
    today + Duration::weeks(RENEWAL_PROPOSED_WEEKS)
}

/// Submitted renewal form
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RenewBookForm {
    /// Renewal date (YYYY-MM-DD), between tomorrow and four weeks from today
    #[serde(default)]
    pub renewal_date: String,
}

impl RenewBookForm {
    /// Form pre-filled with the proposed date
    pub fn initial(today: NaiveDate) -> Self {
        Self {
            renewal_date: proposed_renewal_date(today).format("%Y-%m-%d").to_string(),
        }
    }

    /// Parse and bound-check the renewal date against `today`
    pub fn clean(&self, today: NaiveDate) -> Result<NaiveDate, ValidationErrors> {
        let raw = self.renewal_date.trim();
        if raw.is_empty() {
            return Err(field_error("renewal_date", "required", "This field is required."));
        }

        let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|_| field_error("renewal_date", "invalid", "Enter a valid date."))?;

        if date <= today {
            return Err(field_error(
                "renewal_date",
                "renewal_in_past",
                "Invalid date - renewal in past",
            ));
        }
        if date > today + Duration::weeks(RENEWAL_MAX_WEEKS) {
            return Err(field_error(
                "renewal_date",
                "renewal_too_far",
                "Invalid date - renewal more than 4 weeks ahead",
            ));
        }

        Ok(date)
    }
}

/// Renewal page: the copy and the form
#[derive(Debug, Serialize, ToSchema)]
pub struct RenewalContext {
    pub book_instance: BookInstanceResponse,
    pub form: RenewBookForm,
}
