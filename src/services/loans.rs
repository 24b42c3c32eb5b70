//! Lending service: renewals and borrowed-copy listings

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        book_instance::{BookInstance, BookInstanceResponse, LoanedCopy, RenewBookForm, RenewalContext},
        Page, PageQuery, PageWindow,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct LoansService {
    repository: Repository,
}

impl LoansService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Renewal form for a copy, proposing three weeks from today
    pub async fn renewal_form(&self, id: Uuid, today: NaiveDate) -> AppResult<RenewalContext> {
        let copy = self.repository.book_instances.get_by_id(id).await?;
        Ok(RenewalContext {
            book_instance: BookInstanceResponse::new(copy, today),
            form: RenewBookForm::initial(today),
        })
    }

    /// Move the due date of a copy on loan. Only `due_back` changes.
    pub async fn renew(&self, id: Uuid, form: &RenewBookForm, today: NaiveDate) -> AppResult<BookInstance> {
        let current = self.repository.book_instances.get_by_id(id).await?;

        let renewal_date = form.clean(today).map_err(|errors| {
            tracing::warn!("Renewal of {} rejected: {:?}", id, form.renewal_date);
            AppError::Form(errors)
        })?;
        current.ensure_renewable()?;

        let copy = self
            .repository
            .book_instances
            .set_due_back(id, renewal_date)
            .await?
            .ok_or_else(|| AppError::Conflict(format!("Book instance {} is no longer on loan", id)))?;
        tracing::info!("Book instance {} renewed until {}", id, renewal_date);
        Ok(copy)
    }

    /// Copies on loan to `borrower_id`, soonest due first
    pub async fn borrowed_by(
        &self,
        borrower_id: i32,
        query: &PageQuery,
        per_page: i64,
        today: NaiveDate,
    ) -> AppResult<Page<LoanedCopy>> {
        self.list_on_loan(Some(borrower_id), query, per_page, today).await
    }

    /// Every copy on loan, soonest due first
    pub async fn all_borrowed(
        &self,
        query: &PageQuery,
        per_page: i64,
        today: NaiveDate,
    ) -> AppResult<Page<LoanedCopy>> {
        self.list_on_loan(None, query, per_page, today).await
    }

    async fn list_on_loan(
        &self,
        borrower_id: Option<i32>,
        query: &PageQuery,
        per_page: i64,
        today: NaiveDate,
    ) -> AppResult<Page<LoanedCopy>> {
        let total = self.repository.book_instances.count_on_loan(borrower_id).await?;
        let window = PageWindow::resolve(query, total, per_page)?;
        let copies = self
            .repository
            .book_instances
            .list_on_loan(borrower_id, window.limit(), window.offset())
            .await?
            .into_iter()
            .map(|row| LoanedCopy::from_row(row, today))
            .collect();
        Ok(Page::new(copies, window))
    }
}
