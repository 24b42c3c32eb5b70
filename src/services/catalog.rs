//! Catalog management service: books, authors and the home page counts

use chrono::NaiveDate;
use serde::Serialize;
use validator::{Validate, ValidationErrors};

use crate::{
    error::{AppError, AppResult},
    models::{
        add_field_error,
        author::{Author, AuthorDetail, AuthorForm, AuthorResponse, AuthorShort},
        book::{display_genre, Book, BookDetail, BookForm, BookFormContext, BookShort},
        book_instance::{BookInstanceResponse, LoanStatus},
        Page, PageQuery, PageWindow,
    },
    repository::Repository,
};

/// Catalog-wide counts shown on the home page
#[derive(Debug, Clone, Serialize)]
pub struct CatalogCounts {
    pub num_books: i64,
    pub num_instances: i64,
    pub num_instances_available: i64,
    pub num_authors: i64,
    pub num_genres: i64,
}

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn counts(&self) -> AppResult<CatalogCounts> {
        Ok(CatalogCounts {
            num_books: self.repository.books.count().await?,
            num_instances: self.repository.book_instances.count().await?,
            num_instances_available: self
                .repository
                .book_instances
                .count_by_status(LoanStatus::Available)
                .await?,
            num_authors: self.repository.authors.count().await?,
            num_genres: self.repository.genres.count().await?,
        })
    }

    // =========================================================================
    // BOOKS
    // =========================================================================

    pub async fn list_books(&self, query: &PageQuery, per_page: i64) -> AppResult<Page<BookShort>> {
        let total = self.repository.books.count().await?;
        let window = PageWindow::resolve(query, total, per_page)?;
        let books = self.repository.books.list(window.limit(), window.offset()).await?;
        Ok(Page::new(books, window))
    }

    pub async fn book_detail(&self, id: i32, today: NaiveDate) -> AppResult<BookDetail> {
        let book = self.repository.books.get_by_id(id).await?;

        let author = match book.author_id {
            Some(author_id) => Some(AuthorShort::from(
                &self.repository.authors.get_by_id(author_id).await?,
            )),
            None => None,
        };
        let language = match book.language_id {
            Some(language_id) => self.repository.languages.find(language_id).await?,
            None => None,
        };
        let genres = self.repository.genres.list_for_book(id).await?;
        let copies = self
            .repository
            .book_instances
            .list_for_book(id)
            .await?
            .into_iter()
            .map(|copy| BookInstanceResponse::new(copy, today))
            .collect();

        Ok(BookDetail {
            url: book.get_absolute_url(),
            display_genre: display_genre(&genres),
            id: book.id,
            title: book.title,
            summary: book.summary,
            isbn: book.isbn,
            author,
            genres,
            language,
            copies,
        })
    }

    /// Book form with its choices; pre-filled when `id` names an existing book
    pub async fn book_form(&self, id: Option<i32>) -> AppResult<BookFormContext> {
        let form = match id {
            Some(id) => {
                let book = self.repository.books.get_by_id(id).await?;
                let genre = self.repository.books.genre_ids(id).await?;
                BookForm::from_book(book, genre)
            }
            None => BookForm::default(),
        };

        let authors = self
            .repository
            .authors
            .list_all()
            .await?
            .iter()
            .map(AuthorShort::from)
            .collect();

        Ok(BookFormContext {
            form,
            authors,
            genres: self.repository.genres.list_all().await?,
            languages: self.repository.languages.list_all().await?,
        })
    }

    pub async fn create_book(&self, form: BookForm) -> AppResult<Book> {
        self.clean_book_form(&form, None).await?;
        let book = self.repository.books.create(&form).await?;
        tracing::info!("Book created: id={} title={:?}", book.id, book.title);
        Ok(book)
    }

    pub async fn update_book(&self, id: i32, form: BookForm) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await?;
        self.clean_book_form(&form, Some(id)).await?;
        let book = self.repository.books.update(id, &form).await?;
        tracing::info!("Book updated: id={}", book.id);
        Ok(book)
    }

    /// Field validation plus the checks that need the database
    async fn clean_book_form(&self, form: &BookForm, book_id: Option<i32>) -> AppResult<()> {
        let mut errors = match form.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };

        if let Some(author_id) = form.author {
            if !self.repository.authors.exists(author_id).await? {
                add_field_error(&mut errors, "author", "invalid_choice", "Select a valid choice.");
            }
        }

        if let Some(language_id) = form.language {
            if self.repository.languages.find(language_id).await?.is_none() {
                add_field_error(&mut errors, "language", "invalid_choice", "Select a valid choice.");
            }
        }

        if !form.genre.is_empty() {
            let found = self.repository.genres.existing_ids(&form.genre).await?;
            if form.genre.iter().any(|id| !found.contains(id)) {
                add_field_error(&mut errors, "genre", "invalid_choice", "Select a valid choice.");
            }
        }

        if !form.isbn.is_empty() && self.repository.books.isbn_taken(&form.isbn, book_id).await? {
            add_field_error(&mut errors, "isbn", "unique", "Book with this ISBN already exists.");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::Form(errors))
        }
    }

    // =========================================================================
    // AUTHORS
    // =========================================================================

    pub async fn list_authors(
        &self,
        query: &PageQuery,
        per_page: i64,
    ) -> AppResult<Page<AuthorResponse>> {
        let total = self.repository.authors.count().await?;
        let window = PageWindow::resolve(query, total, per_page)?;
        let authors = self
            .repository
            .authors
            .list(window.limit(), window.offset())
            .await?
            .into_iter()
            .map(AuthorResponse::from)
            .collect();
        Ok(Page::new(authors, window))
    }

    pub async fn get_author(&self, id: i32) -> AppResult<Author> {
        self.repository.authors.get_by_id(id).await
    }

    pub async fn author_detail(&self, id: i32) -> AppResult<AuthorDetail> {
        let author = self.repository.authors.get_by_id(id).await?;
        let books = self.repository.books.list_by_author(id).await?;
        Ok(AuthorDetail {
            author: AuthorResponse::from(author),
            books,
        })
    }

    pub async fn create_author(&self, form: AuthorForm) -> AppResult<Author> {
        form.validate()?;
        let author = self.repository.authors.create(&form).await?;
        tracing::info!("Author created: id={} name={:?}", author.id, author.to_string());
        Ok(author)
    }

    pub async fn update_author(&self, id: i32, form: AuthorForm) -> AppResult<Author> {
        self.repository.authors.get_by_id(id).await?;
        form.validate()?;
        let author = self.repository.authors.update(id, &form).await?;
        tracing::info!("Author updated: id={}", author.id);
        Ok(author)
    }

    /// Delete an author; refused while books still reference them
    pub async fn delete_author(&self, id: i32) -> AppResult<()> {
        let author = self.repository.authors.get_by_id(id).await?;

        let nb_books = self.repository.books.count_by_author(id).await?;
        if nb_books > 0 {
            return Err(AppError::Conflict(format!(
                "Author {} still has {} book(s)",
                author, nb_books
            )));
        }

        self.repository.authors.delete(id).await?;
        tracing::info!("Author deleted: id={}", id);
        Ok(())
    }
}
