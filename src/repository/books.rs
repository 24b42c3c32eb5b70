//! Books repository

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookForm, BookShort, BookShortRow},
};

const BOOK_SHORT_SELECT: &str = r#"
    SELECT b.id, b.title, a.id AS author_id,
           a.first_name AS author_first_name, a.last_name AS author_last_name
    FROM books b
    LEFT JOIN authors a ON a.id = b.author_id
"#;

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn count(&self) -> AppResult<i64> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }

    /// One page of books with their author, in id order
    pub async fn list(&self, limit: i64, offset: i64) -> AppResult<Vec<BookShort>> {
        let query = format!("{} ORDER BY b.id LIMIT $1 OFFSET $2", BOOK_SHORT_SELECT);
        let rows = sqlx::query_as::<_, BookShortRow>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(BookShort::from).collect())
    }

    pub async fn list_by_author(&self, author_id: i32) -> AppResult<Vec<BookShort>> {
        let query = format!("{} WHERE b.author_id = $1 ORDER BY b.title, b.id", BOOK_SHORT_SELECT);
        let rows = sqlx::query_as::<_, BookShortRow>(&query)
            .bind(author_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(BookShort::from).collect())
    }

    pub async fn count_by_author(&self, author_id: i32) -> AppResult<i64> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books WHERE author_id = $1")
            .bind(author_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    pub async fn genre_ids(&self, book_id: i32) -> AppResult<Vec<i32>> {
        let ids: Vec<i32> = sqlx::query_scalar(
            "SELECT genre_id FROM book_genres WHERE book_id = $1 ORDER BY genre_id",
        )
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(ids)
    }

    /// Whether another book already uses this ISBN
    pub async fn isbn_taken(&self, isbn: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        let taken: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM books WHERE isbn = $1 AND ($2::int IS NULL OR id <> $2))",
        )
        .bind(isbn)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(taken)
    }

    /// Insert a book and its genre links in one transaction
    pub async fn create(&self, form: &BookForm) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;

        let book = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, summary, isbn, author_id, language_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&form.title)
        .bind(&form.summary)
        .bind(&form.isbn)
        .bind(form.author)
        .bind(form.language)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("INSERT INTO book_genres (book_id, genre_id) SELECT $1, UNNEST($2::int[])")
            .bind(book.id)
            .bind(&form.genre)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(book)
    }

    /// Update a book and replace its genre links in one transaction
    pub async fn update(&self, id: i32, form: &BookForm) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;

        let book = sqlx::query_as::<_, Book>(
            r#"
            UPDATE books
            SET title = $2, summary = $3, isbn = $4, author_id = $5, language_id = $6
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&form.title)
        .bind(&form.summary)
        .bind(&form.isbn)
        .bind(form.author)
        .bind(form.language)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))?;

        sqlx::query("DELETE FROM book_genres WHERE book_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("INSERT INTO book_genres (book_id, genre_id) SELECT $1, UNNEST($2::int[])")
            .bind(id)
            .bind(&form.genre)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(book)
    }
}
