//! Books repository

use sqlx::{Pool, Sqlite};

use crate::{
    error::AppResult,
    models::book::{Book, BookInput},
};

const BOOK_COLUMNS: &str = "id, title, author, year, genre";

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Sqlite>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Create the `books` table if absent. Safe to call repeatedly.
    pub async fn ensure_schema(&self) -> AppResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS books (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                author TEXT NOT NULL,
                year INTEGER,
                genre TEXT
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Insert a book and return it with its assigned ID
    pub async fn insert(&self, data: &BookInput) -> AppResult<Book> {
        let book = sqlx::query_as::<_, Book>(&format!(
            "INSERT INTO books (title, author, year, genre) VALUES (?, ?, ?, ?) RETURNING {}",
            BOOK_COLUMNS
        ))
        .bind(&data.title)
        .bind(&data.author)
        .bind(data.year)
        .bind(&data.genre)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(id = book.id, "inserted book");
        Ok(book)
    }

    /// List every book in insertion order
    pub async fn list_all(&self) -> AppResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, Book>(&format!("SELECT {} FROM books ORDER BY id", BOOK_COLUMNS))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<Option<Book>> {
        let row = sqlx::query_as::<_, Book>(&format!("SELECT {} FROM books WHERE id = ?", BOOK_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Replace every field of a book. Returns `None` if no row has this ID.
    pub async fn update(&self, id: i64, data: &BookInput) -> AppResult<Option<Book>> {
        let row = sqlx::query_as::<_, Book>(&format!(
            "UPDATE books SET title = ?, author = ?, year = ?, genre = ? WHERE id = ? RETURNING {}",
            BOOK_COLUMNS
        ))
        .bind(&data.title)
        .bind(&data.author)
        .bind(data.year)
        .bind(&data.genre)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Delete a book, reporting whether a row was actually removed
    pub async fn delete_by_id(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM books WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
