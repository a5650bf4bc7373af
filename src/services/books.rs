//! Books service

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookInput},
    repository::Repository,
};

/// Maps repository outcomes onto the API contract: absent rows become
/// `AppError::NotFound`, storage failures pass through untouched.
#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Create a book. `data` must already be validated.
    pub async fn create(&self, data: &BookInput) -> AppResult<Book> {
        let book = self.repository.books.insert(data).await?;
        tracing::info!(id = book.id, title = %book.title, "book created");
        Ok(book)
    }

    pub async fn list(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list_all().await
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<Book> {
        self.repository
            .books
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::book_not_found(id))
    }

    /// Replace all fields of an existing book
    pub async fn update(&self, id: i64, data: &BookInput) -> AppResult<Book> {
        let book = self
            .repository
            .books
            .update(id, data)
            .await?
            .ok_or_else(|| AppError::book_not_found(id))?;
        tracing::info!(id, "book updated");
        Ok(book)
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        if !self.repository.books.delete_by_id(id).await? {
            return Err(AppError::book_not_found(id));
        }
        tracing::info!(id, "book deleted");
        Ok(())
    }
}
