use std::sync::Arc;

use async_trait::async_trait;

use super::error::BookResult;
use super::models::Book;
use super::repository::BookRepository;

/// Business-layer capability consumed by the book handlers.
///
/// Any backend implementing these five operations can sit behind the HTTP
/// layer. `get_by_id` reports an absent book as `Ok(None)`, not as an error.
#[async_trait]
pub trait BookUsecase: Send + Sync {
    async fn create(&self, book: Book) -> BookResult<Book>;
    async fn get_all(&self) -> BookResult<Vec<Book>>;
    async fn get_by_id(&self, id: i64) -> BookResult<Option<Book>>;
    async fn update(&self, book: Book) -> BookResult<Book>;
    async fn delete(&self, id: i64) -> BookResult<()>;
}

/// Default usecase: forwards every operation to a repository.
pub struct BookService<R> {
    repository: Arc<R>,
}

impl<R: BookRepository> BookService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R: BookRepository + 'static> BookUsecase for BookService<R> {
    async fn create(&self, book: Book) -> BookResult<Book> {
        let book = self.repository.insert(book).await?;
        tracing::info!(book_id = book.id, "book created");
        Ok(book)
    }

    async fn get_all(&self) -> BookResult<Vec<Book>> {
        let books = self.repository.list().await?;
        tracing::debug!(count = books.len(), "books listed");
        Ok(books)
    }

    async fn get_by_id(&self, id: i64) -> BookResult<Option<Book>> {
        let book = self.repository.find(id).await?;
        tracing::debug!(book_id = id, found = book.is_some(), "book looked up");
        Ok(book)
    }

    async fn update(&self, book: Book) -> BookResult<Book> {
        let book = self.repository.update(book).await?;
        tracing::info!(book_id = book.id, "book updated");
        Ok(book)
    }

    async fn delete(&self, id: i64) -> BookResult<()> {
        self.repository.remove(id).await?;
        tracing::info!(book_id = id, "book deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::books::error::BookError;
    use crate::modules::books::repository::InMemoryBookRepository;

    fn service() -> BookService<InMemoryBookRepository> {
        BookService::new(Arc::new(InMemoryBookRepository::new()))
    }

    #[tokio::test]
    async fn create_then_get_returns_same_book() {
        let service = service();
        let mut book = Book::new("Dune", "Frank Herbert");
        book.extra
            .insert("year".to_string(), serde_json::json!(1965));

        let created = service.create(book).await.unwrap();
        let fetched = service.get_by_id(created.id).await.unwrap();

        assert_ne!(created.id, 0);
        assert_eq!(fetched, Some(created));
    }

    #[tokio::test]
    async fn get_of_absent_book_is_none() {
        assert_eq!(service().get_by_id(999).await.unwrap(), None);
    }

    #[tokio::test]
    async fn update_and_delete_round_trip() {
        let service = service();
        let mut book = service.create(Book::new("Dune", "Frank Herbert")).await.unwrap();

        book.author = "F. Herbert".to_string();
        service.update(book.clone()).await.unwrap();
        assert_eq!(service.get_all().await.unwrap(), vec![book.clone()]);

        service.delete(book.id).await.unwrap();
        assert!(service.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_of_absent_book_propagates_error() {
        let mut book = Book::new("Dune", "Frank Herbert");
        book.id = 3;

        let err = service().update(book).await.unwrap_err();
        assert_eq!(err, BookError::NotFound { id: 3 });
    }
}
