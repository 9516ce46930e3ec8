use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::error::{BookError, BookResult};
use super::models::Book;

/// Storage backend for books.
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Store a new book under a freshly assigned id and return it
    async fn insert(&self, book: Book) -> BookResult<Book>;

    /// All stored books, ordered by id
    async fn list(&self) -> BookResult<Vec<Book>>;

    async fn find(&self, id: i64) -> BookResult<Option<Book>>;

    /// Replace the stored book with the same id
    async fn update(&self, book: Book) -> BookResult<Book>;

    /// Remove a book; removing an absent id is not an error
    async fn remove(&self, id: i64) -> BookResult<()>;
}

#[derive(Debug)]
struct Shelf {
    next_id: i64,
    books: BTreeMap<i64, Book>,
}

/// Process-local repository. Ids start at 1 and are never reused.
#[derive(Debug)]
pub struct InMemoryBookRepository {
    shelf: RwLock<Shelf>,
}

impl InMemoryBookRepository {
    pub fn new() -> Self {
        Self {
            shelf: RwLock::new(Shelf {
                next_id: 1,
                books: BTreeMap::new(),
            }),
        }
    }
}

impl Default for InMemoryBookRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookRepository for InMemoryBookRepository {
    async fn insert(&self, mut book: Book) -> BookResult<Book> {
        let mut shelf = self.shelf.write().await;

        let id = shelf.next_id;
        shelf.next_id = id.checked_add(1).ok_or(BookError::IdExhausted)?;

        book.id = id;
        shelf.books.insert(id, book.clone());
        Ok(book)
    }

    async fn list(&self) -> BookResult<Vec<Book>> {
        let shelf = self.shelf.read().await;
        Ok(shelf.books.values().cloned().collect())
    }

    async fn find(&self, id: i64) -> BookResult<Option<Book>> {
        let shelf = self.shelf.read().await;
        Ok(shelf.books.get(&id).cloned())
    }

    async fn update(&self, book: Book) -> BookResult<Book> {
        let mut shelf = self.shelf.write().await;

        match shelf.books.get_mut(&book.id) {
            Some(stored) => {
                *stored = book.clone();
                Ok(book)
            }
            None => Err(BookError::NotFound { id: book.id }),
        }
    }

    async fn remove(&self, id: i64) -> BookResult<()> {
        let mut shelf = self.shelf.write().await;
        shelf.books.remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn insert_assigns_increasing_ids() {
        let repo = InMemoryBookRepository::new();

        let mut first = Book::new("Dune", "Frank Herbert");
        first.id = 42;
        let first = repo.insert(first).await.unwrap();
        let second = repo.insert(Book::new("Emma", "Jane Austen")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_remove() {
        let repo = InMemoryBookRepository::new();
        let first = repo.insert(Book::new("Dune", "Frank Herbert")).await.unwrap();
        repo.remove(first.id).await.unwrap();

        let second = repo.insert(Book::new("Emma", "Jane Austen")).await.unwrap();
        assert_eq!(second.id, 2);
        assert_eq!(repo.find(first.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn list_is_ordered_by_id() {
        let repo = InMemoryBookRepository::new();
        for title in ["C", "A", "B"] {
            repo.insert(Book::new(title, "anon")).await.unwrap();
        }

        let titles: Vec<_> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|book| book.title)
            .collect();
        assert_eq!(titles, vec!["C", "A", "B"]);
    }

    #[tokio::test]
    async fn update_replaces_stored_book() {
        let repo = InMemoryBookRepository::new();
        let mut book = repo.insert(Book::new("Dune", "Frank Herbert")).await.unwrap();

        book.title = "Dune Messiah".to_string();
        repo.update(book.clone()).await.unwrap();

        assert_eq!(repo.find(book.id).await.unwrap(), Some(book));
    }

    #[tokio::test]
    async fn update_of_missing_book_fails() {
        let repo = InMemoryBookRepository::new();
        let mut book = Book::new("Dune", "Frank Herbert");
        book.id = 9;

        let err = repo.update(book).await.unwrap_err();
        assert_eq!(err, BookError::NotFound { id: 9 });
    }

    #[tokio::test]
    async fn remove_of_missing_book_succeeds() {
        let repo = InMemoryBookRepository::new();
        assert!(repo.remove(7).await.is_ok());
    }
}
