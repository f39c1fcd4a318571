use std::fmt;

use crate::{
    book::{Book, BookRow, BookStatus},
    error::{Field, LibraryError},
    observers::StoreObserver,
};

/// Books present at every fresh start, in display order
pub const SEED_BOOKS: [(&str, &str); 3] = [
    ("To Kill A Mockingbird", "Harper Lee"),
    ("Pride and Prejudice", "Jane Austen"),
    ("1984", "George Orwell"),
];

/// Ordered, in-memory collection of the library's books
///
/// Insertion order is the display order and a book's position is its only
/// identity. Books are never removed.
pub struct LibraryStore {
    /// Books in insertion order
    books: Vec<Book>,
    /// Registered mutation observers
    observers: Vec<Box<dyn StoreObserver>>,
}

// Manual implementation of Debug for LibraryStore
impl fmt::Debug for LibraryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LibraryStore")
            .field("books", &self.books)
            .field("observers_count", &self.observers.len())
            .finish()
    }
}

impl Default for LibraryStore {
    fn default() -> Self {
        Self::with_seed_books()
    }
}

impl LibraryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self { books: Vec::new(), observers: Vec::new() }
    }

    /// Create a store holding the three seed books, all available
    #[must_use]
    pub fn with_seed_books() -> Self {
        let books = SEED_BOOKS.iter().map(|(title, author)| Book::new(*title, *author)).collect();
        Self { books, observers: Vec::new() }
    }

    /// Register an observer to be notified of changes
    pub fn register_observer(&mut self, observer: Box<dyn StoreObserver>) {
        self.observers.push(observer);
    }

    /// Append a new, available book and return its row index
    ///
    /// Both strings are trimmed before they are checked and stored.
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::Validation` naming the first field that is empty
    /// after trimming. The store is not modified in that case.
    pub fn add(&mut self, title: &str, author: &str) -> Result<usize, LibraryError> {
        let title = title.trim();
        let author = author.trim();
        if title.is_empty() {
            return Err(LibraryError::Validation { field: Field::Title });
        }
        if author.is_empty() {
            return Err(LibraryError::Validation { field: Field::Author });
        }

        let index = self.books.len();
        self.books.push(Book::new(title, author));

        if let Some(book) = self.books.last() {
            for observer in &self.observers {
                observer.on_book_added(index, book);
            }
        }

        Ok(index)
    }

    /// Mark the book at `index` as borrowed
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::IndexOutOfRange` if there is no book at `index`,
    /// or `LibraryError::AlreadyBorrowed` if it is already out.
    pub fn borrow(&mut self, index: usize) -> Result<&Book, LibraryError> {
        self.transition(index, BookStatus::Borrowed)
    }

    /// Mark the book at `index` as available again
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::IndexOutOfRange` if there is no book at `index`,
    /// or `LibraryError::NotBorrowed` if it is on the shelf.
    pub fn return_book(&mut self, index: usize) -> Result<&Book, LibraryError> {
        self.transition(index, BookStatus::Available)
    }

    /// Move the book at `index` to `to`, rejecting a move to the status it already has
    fn transition(&mut self, index: usize, to: BookStatus) -> Result<&Book, LibraryError> {
        let len = self.books.len();
        let book = self.books.get_mut(index).ok_or(LibraryError::IndexOutOfRange { index, len })?;

        let from = book.status();
        if from == to {
            let title = book.title().to_string();
            return Err(match to {
                BookStatus::Borrowed => LibraryError::AlreadyBorrowed { title },
                BookStatus::Available => LibraryError::NotBorrowed { title },
            });
        }

        book.set_status(to);

        for observer in &self.observers {
            observer.on_status_change(index, book, from);
        }

        Ok(book)
    }

    /// Project every book to a display row, in store order
    #[must_use]
    pub fn list_all(&self) -> Vec<BookRow> {
        self.books.iter().map(Book::to_row).collect()
    }

    /// Book at `index`, if any
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Book> {
        self.books.get(index)
    }

    /// All books in store order
    #[must_use]
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// Number of books
    #[must_use]
    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// Returns `true` if the store holds no books
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}
