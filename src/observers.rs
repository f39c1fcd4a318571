use tracing::info;

use crate::book::{Book, BookStatus};

/// Trait for observing successful store mutations
///
/// Observers are only called after a change has been applied; rejected
/// operations never reach them.
pub trait StoreObserver {
    /// Called after a book is appended at `index`
    fn on_book_added(&self, index: usize, book: &Book);

    /// Called after the book at `index` moved from `from` to its current status
    fn on_status_change(&self, index: usize, book: &Book, from: BookStatus);
}

/// Logs every change to the inventory through `tracing`
#[derive(Debug, Default)]
pub struct ActivityLogger;

impl StoreObserver for ActivityLogger {
    fn on_book_added(&self, index: usize, book: &Book) {
        info!(index, title = book.title(), author = book.author(), "book added");
    }

    fn on_status_change(&self, index: usize, book: &Book, from: BookStatus) {
        info!(
            index,
            title = book.title(),
            from = from.label(),
            to = book.status().label(),
            "book status changed"
        );
    }
}
