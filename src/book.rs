use std::fmt;

use serde::{Deserialize, Serialize};

/// Whether a book is on the shelf or out with a borrower
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum BookStatus {
    /// Book is on the shelf and can be borrowed
    #[default]
    Available,
    /// Book has been borrowed and not yet returned
    Borrowed,
}

impl BookStatus {
    /// Label shown in the status column
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Borrowed => "Borrowed",
        }
    }

    /// Returns `true` if the book is currently borrowed
    #[must_use]
    pub const fn is_borrowed(self) -> bool {
        matches!(self, Self::Borrowed)
    }
}

impl fmt::Display for BookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single copy of a book held by the library
///
/// Title and author are fixed once the book is created; only the status
/// changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    /// Trimmed, non-empty title
    title: String,
    /// Trimmed, non-empty author
    author: String,
    /// Current lending status
    status: BookStatus,
}

impl Book {
    /// Create an available book.
    ///
    /// Callers are expected to have validated both strings; the store does
    /// this in [`crate::LibraryStore::add`].
    pub(crate) fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self { title: title.into(), author: author.into(), status: BookStatus::Available }
    }

    /// Title of the book
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Author of the book
    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Current lending status
    #[must_use]
    pub const fn status(&self) -> BookStatus {
        self.status
    }

    /// Returns `true` if the book is currently borrowed
    #[must_use]
    pub const fn is_borrowed(&self) -> bool {
        self.status.is_borrowed()
    }

    /// Overwrite the lending status
    pub(crate) fn set_status(&mut self, status: BookStatus) {
        self.status = status;
    }

    /// Display projection of this book
    #[must_use]
    pub fn to_row(&self) -> BookRow {
        BookRow {
            title: self.title.clone(),
            author: self.author.clone(),
            status: self.status.label().to_string(),
        }
    }
}

/// One row of the book table: title, author and the status label
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BookRow {
    /// Book title
    pub title: String,
    /// Book author
    pub author: String,
    /// `"Available"` or `"Borrowed"`
    pub status: String,
}
