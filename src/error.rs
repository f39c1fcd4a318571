use std::fmt;

use thiserror::Error;

/// Input field of the add form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// The book title
    Title,
    /// The book author
    Author,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Title => f.write_str("title"),
            Self::Author => f.write_str("author"),
        }
    }
}

/// Operation that needs a selected row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Lend a book out
    Borrow,
    /// Take a book back
    Return,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Borrow => f.write_str("borrow"),
            Self::Return => f.write_str("return"),
        }
    }
}

/// Errors raised by library operations
///
/// Every variant is caused by user input and is recoverable: the store is
/// left exactly as it was before the failed call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LibraryError {
    /// Title or author was empty after trimming
    #[error("{field} must not be empty")]
    Validation {
        /// The first offending field
        field: Field,
    },
    /// No row was selected for a borrow or return
    #[error("no book selected to {action}")]
    NoSelection {
        /// What the caller tried to do
        action: Action,
    },
    /// The selected row does not exist
    #[error("row {index} is out of range for {len} books")]
    IndexOutOfRange {
        /// Requested row
        index: usize,
        /// Number of books in the store
        len: usize,
    },
    /// Borrow attempted on a book that is already out
    #[error("\"{title}\" is already borrowed")]
    AlreadyBorrowed {
        /// Title of the book
        title: String,
    },
    /// Return attempted on a book that is on the shelf
    #[error("\"{title}\" is not currently borrowed")]
    NotBorrowed {
        /// Title of the book
        title: String,
    },
}

impl LibraryError {
    /// Short caption for an error dialog
    #[must_use]
    pub const fn caption(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "Input Error",
            Self::NoSelection { .. } | Self::IndexOutOfRange { .. } => "Selection Error",
            Self::AlreadyBorrowed { .. } => "Borrow Error",
            Self::NotBorrowed { .. } => "Return Error",
        }
    }

    /// Message shown to the user
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation { .. } => "Please enter both title and author.".to_string(),
            Self::NoSelection { action } => format!("Please select a book to {action}."),
            Self::IndexOutOfRange { index, .. } => format!("No book at row {index}."),
            Self::AlreadyBorrowed { .. } => "Book is already borrowed.".to_string(),
            Self::NotBorrowed { .. } => "Book is not currently borrowed.".to_string(),
        }
    }

    /// Returns `true` for errors caused by a missing or invalid row
    #[must_use]
    pub const fn is_index_error(&self) -> bool {
        matches!(self, Self::NoSelection { .. } | Self::IndexOutOfRange { .. })
    }
}
