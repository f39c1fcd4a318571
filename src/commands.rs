use tracing::warn;

use crate::{
    error::{Action, LibraryError},
    store::LibraryStore,
};

/// Requests a presentation layer can make of the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LibraryCommand {
    /// Add a book from the two free-text fields
    Add {
        /// Raw title as entered
        title: String,
        /// Raw author as entered
        author: String,
    },
    /// Borrow the selected book
    Borrow {
        /// Selected row, `None` if nothing is selected
        row: Option<usize>,
    },
    /// Return the selected book
    Return {
        /// Selected row, `None` if nothing is selected
        row: Option<usize>,
    },
}

/// Result of a command that was applied to the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    /// Row affected by the command
    pub row: usize,
    /// Confirmation for the user
    pub message: String,
}

/// Map a signed row number to a selection; negative means nothing is selected
#[must_use]
pub fn selection_from_row(row: i64) -> Option<usize> {
    usize::try_from(row).ok()
}

impl LibraryCommand {
    /// Apply this command to `store`
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::NoSelection` for a borrow or return without a
    /// selected row, and passes through any error raised by the store.
    pub fn execute(self, store: &mut LibraryStore) -> Result<CommandOutcome, LibraryError> {
        let result = match self {
            Self::Add { title, author } => store.add(&title, &author).map(|row| {
                let message = format!("Added \"{}\" by {}", title.trim(), author.trim());
                CommandOutcome { row, message }
            }),
            Self::Borrow { row } => row
                .ok_or(LibraryError::NoSelection { action: Action::Borrow })
                .and_then(|row| store.borrow(row).map(|book| (row, book.title().to_string())))
                .map(|(row, title)| CommandOutcome { row, message: format!("Borrowed \"{title}\"") }),
            Self::Return { row } => row
                .ok_or(LibraryError::NoSelection { action: Action::Return })
                .and_then(|row| store.return_book(row).map(|book| (row, book.title().to_string())))
                .map(|(row, title)| CommandOutcome { row, message: format!("Returned \"{title}\"") }),
        };

        if let Err(err) = &result {
            warn!(error = %err, "command rejected");
        }

        result
    }
}
