//! Book inventory for a small library.
//!
//! The [`LibraryStore`] keeps the ordered list of books and enforces the
//! available / borrowed transitions. The [`tui`] and [`shell`] modules are two
//! front ends that drive it through [`LibraryCommand`]s.

pub mod book;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod observers;
pub mod shell;
pub mod store;
pub mod table;
pub mod tui;

pub use book::{Book, BookRow, BookStatus};
pub use commands::{CommandOutcome, LibraryCommand};
pub use error::LibraryError;
pub use store::LibraryStore;
