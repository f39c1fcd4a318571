//! Terminal UI.
//!
//! Mirrors the desktop window of a small library desk: two input fields, the
//! book table and the add / borrow / return actions, with modal error
//! messages. Built on ratatui + crossterm.

use std::{io, time::Duration};

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    layout::Position,
    prelude::*,
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap},
};
use tracing::debug;

use crate::{
    book::BookStatus,
    commands::LibraryCommand,
    error::LibraryError,
    store::LibraryStore,
    table::COLUMN_HEADERS,
};

/// Window title
pub const WINDOW_TITLE: &str = " Library Management System ";

const FOCUS_COLOR: Color = Color::LightGreen;
const AVAILABLE_COLOR: Color = Color::Green;
const BORROWED_COLOR: Color = Color::Yellow;
const ERROR_COLOR: Color = Color::Red;
const HINT_KEY_COLOR: Color = Color::Cyan;
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Widget receiving keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// The title input field
    Title,
    /// The author input field
    Author,
    /// The book table
    Table,
}

impl Focus {
    /// Next widget in tab order
    const fn next(self) -> Self {
        match self {
            Self::Title => Self::Author,
            Self::Author => Self::Table,
            Self::Table => Self::Title,
        }
    }

    /// Previous widget in tab order
    const fn prev(self) -> Self {
        match self {
            Self::Title => Self::Table,
            Self::Author => Self::Title,
            Self::Table => Self::Author,
        }
    }
}

/// An error dialog waiting to be dismissed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modal {
    /// Dialog caption
    pub caption: &'static str,
    /// Dialog body
    pub message: String,
}

impl From<&LibraryError> for Modal {
    fn from(err: &LibraryError) -> Self {
        Self { caption: err.caption(), message: err.user_message() }
    }
}

/// State of the terminal UI
#[derive(Debug)]
pub struct App {
    /// The inventory shown in the table
    store: LibraryStore,
    /// Contents of the title field
    title_input: String,
    /// Contents of the author field
    author_input: String,
    /// Widget with keyboard focus
    focus: Focus,
    /// Table selection; starts with nothing selected
    table_state: TableState,
    /// Open error dialog, if any
    modal: Option<Modal>,
    /// Confirmation of the last successful action
    status: Option<String>,
    /// Set once the user asks to leave
    should_quit: bool,
}

impl App {
    /// Create the UI state around `store`
    #[must_use]
    pub fn new(store: LibraryStore) -> Self {
        Self {
            store,
            title_input: String::new(),
            author_input: String::new(),
            focus: Focus::Title,
            table_state: TableState::default(),
            modal: None,
            status: None,
            should_quit: false,
        }
    }

    /// The inventory shown in the table
    #[must_use]
    pub fn store(&self) -> &LibraryStore {
        &self.store
    }

    /// Currently selected row
    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.table_state.selected()
    }

    /// Open error dialog, if any
    #[must_use]
    pub fn modal(&self) -> Option<&Modal> {
        self.modal.as_ref()
    }

    /// Returns `true` once the user asked to quit
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// React to a key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.modal.is_some() {
            self.modal = None;
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') => self.should_quit = true,
                KeyCode::Char('a') => self.submit_add(),
                KeyCode::Char('b') => self.submit_borrow(),
                KeyCode::Char('r') => self.submit_return(),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab => self.focus = self.focus.next(),
            KeyCode::BackTab => self.focus = self.focus.prev(),
            _ => match self.focus {
                Focus::Title | Focus::Author => self.handle_input_key(key.code),
                Focus::Table => self.handle_table_key(key.code),
            },
        }
    }

    /// Keys while one of the input fields has focus
    fn handle_input_key(&mut self, code: KeyCode) {
        let field = match self.focus {
            Focus::Author => &mut self.author_input,
            Focus::Title | Focus::Table => &mut self.title_input,
        };
        match code {
            KeyCode::Char(c) => field.push(c),
            KeyCode::Backspace => {
                field.pop();
            }
            KeyCode::Enter => self.submit_add(),
            KeyCode::Down => self.focus = self.focus.next(),
            KeyCode::Up => self.focus = self.focus.prev(),
            _ => {}
        }
    }

    /// Keys while the table has focus
    fn handle_table_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(true),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(false),
            KeyCode::Home => self.select(Some(0)),
            KeyCode::End => self.select(self.store.len().checked_sub(1)),
            KeyCode::Char('b') => self.submit_borrow(),
            KeyCode::Char('r') => self.submit_return(),
            _ => {}
        }
    }

    /// Step the selection down or up, clamped to the table
    fn move_selection(&mut self, down: bool) {
        let Some(last) = self.store.len().checked_sub(1) else {
            return;
        };
        let next = match (self.selected(), down) {
            (None, true) => 0,
            (None, false) => last,
            (Some(row), true) => row.saturating_add(1).min(last),
            (Some(row), false) => row.saturating_sub(1),
        };
        self.select(Some(next));
    }

    /// Select `row`, ignoring rows past the end of the table
    fn select(&mut self, row: Option<usize>) {
        if row.is_none_or(|r| r < self.store.len()) {
            self.table_state.select(row);
        }
    }

    /// Add a book from the input fields
    fn submit_add(&mut self) {
        let command = LibraryCommand::Add {
            title: self.title_input.clone(),
            author: self.author_input.clone(),
        };
        if let Some(row) = self.run(command) {
            self.title_input.clear();
            self.author_input.clear();
            self.focus = Focus::Title;
            self.table_state.select(Some(row));
        }
    }

    /// Borrow the selected book
    fn submit_borrow(&mut self) {
        self.run(LibraryCommand::Borrow { row: self.selected() });
    }

    /// Return the selected book
    fn submit_return(&mut self) {
        self.run(LibraryCommand::Return { row: self.selected() });
    }

    /// Execute `command`, opening a dialog on failure; returns the affected row
    fn run(&mut self, command: LibraryCommand) -> Option<usize> {
        debug!(?command, "ui command");
        match command.execute(&mut self.store) {
            Ok(outcome) => {
                self.status = Some(outcome.message);
                Some(outcome.row)
            }
            Err(err) => {
                self.modal = Some(Modal::from(&err));
                None
            }
        }
    }
}

/// Runs the interactive terminal UI until the user quits
///
/// # Errors
///
/// Fails if the terminal cannot be set up or drawn to, or reading input fails.
pub fn run(store: LibraryStore) -> Result<()> {
    let mut terminal = TerminalSession::new()?;
    let mut app = App::new(store);

    while !app.should_quit() {
        terminal.draw(|frame| draw(frame, &mut app))?;

        if event::poll(POLL_INTERVAL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                _ => {}
            }
        }
    }

    Ok(())
}

/// Render the whole window
pub fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let outer = Block::default()
        .borders(Borders::ALL)
        .title(WINDOW_TITLE)
        .title_alignment(Alignment::Center);
    let inner = outer.inner(frame.area());
    frame.render_widget(outer, frame.area());

    let [title_area, author_area, table_area, hints_area, status_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Min(3),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    draw_input(frame, app, title_area, Focus::Title);
    draw_input(frame, app, author_area, Focus::Author);
    draw_table(frame, app, table_area);
    frame.render_widget(Paragraph::new(hints_line()), hints_area);

    if let Some(status) = &app.status {
        let status = Paragraph::new(status.as_str()).style(Style::new().fg(AVAILABLE_COLOR));
        frame.render_widget(status, status_area);
    }

    if let Some(modal) = &app.modal {
        draw_modal(frame, modal, inner);
    }
}

/// Border style for a panel given the current focus
fn panel_style(app: &App, panel: Focus) -> Style {
    if app.focus == panel { Style::new().fg(FOCUS_COLOR) } else { Style::new() }
}

/// One labelled input field
fn draw_input(frame: &mut Frame<'_>, app: &App, area: Rect, field: Focus) {
    let (label, value) = match field {
        Focus::Author => ("Author:", app.author_input.as_str()),
        Focus::Title | Focus::Table => ("Title:", app.title_input.as_str()),
    };
    let block =
        Block::default().borders(Borders::ALL).title(label).border_style(panel_style(app, field));
    let inner = block.inner(area);
    frame.render_widget(Paragraph::new(value).block(block), area);

    if app.focus == field && app.modal.is_none() {
        let offset = u16::try_from(value.chars().count()).unwrap_or(u16::MAX);
        let x = inner.x.saturating_add(offset).min(inner.right().saturating_sub(1));
        frame.set_cursor_position(Position::new(x, inner.y));
    }
}

/// The book table with its selection
fn draw_table(frame: &mut Frame<'_>, app: &mut App, area: Rect) {
    let header = Row::new(COLUMN_HEADERS).style(Style::new().add_modifier(Modifier::BOLD));
    let rows = app.store.books().iter().map(|book| {
        let color = match book.status() {
            BookStatus::Available => AVAILABLE_COLOR,
            BookStatus::Borrowed => BORROWED_COLOR,
        };
        Row::new([
            Cell::from(book.title().to_string()),
            Cell::from(book.author().to_string()),
            Cell::from(book.status().label()).style(Style::new().fg(color)),
        ])
    });

    let table = Table::new(
        rows,
        [Constraint::Percentage(45), Constraint::Percentage(35), Constraint::Percentage(20)],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("Books")
            .border_style(panel_style(app, Focus::Table)),
    )
    .row_highlight_style(Style::new().add_modifier(Modifier::REVERSED))
    .highlight_symbol("> ");

    frame.render_stateful_widget(table, area, &mut app.table_state);
}

/// Footer listing the key bindings
fn hints_line() -> Line<'static> {
    let mut spans = Vec::new();
    for (key, label) in [
        ("Tab", "focus"),
        ("Enter/^A", "add book"),
        ("b/^B", "borrow book"),
        ("r/^R", "return book"),
        ("Esc", "quit"),
    ] {
        spans.push(Span::styled(key, Style::new().fg(HINT_KEY_COLOR)));
        spans.push(Span::raw(format!(" {label}  ")));
    }
    Line::from(spans)
}

/// Centered error dialog
fn draw_modal(frame: &mut Frame<'_>, modal: &Modal, area: Rect) {
    let width = area.width.min(50);
    let height = area.height.min(5);
    let popup = Rect {
        x: area.x.saturating_add(area.width.saturating_sub(width) / 2),
        y: area.y.saturating_add(area.height.saturating_sub(height) / 2),
        width,
        height,
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(modal.caption)
        .border_style(Style::new().fg(ERROR_COLOR));
    let body = Text::from(vec![
        Line::from(modal.message.as_str()),
        Line::from(Span::styled("press any key", Style::new().add_modifier(Modifier::DIM))),
    ]);

    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(body).block(block).wrap(Wrap { trim: true }), popup);
}

/// Raw-mode alternate screen, restored on drop
struct TerminalSession {
    /// The ratatui terminal
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    /// Enter raw mode and the alternate screen
    fn new() -> Result<Self> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).inspect_err(|_| teardown_terminal())?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).inspect_err(|_| teardown_terminal())?;
        terminal.clear().inspect_err(|_| teardown_terminal())?;

        Ok(Self { terminal })
    }

    /// Draw one frame
    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        drop(self.terminal.show_cursor());
        teardown_terminal();
    }
}

/// Leave raw mode and the alternate screen, ignoring failures
fn teardown_terminal() {
    drop(disable_raw_mode());
    let mut stdout = io::stdout();
    drop(execute!(stdout, LeaveAlternateScreen));
}

#[cfg(test)]
mod tests {
    use ratatui::backend::TestBackend;

    use super::*;

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn ctrl(app: &mut App, c: char) {
        app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn screen(app: &mut App) -> String {
        let mut terminal = match Terminal::new(TestBackend::new(100, 20)) {
            Ok(terminal) => terminal,
            Err(err) => return format!("terminal error: {err}"),
        };
        if let Err(err) = terminal.draw(|frame| draw(frame, app)) {
            return format!("draw error: {err}");
        }
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(usize::from(buffer.area.width))
            .map(|line| line.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn starts_with_seed_books_and_no_selection() {
        let mut app = App::new(LibraryStore::with_seed_books());
        assert_eq!(app.selected(), None);

        let screen = screen(&mut app);
        assert!(screen.contains("Library Management System"));
        assert!(screen.contains("To Kill A Mockingbird"));
        assert!(screen.contains("Pride and Prejudice"));
        assert!(screen.contains("George Orwell"));
    }

    #[test]
    fn adding_clears_inputs_and_selects_new_row() {
        let mut app = App::new(LibraryStore::with_seed_books());
        type_text(&mut app, "Dune");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "Frank Herbert");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.store().len(), 4);
        assert_eq!(app.selected(), Some(3));
        assert!(app.title_input.is_empty());
        assert!(app.author_input.is_empty());
        assert_eq!(app.focus, Focus::Title);
        assert!(screen(&mut app).contains("Added \"Dune\" by Frank Herbert"));
    }

    #[test]
    fn empty_author_opens_input_error() {
        let mut app = App::new(LibraryStore::with_seed_books());
        type_text(&mut app, "Dune");
        ctrl(&mut app, 'a');

        assert_eq!(
            app.modal(),
            Some(&Modal { caption: "Input Error", message: "Please enter both title and author.".to_string() })
        );
        assert_eq!(app.title_input, "Dune");
        assert_eq!(app.store().len(), 3);
        assert!(screen(&mut app).contains("Please enter both title and author."));

        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.modal(), None);
        assert_eq!(app.title_input, "Dune");
    }

    #[test]
    fn borrow_without_selection_reports_selection_error() {
        let mut app = App::new(LibraryStore::with_seed_books());
        ctrl(&mut app, 'b');
        assert_eq!(app.modal().map(|m| m.caption), Some("Selection Error"));
        assert_eq!(
            app.modal().map(|m| m.message.as_str()),
            Some("Please select a book to borrow.")
        );
    }

    #[test]
    fn borrow_and_return_from_table() {
        let mut app = App::new(LibraryStore::with_seed_books());
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.focus, Focus::Table);

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.selected(), Some(1));

        press(&mut app, KeyCode::Char('b'));
        assert!(app.store().get(1).is_some_and(|b| b.is_borrowed()));

        press(&mut app, KeyCode::Char('b'));
        assert_eq!(app.modal().map(|m| m.caption), Some("Borrow Error"));
        press(&mut app, KeyCode::Esc);
        assert!(!app.should_quit());

        press(&mut app, KeyCode::Char('r'));
        assert!(app.store().get(1).is_some_and(|b| !b.is_borrowed()));

        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.modal().map(|m| m.caption), Some("Return Error"));
    }

    #[test]
    fn selection_is_clamped_to_table() {
        let mut app = App::new(LibraryStore::with_seed_books());
        app.focus = Focus::Table;

        press(&mut app, KeyCode::Up);
        assert_eq!(app.selected(), Some(2));
        press(&mut app, KeyCode::Down);
        assert_eq!(app.selected(), Some(2));
        press(&mut app, KeyCode::Home);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.selected(), Some(0));

        let mut empty = App::new(LibraryStore::new());
        empty.focus = Focus::Table;
        press(&mut empty, KeyCode::Down);
        press(&mut empty, KeyCode::End);
        assert_eq!(empty.selected(), None);
    }

    #[test]
    fn typing_in_table_does_not_edit_inputs() {
        let mut app = App::new(LibraryStore::with_seed_books());
        app.focus = Focus::Table;
        type_text(&mut app, "xyz");
        assert!(app.title_input.is_empty());
        assert!(app.author_input.is_empty());
    }

    #[test]
    fn escape_and_ctrl_c_quit() {
        let mut app = App::new(LibraryStore::with_seed_books());
        press(&mut app, KeyCode::Esc);
        assert!(app.should_quit());

        let mut app = App::new(LibraryStore::with_seed_books());
        ctrl(&mut app, 'c');
        assert!(app.should_quit());
    }
}
