//! Gallery state and TUI event loop.
//!
//! [`Gallery`] holds the built figures and the one on screen. Left/right
//! (or `h`/`l`) step through them; `q` or `Ctrl+C` quits.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    text::{Line, Span, Text},
    widgets::Paragraph,
    Frame, Terminal,
};

use catalog_core::figure::Figure;

use crate::components::header::Header;
use crate::figure_view;
use crate::themes::Theme;

/// What a key press asks the gallery to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalleryAction {
    Next,
    Previous,
    Quit,
    None,
}

impl From<KeyEvent> for GalleryAction {
    fn from(key: KeyEvent) -> Self {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Self::Quit,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Self::Quit,
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => Self::Next,
            KeyCode::Left | KeyCode::Char('h') | KeyCode::BackTab => Self::Previous,
            _ => Self::None,
        }
    }
}

/// Root state of the chart gallery.
pub struct Gallery {
    pub theme: Theme,
    pub figures: Vec<Figure>,
    /// Index into `figures` of the figure on screen.
    pub selected: usize,
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
}

impl Gallery {
    pub fn new(theme_name: &str, figures: Vec<Figure>) -> Self {
        Self {
            theme: Theme::from_name(theme_name),
            figures,
            selected: 0,
            should_quit: false,
        }
    }

    /// Figure currently on screen.
    pub fn current(&self) -> Option<&Figure> {
        self.figures.get(self.selected)
    }

    /// Step forward, wrapping past the last figure.
    pub fn next(&mut self) {
        if !self.figures.is_empty() {
            self.selected = (self.selected + 1) % self.figures.len();
        }
    }

    /// Step back, wrapping before the first figure.
    pub fn previous(&mut self) {
        if !self.figures.is_empty() {
            self.selected = (self.selected + self.figures.len() - 1) % self.figures.len();
        }
    }

    pub fn apply(&mut self, action: GalleryAction) {
        match action {
            GalleryAction::Next => self.next(),
            GalleryAction::Previous => self.previous(),
            GalleryAction::Quit => self.should_quit = true,
            GalleryAction::None => {}
        }
    }

    /// Run the gallery until the user quits.
    ///
    /// Polls for key events with a 250 ms timeout so the loop stays
    /// responsive to resizes.
    pub async fn run(mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = Duration::from_millis(250);

        let result = loop {
            if let Err(e) = terminal.draw(|frame| self.render(frame)) {
                break Err(e);
            }

            match event::poll(tick_rate) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                        self.apply(GalleryAction::from(key))
                    }
                    Ok(_) => {}
                    Err(e) => break Err(e),
                },
                Ok(false) => {}
                Err(e) => break Err(e),
            }

            if self.should_quit {
                break Ok(());
            }

            // Let a racing shutdown signal get polled between frames.
            tokio::task::yield_now().await;
        };

        // Restore terminal state unconditionally.
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    /// Render the current figure with its header and key hints.
    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let Some(figure) = self.current() else {
            figure_view::render_no_data(frame, area, &self.theme);
            return;
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(1),
            ])
            .split(area);

        let header = Header::new(
            figure.display_title(),
            &figure.view,
            self.selected + 1,
            self.figures.len(),
            &self.theme,
        );
        frame.render_widget(Paragraph::new(Text::from(header.to_lines())), chunks[0]);

        figure_view::render_figure(frame, chunks[1], figure, &self.theme);

        let hints = Line::from(vec![
            Span::styled("\u{2190}/\u{2192}", self.theme.value),
            Span::styled(" switch view   ", self.theme.dim),
            Span::styled("q", self.theme.value),
            Span::styled(" quit", self.theme.dim),
        ]);
        frame.render_widget(Paragraph::new(hints), chunks[2]);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
