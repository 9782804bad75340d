//! Inspector application state and logic

use crate::parser::ast::{ParseInfo, SourceLocation};
use crate::parser::lexer::{Lexer, Token};
use crate::parser::parse::Parser;
use crate::parser::CompileError;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;

use super::panes::SourceScrollState;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Tokens,
    Types,
}

impl FocusedPane {
    /// Move focus to the next pane (clockwise: source -> tokens -> types)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Tokens,
            FocusedPane::Tokens => FocusedPane::Types,
            FocusedPane::Types => FocusedPane::Source,
        }
    }

    /// Move focus to the previous pane (counter-clockwise)
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Types,
            FocusedPane::Tokens => FocusedPane::Source,
            FocusedPane::Types => FocusedPane::Tokens,
        }
    }
}

/// The inspector state
pub struct App {
    pub source_code: String,
    pub tokens: Vec<Token>,

    /// Parse result, `None` if lexing or parsing failed
    pub info: Option<ParseInfo>,
    pub error: Option<CompileError>,

    pub focused_pane: FocusedPane,
    pub selected_token: usize,

    /// Per-pane scroll offsets
    pub source_scroll: SourceScrollState,
    pub token_scroll: usize,
    pub types_scroll: usize,

    pub should_quit: bool,
    pub status_message: String,
}

impl App {
    /// Tokenize and parse `source_code`, keeping whatever stage succeeded.
    pub fn new(source_code: String) -> Self {
        let (tokens, info, error) = match Lexer::new(&source_code).tokenize() {
            Ok(tokens) => match Parser::new(tokens.clone()).parse() {
                Ok(info) => (tokens, Some(info), None),
                Err(e) => (tokens, None, Some(CompileError::Parse(e))),
            },
            Err(e) => (Vec::new(), None, Some(CompileError::Lex(e))),
        };

        let status_message = match &info {
            Some(info) => format!(
                "{} tokens, {} types",
                tokens.len(),
                info.types.len()
            ),
            None => String::from("Compilation failed"),
        };

        App {
            source_code,
            tokens,
            info,
            error,
            focused_pane: FocusedPane::Tokens,
            selected_token: 0,
            source_scroll: SourceScrollState::default(),
            token_scroll: 0,
            types_scroll: 0,
            should_quit: false,
            status_message,
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key_event(key);
                }
            }
        }

        Ok(())
    }

    pub fn error_location(&self) -> Option<SourceLocation> {
        match &self.error {
            Some(CompileError::Lex(e)) => Some(e.location),
            Some(CompileError::Parse(e)) => Some(e.location),
            None => None,
        }
    }

    /// Line of the selected token, or of the error when there are no tokens
    pub fn current_line(&self) -> usize {
        match self.tokens.get(self.selected_token) {
            Some(token) => token.location.line,
            None => self.error_location().map(|l| l.line).unwrap_or(0),
        }
    }

    /// Render the UI
    pub fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Panes on top, status bar at the bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        // Source on the left, tokens and types stacked on the right
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(main_chunks[0]);

        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(columns[1]);

        let current_line = self.current_line();
        super::panes::render_source_pane(
            frame,
            columns[0],
            &self.source_code,
            current_line,
            self.error_location().map(|l| l.line),
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        super::panes::render_tokens_pane(
            frame,
            right_rows[0],
            &self.tokens,
            self.selected_token,
            self.focused_pane == FocusedPane::Tokens,
            &mut self.token_scroll,
        );

        super::panes::render_types_pane(
            frame,
            right_rows[1],
            self.info.as_ref(),
            self.focused_pane == FocusedPane::Types,
            &mut self.types_scroll,
        );

        let error_message = self.error.as_ref().map(|e| e.to_string());
        super::panes::render_status_bar(
            frame,
            main_chunks[1],
            &self.status_message,
            self.selected_token,
            self.tokens.len(),
            error_message.as_deref(),
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Tokens => self.select_token(self.selected_token.saturating_sub(1)),
                FocusedPane::Source => {
                    // Scrolling up moves the current line down visually
                    if let Some(row) = self.source_scroll.target_line_row {
                        self.source_scroll.target_line_row = Some(row.saturating_add(1));
                    }
                }
                FocusedPane::Types => {
                    self.types_scroll = self.types_scroll.saturating_sub(1);
                }
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Tokens => self.select_token(self.selected_token.saturating_add(1)),
                FocusedPane::Source => {
                    if let Some(row) = self.source_scroll.target_line_row {
                        self.source_scroll.target_line_row = Some(row.saturating_sub(1));
                    }
                }
                FocusedPane::Types => {
                    self.types_scroll = self.types_scroll.saturating_add(1);
                }
            },
            KeyCode::Home => self.select_token(0),
            KeyCode::End => self.select_token(self.tokens.len().saturating_sub(1)),
            KeyCode::Char('e') | KeyCode::Char('E') => self.jump_to_error(),
            _ => {}
        }
    }

    fn select_token(&mut self, index: usize) {
        if self.tokens.is_empty() {
            return;
        }
        self.selected_token = index.min(self.tokens.len() - 1);
        if let Some(token) = self.tokens.get(self.selected_token) {
            self.status_message = format!("{} at {}", token, token.location);
        }
    }

    /// Select the first token at or after the error location.
    fn jump_to_error(&mut self) {
        let Some(location) = self.error_location() else {
            self.status_message = "No errors".to_string();
            return;
        };
        let index = self
            .tokens
            .iter()
            .position(|t| (t.location.line, t.location.column) >= (location.line, location.column))
            .unwrap_or(self.tokens.len().saturating_sub(1));
        self.select_token(index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::TokenKind;
    use crate::parser::parse::ParseErrorKind;
    use crossterm::event::KeyModifiers;
    use ratatui::backend::TestBackend;

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn screen(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(160, 20)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_focus_cycles() {
        let mut app = App::new(String::new());
        assert_eq!(app.focused_pane, FocusedPane::Tokens);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focused_pane, FocusedPane::Types);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focused_pane, FocusedPane::Source);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.focused_pane, FocusedPane::Types);
    }

    #[test]
    fn test_token_selection_is_clamped() {
        let mut app = App::new("type A {\n number x;\n}".to_string());
        assert_eq!(app.tokens.len(), 7);

        press(&mut app, KeyCode::Up);
        assert_eq!(app.selected_token, 0);

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.selected_token, 3);
        assert_eq!(app.current_line(), 2);

        press(&mut app, KeyCode::End);
        assert_eq!(app.selected_token, 6);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.selected_token, 6);
        assert_eq!(app.current_line(), 3);

        press(&mut app, KeyCode::Home);
        assert_eq!(app.selected_token, 0);
    }

    #[test]
    fn test_parse_error_keeps_tokens() {
        let mut app = App::new("type A { Ghost g; }".to_string());
        assert!(app.info.is_none());
        assert_eq!(app.tokens.len(), 7);
        assert!(matches!(
            &app.error,
            Some(CompileError::Parse(e)) if e.kind == ParseErrorKind::UnknownType("Ghost".to_string())
        ));

        press(&mut app, KeyCode::Char('e'));
        assert_eq!(app.selected_token, 3);
        assert_eq!(app.tokens[app.selected_token].kind, TokenKind::Name);
    }

    #[test]
    fn test_lex_error_has_no_tokens() {
        let mut app = App::new("type A {\n \"open".to_string());
        assert!(app.tokens.is_empty());
        assert!(matches!(app.error, Some(CompileError::Lex(_))));
        assert_eq!(app.current_line(), 2);

        press(&mut app, KeyCode::Down);
        assert_eq!(app.selected_token, 0);
    }

    #[test]
    fn test_quit() {
        let mut app = App::new(String::new());
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_render_shows_panes() {
        let mut app = App::new("type Dog { number age; }\ntype Cat from Dog { }".to_string());
        let text = screen(&mut app);

        assert!(text.contains("Source Code"));
        assert!(text.contains("Tokens (13)"));
        assert!(text.contains("Types (2)"));
        assert!(text.contains("type Cat from Dog"));
        assert!(text.contains("Token 1/13"));
    }

    #[test]
    fn test_render_failed_compile() {
        let mut app = App::new("type Cat from Unicorn { }".to_string());
        let text = screen(&mut app);

        assert!(text.contains("compilation failed"));
        assert!(text.contains("Unknown type: Unicorn"));
    }
}
