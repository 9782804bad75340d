//! Token list pane rendering

use crate::parser::lexer::{Token, TokenKind};
use crate::report::token_payload;
use crate::ui::theme::{border_style, DEFAULT_THEME};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

fn kind_style(kind: TokenKind) -> Style {
    match kind {
        TokenKind::NumberLiteral | TokenKind::BoolLiteral => Style::default().fg(DEFAULT_THEME.number),
        TokenKind::StringLiteral => Style::default().fg(DEFAULT_THEME.string),
        TokenKind::FunctionDecl => Style::default().fg(DEFAULT_THEME.function),
        TokenKind::Number | TokenKind::String | TokenKind::Bool => {
            Style::default().fg(DEFAULT_THEME.type_name)
        }
        k if k.is_keyword() => Style::default().fg(DEFAULT_THEME.keyword),
        k if k.is_punctuation() => Style::default().fg(DEFAULT_THEME.primary),
        _ => Style::default().fg(DEFAULT_THEME.fg),
    }
}

fn token_line(index: usize, token: &Token, is_selected: bool) -> Line<'static> {
    let marker = if is_selected { "▶ " } else { "  " };
    let mut spans = vec![
        Span::styled(
            format!("{}{:>4} ", marker, index),
            Style::default().fg(DEFAULT_THEME.comment),
        ),
        Span::styled(
            format!("{:<7} ", token.location.to_string()),
            Style::default().fg(DEFAULT_THEME.comment),
        ),
        Span::styled(token.kind.to_string(), kind_style(token.kind)),
    ];

    let payload = token_payload(token);
    if !payload.is_empty() {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(payload, Style::default().fg(DEFAULT_THEME.fg)));
    }

    let mut line = Line::from(spans);
    if is_selected {
        line = line.style(
            Style::default()
                .bg(DEFAULT_THEME.current_line_bg)
                .add_modifier(Modifier::BOLD),
        );
    }
    line
}

/// Render the token list, keeping `selected` inside the visible window
pub fn render_tokens_pane(
    frame: &mut Frame,
    area: Rect,
    tokens: &[Token],
    selected: usize,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = Block::default()
        .title(format!(" Tokens ({}) ", tokens.len()))
        .borders(Borders::ALL)
        .border_style(border_style(is_focused));

    if tokens.is_empty() {
        let paragraph = Paragraph::new("(no tokens)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    // Follow the selection
    if selected < *scroll_offset {
        *scroll_offset = selected;
    } else if selected >= *scroll_offset + visible_height {
        *scroll_offset = selected + 1 - visible_height;
    }

    let items: Vec<ListItem> = tokens
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(index, token)| ListItem::new(token_line(index, token, index == selected)))
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
