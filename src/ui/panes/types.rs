//! Type table pane rendering
//!
//! Each type is shown with its supertype, the fields it inherits (muted, with
//! the ancestor they come from) and the fields it declares itself.

use crate::parser::ast::ParseInfo;
use crate::ui::theme::{border_style, DEFAULT_THEME};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// All lines of the type table, before scrolling
pub fn type_table_lines(info: &ParseInfo) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for type_info in &info.types {
        let mut header = vec![
            Span::styled(
                "type ",
                Style::default()
                    .fg(DEFAULT_THEME.keyword)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                type_info.name.clone(),
                Style::default()
                    .fg(DEFAULT_THEME.type_name)
                    .add_modifier(Modifier::BOLD),
            ),
        ];
        if let Some(supertype) = &type_info.supertype {
            header.push(Span::styled(" from ", Style::default().fg(DEFAULT_THEME.keyword)));
            header.push(Span::styled(
                supertype.clone(),
                Style::default().fg(DEFAULT_THEME.type_name),
            ));
        }
        lines.push(Line::from(header));

        for ancestor in info.ancestors(&type_info.name).into_iter().rev() {
            for field in &ancestor.fields {
                lines.push(Line::from(Span::styled(
                    format!("    {} {}  ← {}", field.field_type, field.name, ancestor.name),
                    Style::default().fg(DEFAULT_THEME.inherited),
                )));
            }
        }

        for field in &type_info.fields {
            let type_style = if field.field_type.is_primitive() {
                Style::default().fg(DEFAULT_THEME.type_name)
            } else {
                Style::default().fg(DEFAULT_THEME.secondary)
            };
            lines.push(Line::from(vec![
                Span::raw("    "),
                Span::styled(field.field_type.to_string(), type_style),
                Span::raw(" "),
                Span::styled(field.name.clone(), Style::default().fg(DEFAULT_THEME.fg)),
            ]));
        }

        for method in &type_info.methods {
            lines.push(Line::from(Span::styled(
                format!("    function {}", method.name),
                Style::default().fg(DEFAULT_THEME.function),
            )));
        }
    }

    lines
}

/// Render the type table; `info` is `None` when compilation failed
pub fn render_types_pane(
    frame: &mut Frame,
    area: Rect,
    info: Option<&ParseInfo>,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let title = match info {
        Some(info) => format!(" Types ({}) ", info.types.len()),
        None => " Types ".to_string(),
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style(is_focused));

    let lines = match info {
        Some(info) => type_table_lines(info),
        None => {
            let paragraph = Paragraph::new("(not available: compilation failed)")
                .block(block)
                .style(Style::default().fg(DEFAULT_THEME.error));
            frame.render_widget(paragraph, area);
            return;
        }
    };

    if lines.is_empty() {
        let paragraph = Paragraph::new("(no types declared)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    if lines.len() > visible_height {
        *scroll_offset = (*scroll_offset).min(lines.len() - visible_height);
    } else {
        *scroll_offset = 0;
    }

    let visible: Vec<Line> = lines
        .into_iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .collect();

    frame.render_widget(Paragraph::new(visible).block(block), area);
}
