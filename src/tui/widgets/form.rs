use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use crate::Config;
use crate::tui::app::{TaskForm, TaskFormField};
use crate::tui::widgets::color::parse_color;

/// Draw the new-task form and return where the text cursor belongs, if the
/// focused field takes text
pub fn render_task_form(f: &mut Frame, area: Rect, form: &TaskForm, config: &Config) -> Option<(u16, u16)> {
    let fg_color = parse_color(&config.theme.fg);
    let accent = parse_color(&config.colors.accent);

    let outer = Block::default()
        .borders(Borders::ALL)
        .title("New Task")
        .style(Style::default().fg(fg_color));
    let inner = outer.inner(area);
    f.render_widget(outer, area);

    let fields = form.visible_fields();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            fields
                .iter()
                .map(|_| Constraint::Length(3))
                .chain(std::iter::once(Constraint::Min(0))),
        )
        .split(inner);

    let mut cursor = None;
    for (field, row) in fields.iter().zip(rows.iter()) {
        let focused = *field == form.current_field;
        let border_style = if focused {
            Style::default().fg(accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(fg_color)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(field.label())
            .border_style(border_style);
        let content_width = row.width.saturating_sub(2) as usize;

        let line = match form.input(*field) {
            Some(input) => {
                let (text, cursor_col) = input.visible(content_width);
                if focused && row.height >= 3 {
                    cursor = Some((row.x + 1 + cursor_col as u16, row.y + 1));
                }
                Line::from(text)
            }
            None => choice_line(form, *field, focused),
        };

        f.render_widget(Paragraph::new(line).block(block), *row);
    }
    cursor
}

fn choice_line(form: &TaskForm, field: TaskFormField, focused: bool) -> Line<'static> {
    match form.choice_label(field) {
        Some(label) if focused => Line::from(vec![
            Span::raw("◀ "),
            Span::styled(label, Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" ▶"),
        ]),
        Some(label) => Line::from(label),
        None => Line::from(Span::styled(
            "(←/→ to choose)",
            Style::default().add_modifier(Modifier::DIM),
        )),
    }
}
