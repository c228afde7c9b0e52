use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;
use crate::models::Task;
use crate::Config;
use crate::tui::widgets::color::{category_color, parse_color};

/// Detail lines for one task: its info text with the headline in bold,
/// then the completion status
pub fn detail_lines(task: &Task) -> Vec<Line<'static>> {
    let info = task.display_info();
    let mut lines: Vec<Line<'static>> = Vec::new();
    for (i, text) in info.lines().enumerate() {
        if i == 0 {
            lines.push(Line::from(Span::styled(text.to_string(), Style::default().add_modifier(Modifier::BOLD))));
            lines.push(Line::from(""));
        } else if let Some(quote) = text.strip_prefix("Quote: ") {
            lines.push(Line::from(Span::styled(quote.to_string(), Style::default().add_modifier(Modifier::ITALIC))));
        } else {
            lines.push(Line::from(text.to_string()));
        }
    }
    lines.push(Line::from(vec![
        Span::styled("Status: ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(task.status_label()),
    ]));
    lines
}

pub fn render_item_view(f: &mut Frame, area: Rect, task: Option<&Task>, config: &Config) {
    if area.width < 2 || area.height < 2 {
        return;
    }

    let fg_color = parse_color(&config.theme.fg);
    let mut block = Block::default().borders(Borders::ALL).title("Details");
    let lines = match task {
        Some(task) => {
            block = block.border_style(Style::default().fg(category_color(config, task.category())));
            detail_lines(task)
        }
        None => vec![Line::from("No tasks yet. Press the 'new' key to add one.")],
    };

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().fg(fg_color))
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}
