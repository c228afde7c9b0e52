use ratatui::widgets::{Block, Borders, Paragraph, Clear, Wrap};
use ratatui::style::{Modifier, Style};
use ratatui::Frame;
use ratatui::layout::{Rect, Alignment};
use ratatui::text::{Line, Span};
use crate::Config;
use crate::tui::app::{Notice, NoticeKind};
use crate::tui::widgets::color::parse_color;
use crate::tui::widgets::popup_area;

/// Modal popup for one queued notice; any of Enter/Esc/Space dismisses it
pub fn render_notice(f: &mut Frame, area: Rect, notice: &Notice, pending: usize, config: &Config) {
    let fg_color = parse_color(&config.theme.fg);
    let bg_color = parse_color(&config.theme.bg);
    let border_color = match notice.kind {
        NoticeKind::Info => parse_color(&config.colors.accent),
        NoticeKind::Reminder => parse_color("yellow"),
        NoticeKind::Warning => parse_color("red"),
    };

    let popup = popup_area(area, 50, 40);
    f.render_widget(Clear, popup);

    let mut lines: Vec<Line> = notice
        .body
        .lines()
        .map(|l| Line::from(Span::styled(l.to_string(), Style::default().fg(fg_color))))
        .collect();
    lines.push(Line::from(""));
    let footer = if pending > 1 {
        format!("Enter: OK ({} more)", pending - 1)
    } else {
        "Enter: OK".to_string()
    };
    lines.push(Line::from(Span::styled(footer, Style::default().add_modifier(Modifier::DIM))));

    let block = Block::default()
        .borders(Borders::ALL)
        .title(notice.title.as_str())
        .title_alignment(Alignment::Center)
        .border_style(Style::default().fg(border_color))
        .style(Style::default().bg(bg_color));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, popup);
}
