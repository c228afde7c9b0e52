use ratatui::widgets::{Block, Borders, Paragraph, Clear};
use ratatui::style::Style;
use ratatui::Frame;
use ratatui::layout::{Rect, Alignment};
use crate::Config;
use crate::tui::widgets::color::parse_color;
use crate::tui::widgets::input::TextInput;
use crate::tui::widgets::popup_area_with_height;

/// Path prompt for the CSV export. Returns the cursor position.
pub fn render_export_prompt(f: &mut Frame, area: Rect, input: &TextInput, config: &Config) -> Option<(u16, u16)> {
    let fg_color = parse_color(&config.theme.fg);
    let bg_color = parse_color(&config.theme.bg);
    let accent = parse_color(&config.colors.accent);

    let popup = popup_area_with_height(area, 60, 3);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Export to CSV")
        .title_alignment(Alignment::Center)
        .border_style(Style::default().fg(accent))
        .style(Style::default().fg(fg_color).bg(bg_color));
    let inner = block.inner(popup);

    let (text, cursor_col) = input.visible(inner.width as usize);
    f.render_widget(Paragraph::new(text).block(block), popup);

    if inner.height == 0 || inner.width == 0 {
        return None;
    }
    Some((inner.x + cursor_col as u16, inner.y))
}
