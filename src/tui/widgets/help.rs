use ratatui::widgets::{Block, Borders, Paragraph, Clear};
use ratatui::style::Style;
use ratatui::Frame;
use ratatui::layout::{Rect, Alignment};
use crate::Config;
use crate::tui::widgets::color::parse_color;
use crate::tui::widgets::popup_area;

pub fn render_help(f: &mut Frame, area: Rect, config: &Config) {
    let fg_color = parse_color(&config.theme.fg);
    let bg_color = parse_color(&config.theme.bg);

    let popup_area = popup_area(area, 60, 70);

    // Clear the background first so list content does not show through
    f.render_widget(Clear, popup_area);

    let paragraph = Paragraph::new(build_help_text(config))
        .block(Block::default()
            .borders(Borders::ALL)
            .title("Help - Key Bindings")
            .title_alignment(Alignment::Center)
            .style(Style::default().fg(fg_color).bg(bg_color)))
        .style(Style::default().fg(fg_color).bg(bg_color))
        .wrap(ratatui::widgets::Wrap { trim: false });

    f.render_widget(paragraph, popup_area);
}

pub fn build_help_text(config: &Config) -> String {
    let kb = &config.key_bindings;
    let mut text = String::new();

    text.push_str("Task list:\n");
    text.push_str(&format!("  {} / {}: Move selection up/down\n", kb.list_up, kb.list_down));
    text.push_str(&format!("  {}: Mark selected task completed\n", kb.complete));
    text.push_str(&format!("  {}: Show/hide details\n", kb.details));
    text.push_str(&format!("  {}: New task\n", kb.new));
    text.push_str(&format!("  {}: Export tasks to CSV\n", kb.export));
    text.push('\n');

    text.push_str("New task form:\n");
    text.push_str("  Tab / Shift+Tab: Next/previous field\n");
    text.push_str("  ← / →: Choose category, priority or type\n");
    text.push_str("  Ctrl+d: Fill in today's date\n");
    text.push_str("  Enter: Add task\n");
    text.push_str("  Esc: Cancel\n");
    text.push('\n');

    text.push_str("General:\n");
    text.push_str("  Enter / Esc: Dismiss notification\n");
    text.push_str(&format!("  {}: Show/hide help\n", kb.help));
    text.push_str(&format!("  {}: Quit\n", kb.quit));

    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn help_lists_configured_bindings() {
        let mut config = Config::default();
        config.key_bindings.export = "Ctrl+e".to_string();
        let text = build_help_text(&config);
        assert!(text.contains("Ctrl+e: Export tasks to CSV"));
        assert!(text.contains("q: Quit"));
    }
}
