use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Gauge};
use ratatui::Frame;
use crate::Config;
use crate::tui::widgets::color::parse_color;

pub fn progress_label(completed: usize, total: usize, ratio: f64) -> String {
    format!("{:.0}% ({} of {} done)", ratio * 100.0, completed, total)
}

/// Completion gauge for the whole registry
pub fn render_progress(f: &mut Frame, area: Rect, completed: usize, total: usize, ratio: f64, config: &Config) {
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Progress"))
        .style(Style::default().fg(parse_color(&config.theme.fg)))
        .gauge_style(Style::default().fg(parse_color(&config.colors.accent)))
        .ratio(ratio.clamp(0.0, 1.0))
        .label(progress_label(completed, total, ratio));
    f.render_widget(gauge, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_rounds_percentage() {
        assert_eq!(progress_label(1, 3, 1.0 / 3.0), "33% (1 of 3 done)");
        assert_eq!(progress_label(0, 0, 0.0), "0% (0 of 0 done)");
    }
}
