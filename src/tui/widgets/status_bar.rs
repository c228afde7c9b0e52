use ratatui::widgets::Paragraph;
use ratatui::style::{Style, Modifier};
use ratatui::Frame;
use ratatui::layout::Rect;
use crate::Config;
use crate::tui::widgets::color::{parse_color, get_contrast_text_color};

const SEPARATOR: &str = " • ";
const ELLIPSIS: &str = "...";

/// Join as many hints as fit in `max_width` columns, ending in an ellipsis
/// when some had to be dropped
pub fn fit_hints(hints: &[String], max_width: usize) -> String {
    let mut text = String::new();
    for (i, hint) in hints.iter().enumerate() {
        let current_len = text.chars().count();
        let would_be_len = if i == 0 {
            hint.chars().count()
        } else {
            current_len + SEPARATOR.chars().count() + hint.chars().count()
        };

        if would_be_len > max_width {
            let source = if text.is_empty() { hint.as_str() } else { text.as_str() };
            let source_len = source.chars().count();
            if source_len + ELLIPSIS.len() <= max_width {
                text = format!("{}{}", source, ELLIPSIS);
            } else {
                let keep = max_width.saturating_sub(ELLIPSIS.len());
                text = source.chars().take(keep).collect::<String>() + ELLIPSIS;
            }
            break;
        }

        if i > 0 {
            text.push_str(SEPARATOR);
        }
        text.push_str(hint);
    }
    text
}

pub fn render_status_bar(
    f: &mut Frame,
    area: Rect,
    message: Option<&String>,
    key_hints: &[String],
    config: &Config,
) {
    let fg_color = parse_color(&config.theme.fg);
    let bg_color = parse_color(&config.theme.bg);
    let highlight_bg = parse_color(&config.theme.highlight_bg);
    let max_width = area.width as usize;

    let (content, style) = match message {
        Some(msg) => {
            let msg_fg = get_contrast_text_color(highlight_bg);
            let content = if msg.chars().count() > max_width {
                msg.chars().take(max_width.saturating_sub(ELLIPSIS.len())).collect::<String>() + ELLIPSIS
            } else {
                msg.clone()
            };
            (content, Style::default().fg(msg_fg).bg(highlight_bg).add_modifier(Modifier::BOLD))
        }
        None => (fit_hints(key_hints, max_width), Style::default().fg(fg_color).bg(bg_color)),
    };

    // Single line, no block: content areas have borders, the status bar does not
    f.render_widget(Paragraph::new(content).style(style), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hints() -> Vec<String> {
        vec!["n: New".to_string(), "q: Quit".to_string(), "F1: Help".to_string()]
    }

    #[test]
    fn all_hints_fit() {
        assert_eq!(fit_hints(&hints(), 80), "n: New • q: Quit • F1: Help");
    }

    #[test]
    fn overflow_is_marked_with_ellipsis() {
        assert_eq!(fit_hints(&hints(), 19), "n: New • q: Quit...");
        assert_eq!(fit_hints(&hints(), 17).chars().count(), 17);
    }

    #[test]
    fn long_first_hint_is_truncated() {
        assert_eq!(fit_hints(&hints(), 5), "n:...");
    }
}
