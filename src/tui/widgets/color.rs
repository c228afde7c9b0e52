use ratatui::style::Color;

use crate::models::Category;
use crate::Config;

/// Parse a color string into a ratatui Color
/// Supports:
/// - Named colors: black, red, green, yellow, blue, magenta, cyan, white, gray/grey,
///   darkgray and the light* variants
/// - Hex format: #RRGGBB or #RGB (short form)
/// - RGB format: rgb(255,0,0) or rgb(255, 0, 0)
///
/// Returns Color::White for unrecognized colors
pub fn parse_color(color_str: &str) -> Color {
    let s = color_str.trim().to_lowercase();

    let named = match s.as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "white" => Some(Color::White),
        "gray" | "grey" | "lightgray" | "lightgrey" => Some(Color::Gray),
        "darkgray" | "darkgrey" => Some(Color::DarkGray),
        "lightred" => Some(Color::LightRed),
        "lightgreen" => Some(Color::LightGreen),
        "lightyellow" => Some(Color::LightYellow),
        "lightblue" => Some(Color::LightBlue),
        "lightmagenta" => Some(Color::LightMagenta),
        "lightcyan" => Some(Color::LightCyan),
        _ => None,
    };

    named
        .or_else(|| s.strip_prefix('#').and_then(parse_hex_color))
        .or_else(|| {
            s.strip_prefix("rgb(")
                .and_then(|rest| rest.strip_suffix(')'))
                .and_then(parse_rgb_components)
        })
        .unwrap_or(Color::White)
}

/// RRGGBB or RGB, without the leading '#'
fn parse_hex_color(hex: &str) -> Option<Color> {
    if !hex.is_ascii() {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        6 => Some(Color::Rgb(channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?)),
        3 => {
            // 0xF -> 0xFF
            let short = |s: &str| channel(s).map(|v| (v << 4) | v);
            Some(Color::Rgb(short(&hex[0..1])?, short(&hex[1..2])?, short(&hex[2..3])?))
        }
        _ => None,
    }
}

fn parse_rgb_components(inner: &str) -> Option<Color> {
    let parts: Vec<u8> = inner
        .split(',')
        .map(|p| p.trim().parse::<u8>())
        .collect::<Result<_, _>>()
        .ok()?;
    match parts.as_slice() {
        [r, g, b] => Some(Color::Rgb(*r, *g, *b)),
        _ => None,
    }
}

/// Relative luminance (WCAG formula), 0.0 dark to 1.0 light
fn calculate_luminance(r: u8, g: u8, b: u8) -> f64 {
    let linear = |c: u8| {
        let c = c as f64 / 255.0;
        if c <= 0.03928 { c / 12.92 } else { ((c + 0.055) / 1.055).powf(2.4) }
    };
    0.2126 * linear(r) + 0.7152 * linear(g) + 0.0722 * linear(b)
}

/// Black or white text, whichever reads better on `background`
pub fn get_contrast_text_color(background: Color) -> Color {
    let dark = match background {
        Color::Rgb(r, g, b) => calculate_luminance(r, g, b) < 0.5,
        other => matches!(other, Color::Black | Color::Blue | Color::Magenta | Color::Red | Color::DarkGray),
    };
    if dark { Color::White } else { Color::Black }
}

/// Configured display color for a task category
pub fn category_color(config: &Config, category: Category) -> Color {
    parse_color(config.colors.for_category(category))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_notations() {
        assert_eq!(parse_color("Red"), Color::Red);
        assert_eq!(parse_color("#ff6b6b"), Color::Rgb(0xff, 0x6b, 0x6b));
        assert_eq!(parse_color("#0f0"), Color::Rgb(0, 0xff, 0));
        assert_eq!(parse_color("rgb(1, 2, 3)"), Color::Rgb(1, 2, 3));
        assert_eq!(parse_color("#12"), Color::White);
        assert_eq!(parse_color("rgb(1,2)"), Color::White);
        assert_eq!(parse_color("nonsense"), Color::White);
    }

    #[test]
    fn contrast_text() {
        assert_eq!(get_contrast_text_color(Color::Rgb(0x6c, 0x5c, 0xe7)), Color::White);
        assert_eq!(get_contrast_text_color(Color::Rgb(0x95, 0xe1, 0xd3)), Color::Black);
        assert_eq!(get_contrast_text_color(Color::Blue), Color::White);
        assert_eq!(get_contrast_text_color(Color::Yellow), Color::Black);
    }

    #[test]
    fn category_colors_come_from_config() {
        let config = Config::default();
        assert_eq!(category_color(&config, Category::Work), Color::Rgb(0xff, 0x6b, 0x6b));
        assert_eq!(category_color(&config, Category::Study), Color::Rgb(0x4e, 0xcd, 0xc4));
    }
}
