use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Row, Scrollbar, ScrollbarOrientation, ScrollbarState, Table, TableState};
use ratatui::Frame;
use crate::models::Task;
use crate::utils::format_task_time;
use crate::Config;
use crate::tui::widgets::color::{category_color, get_contrast_text_color, parse_color};

const HEADERS: [&str; 5] = ["Name", "Time", "Category", "Priority", "Status"];

fn status_text(task: &Task) -> &'static str {
    if task.is_completed() { "✓ Done" } else { "… Pending" }
}

/// Tasks in display order, one row each, colored by category
pub fn render_task_list(f: &mut Frame, area: Rect, tasks: &[Task], state: &mut TableState, config: &Config) {
    let highlight_bg = parse_color(&config.theme.highlight_bg);
    let highlight_fg = if config.theme.highlight_fg.is_empty() {
        get_contrast_text_color(highlight_bg)
    } else {
        parse_color(&config.theme.highlight_fg)
    };

    let header = Row::new(HEADERS.iter().map(|h| Cell::from(*h)))
        .style(Style::default().add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = tasks
        .iter()
        .map(|task| {
            let mut style = Style::default().fg(category_color(config, task.category()));
            if task.is_completed() {
                style = style.add_modifier(Modifier::DIM);
            }
            Row::new(vec![
                Cell::from(task.name().to_string()),
                Cell::from(format_task_time(task.time())),
                Cell::from(task.category().label()),
                Cell::from(task.priority().label()),
                Cell::from(status_text(task)),
            ])
            .style(style)
        })
        .collect();

    // Split area to reserve space for scrollbar
    let areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);
    let table_area = areas[0];
    let scrollbar_area = areas[1];

    let widths = [
        Constraint::Min(12),
        Constraint::Length(16),
        Constraint::Length(9),
        Constraint::Length(8),
        Constraint::Length(10),
    ];
    let title = format!("Tasks ({})", tasks.len());
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title))
        .style(Style::default().fg(parse_color(&config.theme.fg)))
        .row_highlight_style(Style::default().fg(highlight_fg).bg(highlight_bg))
        .highlight_symbol("> ");

    f.render_stateful_widget(table, table_area, state);

    // Borders plus the header row
    let visible_rows = table_area.height.saturating_sub(3) as usize;
    if tasks.len() > visible_rows && scrollbar_area.width > 0 && table_area.height > 3 {
        let scrollbar_inner_area = Rect::new(
            scrollbar_area.x,
            table_area.y + 2,
            scrollbar_area.width,
            table_area.height.saturating_sub(3),
        );
        let mut scrollbar_state = ScrollbarState::new(tasks.len())
            .viewport_content_length(visible_rows)
            .position(state.selected().unwrap_or(0));
        let scrollbar = Scrollbar::default()
            .orientation(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("↑"))
            .end_symbol(Some("↓"))
            .track_symbol(Some("│"))
            .thumb_symbol("█");
        f.render_stateful_widget(scrollbar, scrollbar_inner_area, &mut scrollbar_state);
    }
}
