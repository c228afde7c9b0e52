use ratatui::Frame;
use ratatui::widgets::{Block, Borders};
use ratatui::style::Style;
use ratatui::layout::Position;
use crate::tui::app::Mode;
use crate::tui::{App, Layout};
use crate::tui::widgets::{
    task_list::render_task_list,
    item_view::render_item_view,
    progress::render_progress,
    status_bar::render_status_bar,
    help::render_help,
    form::render_task_form,
    export_prompt::render_export_prompt,
    notice::render_notice,
    color::parse_color,
};

pub fn render(f: &mut Frame, app: &mut App, layout: &Layout) {
    let fg_color = parse_color(&app.config.theme.fg);
    let bg_color = parse_color(&app.config.theme.bg);
    let outer_block = Block::default()
        .borders(Borders::ALL)
        .title("dayplan")
        .title_alignment(ratatui::layout::Alignment::Center)
        .style(Style::default().fg(fg_color).bg(bg_color));
    f.render_widget(outer_block, f.area());

    let mut cursor = None;
    if app.mode == Mode::Create {
        cursor = render_task_form(f, layout.content_area, &app.form, &app.config);
    } else {
        render_task_list(f, layout.list_area, &app.rows, &mut app.list_state, &app.config);
        if app.show_details && layout.details_area.width > 0 {
            render_item_view(f, layout.details_area, app.selected_task(), &app.config);
        }
    }

    render_progress(
        f,
        layout.progress_area,
        app.completed_count,
        app.rows.len(),
        app.completion_ratio,
        &app.config,
    );

    let hints = app.key_hints();
    render_status_bar(f, layout.status_area, app.status.message.as_ref(), &hints, &app.config);

    match app.mode {
        Mode::Export => {
            cursor = render_export_prompt(f, layout.inner_area, &app.export_input, &app.config);
        }
        Mode::Help => render_help(f, layout.inner_area, &app.config),
        Mode::View | Mode::Create => {}
    }

    // Notices sit above everything and hide the cursor while open
    if let Some(notice) = app.current_notice() {
        render_notice(f, layout.inner_area, notice, app.notices.len(), &app.config);
        cursor = None;
    }

    if let Some((x, y)) = cursor {
        f.set_cursor_position(Position::new(x, y));
    }
}
