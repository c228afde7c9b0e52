use ratatui::layout::{Constraint, Direction, Layout as RatLayout, Rect};

pub struct Layout {
    pub inner_area: Rect, // Area inside the outer border
    pub content_area: Rect, // List and details together, used by the form
    pub list_area: Rect,
    pub details_area: Rect,
    pub progress_area: Rect,
    pub status_area: Rect,
}

impl Layout {
    /// Minimum terminal dimensions required for the application
    /// Width: the five task columns need about 56 columns plus borders
    /// Height: 2 outer borders + 5 list rows + 3 progress + 1 status
    pub const MIN_WIDTH: u16 = 58;
    pub const MIN_HEIGHT: u16 = 10;

    /// Share of the content width given to the task list when details are shown
    const LIST_PERCENT: u16 = 62;

    pub fn calculate(size: Rect, show_details: bool) -> Self {
        let width = size.width.max(Self::MIN_WIDTH + 2);
        let height = size.height.max(Self::MIN_HEIGHT + 2);
        let size = Rect::new(size.x, size.y, width, height);

        let inner_area = Rect::new(
            size.x + 1,
            size.y + 1,
            size.width.saturating_sub(2),
            size.height.saturating_sub(2),
        );

        let vertical = RatLayout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),    // Task list + details
                Constraint::Length(3), // Progress gauge
                Constraint::Length(1), // Status
            ])
            .split(inner_area);

        let list_percent = if show_details { Self::LIST_PERCENT } else { 100 };
        let horizontal = RatLayout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(list_percent),
                Constraint::Min(0),
            ])
            .split(vertical[0]);

        Self {
            inner_area,
            content_area: vertical[0],
            list_area: horizontal[0],
            details_area: horizontal[1],
            progress_area: vertical[1],
            status_area: vertical[2],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn details_share_the_content_row() {
        let layout = Layout::calculate(Rect::new(0, 0, 100, 30), true);
        assert_eq!(layout.status_area.height, 1);
        assert_eq!(layout.progress_area.height, 3);
        assert_eq!(layout.list_area.width + layout.details_area.width, layout.content_area.width);
        assert!(layout.details_area.width > 0);
    }

    #[test]
    fn hidden_details_give_list_full_width() {
        let layout = Layout::calculate(Rect::new(0, 0, 100, 30), false);
        assert_eq!(layout.list_area.width, layout.content_area.width);
        assert_eq!(layout.details_area.width, 0);
    }

    #[test]
    fn small_terminals_are_clamped_to_minimum() {
        let layout = Layout::calculate(Rect::new(0, 0, 10, 5), true);
        assert_eq!(layout.inner_area.width, Layout::MIN_WIDTH);
        assert_eq!(layout.inner_area.height, Layout::MIN_HEIGHT);
    }
}
