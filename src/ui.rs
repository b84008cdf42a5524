//! Shared rendering helpers

use ratatui::{prelude::*, widgets::*};

use crate::messages::RenderState;
use crate::models::ActivityLevel;

/// Activity log color
pub fn activity_color(level: ActivityLevel) -> Color {
    match level {
        ActivityLevel::Info => Color::Gray,
        ActivityLevel::Success => Color::Green,
        ActivityLevel::Error => Color::Red,
    }
}

/// Activity log line prefix
pub fn activity_marker(level: ActivityLevel) -> &'static str {
    match level {
        ActivityLevel::Info => "--",
        ActivityLevel::Success => "ok",
        ActivityLevel::Error => "!!",
    }
}

/// Bordered panel, highlighted when focused
pub fn panel<'a>(title: impl Into<Line<'a>>, is_focused: bool) -> Block<'a> {
    let border_style = if is_focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Cyan)
    };

    Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title)
}

/// Text shown in the gallery when there is nothing to list
pub fn gallery_placeholder(state: &RenderState) -> &'static str {
    if state.is_fetching {
        "Loading GIFs..."
    } else if !state.gifs_loaded {
        "Could not load GIFs. Press 'r' to retry."
    } else {
        "No GIFs yet. Press 'e' to add the first one."
    }
}

/// Column of the text cursor in a bordered single-line input
pub fn input_cursor_x(area: Rect, cursor_position: usize) -> u16 {
    let max_x = area.x + area.width.saturating_sub(2);
    let offset = u16::try_from(cursor_position).unwrap_or(u16::MAX);
    area.x.saturating_add(1).saturating_add(offset).min(max_x)
}

/// Rect of the given percentage size centered in `r`
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_is_inside() {
        let outer = Rect::new(0, 0, 100, 50);
        let inner = centered_rect(60, 40, outer);
        assert_eq!(inner.width, 60);
        assert_eq!(inner.height, 20);
        assert_eq!(inner.x, 20);
        assert_eq!(inner.y, 15);
    }

    #[test]
    fn test_cursor_is_clamped_to_the_input() {
        let area = Rect::new(4, 2, 30, 3);
        assert_eq!(input_cursor_x(area, 0), 5);
        assert_eq!(input_cursor_x(area, 10), 15);
        assert_eq!(input_cursor_x(area, 70_000), 32);
        assert_eq!(input_cursor_x(area, usize::MAX), 32);
    }

    #[test]
    fn test_gallery_placeholder_after_failed_load() {
        let mut state = RenderState::default();
        assert!(gallery_placeholder(&state).contains("'r'"));

        state.is_fetching = true;
        assert_eq!(gallery_placeholder(&state), "Loading GIFs...");

        state.is_fetching = false;
        state.gifs_loaded = true;
        assert!(gallery_placeholder(&state).contains("'e'"));
    }

    #[test]
    fn test_errors_stand_out() {
        assert_eq!(activity_color(ActivityLevel::Error), Color::Red);
        assert_ne!(activity_marker(ActivityLevel::Error), activity_marker(ActivityLevel::Info));
    }
}
