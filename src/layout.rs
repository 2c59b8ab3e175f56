//! Layout calculations for the dialog overlay

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use unicode_width::UnicodeWidthStr;

/// Narrowest text column a dialog shrinks to (terminal permitting)
pub const MIN_TEXT_WIDTH: u16 = 20;
/// Widest text column before content wraps
pub const MAX_TEXT_WIDTH: u16 = 56;

/// Screen areas of an open dialog
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DialogLayout {
    /// Full-screen overlay
    pub container: Rect,
    /// Bordered box holding everything else
    pub wrapper: Rect,
    pub title: Option<Rect>,
    pub content: Rect,
    pub footer: Rect,
    /// One rect per footer control, in the order the labels were given
    pub buttons: Vec<Rect>,
}

/// Calculate centered popup area
pub fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);

    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Terminal column width of a string
pub fn display_width(text: &str) -> u16 {
    u16::try_from(text.width()).unwrap_or(u16::MAX)
}

/// Width of a footer control rendered as `[ label ]`
pub fn button_width(label: &str) -> u16 {
    display_width(label).saturating_add(4)
}

/// Rows needed to show `text` wrapped at `width` columns
pub fn wrapped_height(text: &str, width: u16) -> u16 {
    text.split('\n')
        .map(|line| {
            if width == 0 {
                1
            } else {
                display_width(line).div_ceil(width).max(1)
            }
        })
        .fold(0u16, u16::saturating_add)
}

/// Calculate dialog layout
///
/// The wrapper is sized to its widest line (title, content or footer),
/// clamped to `MIN_TEXT_WIDTH..=MAX_TEXT_WIDTH` and to the screen, then
/// centered. Footer controls are right-aligned, one column apart.
pub fn calculate_dialog_layout(
    area: Rect,
    title: Option<&str>,
    content: &str,
    labels: &[&str],
) -> DialogLayout {
    let footer_width = labels
        .iter()
        .map(|label| button_width(label))
        .fold(0u16, u16::saturating_add)
        .saturating_add(u16::try_from(labels.len().saturating_sub(1)).unwrap_or(0));

    let widest = content
        .split('\n')
        .map(display_width)
        .chain(title.map(display_width))
        .chain(std::iter::once(footer_width))
        .max()
        .unwrap_or(0);

    let text_width = widest
        .clamp(MIN_TEXT_WIDTH, MAX_TEXT_WIDTH)
        .min(area.width.saturating_sub(4));
    let title_height = u16::from(title.is_some());
    let content_height = wrapped_height(content, text_width);

    // Border plus one column of padding on each side; border rows plus a
    // blank row above the footer.
    let wrapper = centered_popup(
        area,
        text_width + 4,
        title_height
            .saturating_add(content_height)
            .saturating_add(4),
    );
    let inner = Rect::new(
        wrapper.x.saturating_add(2),
        wrapper.y.saturating_add(1),
        wrapper.width.saturating_sub(4),
        wrapper.height.saturating_sub(2),
    );

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(title_height),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);
    let footer = rows[3];

    let mut right = footer.x + footer.width;
    let mut buttons = Vec::with_capacity(labels.len());
    for label in labels.iter().rev() {
        let width = button_width(label).min(right.saturating_sub(footer.x));
        let x = right - width;
        buttons.push(Rect::new(x, footer.y, width, footer.height));
        right = x.saturating_sub(1).max(footer.x);
    }
    buttons.reverse();

    DialogLayout {
        container: area,
        wrapper,
        title: title.map(|_| rows[0]),
        content: rows[1],
        footer,
        buttons,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_popup_respects_offset() {
        let area = Rect::new(10, 5, 40, 20);
        let popup = centered_popup(area, 20, 10);
        assert_eq!(popup, Rect::new(20, 10, 20, 10));

        let clamped = centered_popup(area, 100, 100);
        assert_eq!(clamped, area);
    }

    #[test]
    fn test_wrapped_height() {
        assert_eq!(wrapped_height("short", 20), 1);
        assert_eq!(wrapped_height("a\nb\n\nc", 20), 4);
        assert_eq!(wrapped_height(&"x".repeat(45), 20), 3);
        assert_eq!(wrapped_height("anything", 0), 1);
    }

    #[test]
    fn test_dialog_layout_places_buttons_right_aligned() {
        let area = Rect::new(0, 0, 80, 24);
        let layout = calculate_dialog_layout(area, Some("confirm"), "Proceed?", &["cancel", "ok"]);

        assert_eq!(layout.container, area);
        assert_eq!(layout.buttons.len(), 2);
        let (cancel, ok) = (layout.buttons[0], layout.buttons[1]);
        assert_eq!(cancel.width, 10);
        assert_eq!(ok.width, 6);
        assert_eq!(ok.x + ok.width, layout.footer.x + layout.footer.width);
        assert_eq!(cancel.x + cancel.width + 1, ok.x);
        assert_eq!(cancel.y, layout.footer.y);

        // wrapper is centered and holds every region
        assert_eq!(layout.wrapper.x, (80 - layout.wrapper.width) / 2);
        assert!(layout.title.is_some());
        assert!(layout.content.y > layout.wrapper.y);
        assert!(layout.footer.y < layout.wrapper.y + layout.wrapper.height);
    }

    #[test]
    fn test_dialog_layout_without_title() {
        let area = Rect::new(0, 0, 80, 24);
        let layout = calculate_dialog_layout(area, None, "Saved.", &["close"]);

        assert!(layout.title.is_none());
        assert_eq!(layout.wrapper.height, 5);
        assert_eq!(layout.wrapper.width, MIN_TEXT_WIDTH + 4);
    }

    #[test]
    fn test_dialog_layout_wraps_long_content() {
        let area = Rect::new(0, 0, 100, 40);
        let content = "word ".repeat(40);
        let layout = calculate_dialog_layout(area, Some("alert"), &content, &["close"]);

        assert_eq!(layout.wrapper.width, MAX_TEXT_WIDTH + 4);
        assert_eq!(layout.content.height, wrapped_height(&content, MAX_TEXT_WIDTH));
    }

    #[test]
    fn test_dialog_layout_tiny_screen() {
        let area = Rect::new(0, 0, 3, 2);
        let layout = calculate_dialog_layout(area, Some("confirm"), "Proceed?", &["cancel", "ok"]);
        assert!(layout.wrapper.width <= 3);
        assert!(layout.wrapper.height <= 2);
    }
}
