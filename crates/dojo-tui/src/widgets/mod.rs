//! Rendering helpers shared by the dashboard screen and the app overlays.

pub mod course_table;
pub mod drawer;
pub mod filter_bar;
pub mod overlay;

use ratatui::layout::Rect;

/// A `width` × `height` rectangle centred in `area`, shrunk to fit.
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_stays_inside_small_areas() {
        let area = Rect::new(0, 0, 20, 6);
        let r = centered_rect(area, 60, 22);
        assert_eq!(r, Rect::new(2, 1, 16, 4));
    }
}
