//! Parity Grid Widget
//!
//! Draws the module tracker: toggleable elements and category-coloured
//! milestone indicators at their configured positions.
//!
//! ```text
//!  ●0 · · · [P] · · · ○1
//!   ·         ·         ·
//! [T] · · · ●4  · · · [T]
//!   ·         ·         ·
//!  ○2 · · · [P] · · · ○3
//! ● complete  ■ Pedagogy  ■ Tech
//! Active progress in 2 competency areas.
//! ```

use ratatui::{buffer::Buffer, layout::Rect, style::Modifier, widgets::Widget};

use crate::config::GridPosition;
use crate::engine::{IndicatorCategory, ParityView};
use crate::tui::theme::{icons, CampusTheme};

/// Rows reserved below the grid (legend + caption)
const FOOTER_ROWS: u16 = 2;

pub struct ParityGrid<'a> {
    view: &'a ParityView,
    theme: &'a CampusTheme,
    cursor: Option<u8>,
}

impl<'a> ParityGrid<'a> {
    pub fn new(view: &'a ParityView, theme: &'a CampusTheme) -> Self {
        Self {
            view,
            theme,
            cursor: None,
        }
    }

    /// Highlight the element under the keyboard cursor
    pub fn cursor(mut self, element: Option<u8>) -> Self {
        self.cursor = element;
        self
    }
}

/// Map a percent position to the left edge of a token of `width` cells
fn place(grid: Rect, pos: GridPosition, width: u16) -> (u16, u16) {
    let span_x = u32::from(grid.width.saturating_sub(1));
    let span_y = u32::from(grid.height.saturating_sub(1));
    let cx = grid.x + (u32::from(pos.x.min(100)) * span_x / 100) as u16;
    let cy = grid.y + (u32::from(pos.y.min(100)) * span_y / 100) as u16;

    let max_x = (grid.x + grid.width).saturating_sub(width);
    let x = cx.saturating_sub(width / 2).clamp(grid.x, max_x.max(grid.x));
    (x, cy)
}

impl Widget for ParityGrid<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < FOOTER_ROWS + 3 || area.width < 12 {
            return;
        }

        let grid = Rect {
            height: area.height - FOOTER_ROWS,
            ..area
        };

        // Faint cross through the centre
        let mid_y = grid.y + grid.height / 2;
        let mid_x = grid.x + grid.width / 2;
        for x in (grid.x..grid.x + grid.width).step_by(2) {
            buf.set_string(x, mid_y, "·", self.theme.dimmed());
        }
        for y in grid.y..grid.y + grid.height {
            buf.set_string(mid_x, y, "·", self.theme.dimmed());
        }

        for indicator in &self.view.indicators {
            let text = format!("[{}]", indicator.category.tag());
            let (x, y) = place(grid, indicator.position, text.len() as u16);
            buf.set_string(
                x,
                y,
                &text,
                self.theme.indicator(indicator.category, indicator.active),
            );
        }

        for element in &self.view.elements {
            let glyph = if element.toggled {
                icons::ELEMENT_ON
            } else {
                icons::ELEMENT_OFF
            };
            let text = format!("{}{}", glyph, element.id);
            let (x, y) = place(grid, element.position, 2);

            let mut style = self.theme.element(element.toggled);
            if self.cursor == Some(element.id) {
                style = style.add_modifier(Modifier::REVERSED);
            }
            buf.set_string(x, y, &text, style);
        }

        // Legend
        let legend_y = grid.y + grid.height;
        let mut x = area.x;
        for (text, style) in [
            (
                format!("{} complete  ", icons::ELEMENT_ON),
                self.theme.accent(),
            ),
            (
                format!("■ {}  ", IndicatorCategory::Pedagogy.name()),
                self.theme.indicator(IndicatorCategory::Pedagogy, true),
            ),
            (
                format!("■ {}", IndicatorCategory::Tech.name()),
                self.theme.indicator(IndicatorCategory::Tech, true),
            ),
        ] {
            let (next_x, _) = buf.set_stringn(
                x,
                legend_y,
                &text,
                (area.x + area.width).saturating_sub(x) as usize,
                style,
            );
            x = next_x;
        }

        buf.set_stringn(
            area.x,
            legend_y + 1,
            &self.view.caption,
            area.width as usize,
            self.theme.text().add_modifier(Modifier::ITALIC),
        );
    }
}
