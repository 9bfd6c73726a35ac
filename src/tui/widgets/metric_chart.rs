//! Metric Chart Widget
//!
//! Selector buttons over a two-bar, period-over-period chart. Bar heights
//! come straight from the view's [`BarGeometry`](crate::engine::BarGeometry).

use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};

use crate::engine::MetricView;
use crate::tui::theme::{icons, CampusTheme};

const MAX_BAR_WIDTH: u16 = 9;
const BAR_GAP: u16 = 3;

pub struct MetricChart<'a> {
    view: &'a MetricView,
    theme: &'a CampusTheme,
}

impl<'a> MetricChart<'a> {
    pub fn new(view: &'a MetricView, theme: &'a CampusTheme) -> Self {
        Self { view, theme }
    }
}

/// Whole rows for a bar; a non-zero fraction always gets at least one row
fn bar_rows(fraction: f64, available: u16) -> u16 {
    let rows = (fraction.clamp(0.0, 1.0) * f64::from(available)).round() as u16;
    if fraction > 0.0 {
        rows.max(1).min(available)
    } else {
        0
    }
}

fn centered(x: u16, width: u16, text: &str) -> u16 {
    let len = text.chars().count() as u16;
    x + width.saturating_sub(len) / 2
}

struct Bar<'t> {
    fraction: f64,
    value: &'t str,
    period: &'t str,
    fill: Style,
    label: Style,
}

impl Widget for MetricChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 7 || area.width < 20 {
            return;
        }
        let right = area.x + area.width;

        // Row 0: selector buttons
        let mut x = area.x;
        for option in &self.view.options {
            let text = format!(" {} ", option.label);
            let (next_x, _) = buf.set_stringn(
                x,
                area.y,
                &text,
                right.saturating_sub(x) as usize,
                self.theme.button(option.selected),
            );
            x = next_x.saturating_add(1).min(right);
        }

        // Row 1: metric label
        let (next_x, _) = buf.set_stringn(
            area.x,
            area.y + 1,
            format!("{} {}", icons::CHART, self.view.label),
            area.width as usize,
            self.theme.header(),
        );
        buf.set_stringn(
            next_x,
            area.y + 1,
            " · YEAR OVER YEAR GROWTH",
            right.saturating_sub(next_x) as usize,
            self.theme.dimmed(),
        );

        // Chart rows: value label + bars + period label
        let period_y = area.y + area.height - 1;
        let bar_bottom = period_y - 1;
        let chart_top = area.y + 2;
        let available = bar_bottom.saturating_sub(chart_top);

        let bar_width = MAX_BAR_WIDTH.min(area.width.saturating_sub(BAR_GAP) / 2);
        let chart_width = bar_width * 2 + BAR_GAP;
        let x0 = area.x + (area.width - chart_width) / 2;

        let bars = [
            Bar {
                fraction: self.view.geometry.prior_fraction,
                value: &self.view.prior_display,
                period: &self.view.prior_period,
                fill: Style::default().fg(self.theme.stone_mid),
                label: self.theme.dimmed(),
            },
            Bar {
                fraction: self.view.geometry.current_fraction,
                value: &self.view.current_display,
                period: &self.view.current_period,
                fill: Style::default().fg(self.theme.gold),
                label: self.theme.accent(),
            },
        ];

        for (idx, bar) in bars.iter().enumerate() {
            let bx = x0 + idx as u16 * (bar_width + BAR_GAP);
            let rows = bar_rows(bar.fraction, available);

            let fill: String = std::iter::repeat(icons::BAR_FULL)
                .take(bar_width as usize)
                .collect();
            for r in 0..rows {
                buf.set_string(bx, bar_bottom - r, &fill, bar.fill);
            }

            let value_y = bar_bottom - rows;
            buf.set_stringn(
                centered(bx, bar_width, bar.value),
                value_y,
                bar.value,
                (bar_width + BAR_GAP - 1) as usize,
                bar.label,
            );
            buf.set_stringn(
                centered(bx, bar_width, bar.period),
                period_y,
                bar.period,
                bar_width as usize,
                bar.label,
            );
        }
    }
}
