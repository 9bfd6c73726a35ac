//! Stage Pipeline Widget
//!
//! Certification pathway: three boxes joined by connectors, a stage caption
//! and a row of progress dots.
//!
//! ```text
//! [▦ Syllabus] → [▤ Training] → [? Qualified]
//!                 ─━──────────
//!          Stage 2/4 · Training
//!              ·  ━━━  ·  ·
//! ```

use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};

use crate::engine::{StageComponent, StageView};
use crate::tui::theme::{icons, CampusTheme};

const CONNECTOR: &str = " → ";

pub struct StagePipeline<'a> {
    view: &'a StageView,
    theme: &'a CampusTheme,
    /// Animation frame for the scanning line
    frame: u64,
}

impl<'a> StagePipeline<'a> {
    pub fn new(view: &'a StageView, theme: &'a CampusTheme) -> Self {
        Self {
            view,
            theme,
            frame: 0,
        }
    }

    pub fn frame(mut self, frame: u64) -> Self {
        self.frame = frame;
        self
    }

    fn box_text(&self, component: StageComponent, highlighted: bool) -> String {
        let glyph = match component {
            // The outcome stays a question mark until it is reached
            StageComponent::Qualified if !highlighted => icons::UNKNOWN,
            _ if highlighted && icons::stage_icon(&self.view.icon) != icons::UNKNOWN => {
                icons::stage_icon(&self.view.icon)
            }
            StageComponent::Qualified => icons::AWARD,
            StageComponent::Syllabus => icons::GRID,
            StageComponent::Training => icons::BOOK,
        };
        format!("[{} {}]", glyph, component.label())
    }

    fn box_style(&self, component: StageComponent, highlighted: bool) -> Style {
        match (component, highlighted) {
            (_, false) => self.theme.dimmed(),
            (StageComponent::Qualified, true) => self.theme.success(),
            (StageComponent::Training, true) => self.theme.header().bg(self.theme.stone_dark),
            (StageComponent::Syllabus, true) => self.theme.header(),
        }
    }
}

fn centered_x(area: Rect, width: usize) -> u16 {
    let width = width.min(area.width as usize) as u16;
    area.x + (area.width - width) / 2
}

impl Widget for StagePipeline<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 4 || area.width < 10 || self.view.components.is_empty() {
            return;
        }

        let boxes: Vec<(String, Style)> = self
            .view
            .components
            .iter()
            .map(|c| {
                (
                    self.box_text(c.component, c.highlighted),
                    self.box_style(c.component, c.highlighted),
                )
            })
            .collect();

        let total: usize = boxes.iter().map(|(t, _)| t.chars().count()).sum::<usize>()
            + CONNECTOR.chars().count() * self.view.connectors.len();

        // Row 0: boxes and connectors
        let right = area.x + area.width;
        let mut x = centered_x(area, total);
        let mut training_span = None;
        for (idx, (text, style)) in boxes.iter().enumerate() {
            let start = x;
            let (next_x, _) =
                buf.set_stringn(x, area.y, text, right.saturating_sub(x) as usize, *style);
            x = next_x;
            if self.view.components[idx].component == StageComponent::Training {
                training_span = Some((start, x.saturating_sub(start)));
            }

            if let Some(lit) = self.view.connectors.get(idx) {
                let style = if *lit {
                    self.theme.accent()
                } else {
                    self.theme.dimmed()
                };
                let (next_x, _) = buf.set_stringn(
                    x,
                    area.y,
                    CONNECTOR,
                    right.saturating_sub(x) as usize,
                    style,
                );
                x = next_x;
            }
        }

        // Row 1: scanning line under the training box
        if self.view.scanning {
            if let Some((start, width)) = training_span.filter(|(_, w)| *w > 0) {
                let sweep = (self.frame % u64::from(width)) as u16;
                for offset in 0..width {
                    let (symbol, style) = if offset == sweep {
                        ("━", self.theme.accent())
                    } else {
                        ("─", self.theme.dimmed())
                    };
                    buf.set_string(start + offset, area.y + 1, symbol, style);
                }
            }
        }

        // Row 2: caption
        let caption = format!(
            "Stage {}/{} · {}",
            self.view.index + 1,
            self.view.count,
            self.view.label
        );
        buf.set_stringn(
            centered_x(area, caption.chars().count()),
            area.y + 2,
            &caption,
            area.width as usize,
            self.theme.text(),
        );

        // Row 3: progress dots
        let dots: Vec<(&str, Style)> = self
            .view
            .dots
            .iter()
            .map(|current| {
                if *current {
                    ("━━━", self.theme.accent())
                } else {
                    ("·", self.theme.dimmed())
                }
            })
            .collect();
        let dots_width: usize = dots.iter().map(|(d, _)| d.chars().count() + 2).sum();
        let mut x = centered_x(area, dots_width);
        for (dot, style) in dots {
            let (next_x, _) = buf.set_stringn(
                x,
                area.y + 3,
                format!(" {} ", dot),
                right.saturating_sub(x) as usize,
                style,
            );
            x = next_x;
        }
    }
}
