//! Campus Theme - Visual Design System
//!
//! Warm stone neutrals with a gold accent, blue/red milestone categories and
//! a green "qualified" state.

use ratatui::style::{Color, Modifier, Style};

use crate::engine::IndicatorCategory;

/// Campus color palette
#[derive(Debug, Clone)]
pub struct CampusTheme {
    // Primary palette
    pub gold: Color,
    pub stone_dark: Color,
    pub stone_mid: Color,
    pub stone_light: Color,
    pub paper: Color,

    // Category colors
    pub pedagogy_blue: Color,
    pub tech_red: Color,

    // Status colors
    pub qualified_green: Color,
    pub warning_orange: Color,

    // Dimmed versions
    pub dim_gold: Color,
    pub inactive: Color,
}

impl Default for CampusTheme {
    fn default() -> Self {
        Self {
            // Primary palette
            gold: Color::Rgb(197, 160, 89),         // #C5A059
            stone_dark: Color::Rgb(41, 37, 36),     // #292524 stone-800
            stone_mid: Color::Rgb(120, 113, 108),   // #78716C stone-500
            stone_light: Color::Rgb(214, 211, 209), // #D6D3D1 stone-300
            paper: Color::Rgb(245, 244, 240),       // #F5F4F0

            // Category colors
            pedagogy_blue: Color::Rgb(59, 130, 246), // #3B82F6
            tech_red: Color::Rgb(239, 68, 68),       // #EF4444

            // Status colors
            qualified_green: Color::Rgb(34, 197, 94), // #22C55E
            warning_orange: Color::Rgb(210, 153, 34), // #D29922

            // Dimmed versions
            dim_gold: Color::Rgb(120, 98, 55),
            inactive: Color::Rgb(87, 83, 78), // #57534E stone-600
        }
    }
}

impl CampusTheme {
    pub fn new() -> Self {
        Self::default()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Category Colors
    // ─────────────────────────────────────────────────────────────────────

    pub fn category_color(&self, category: IndicatorCategory) -> Color {
        match category {
            IndicatorCategory::Pedagogy => self.pedagogy_blue,
            IndicatorCategory::Tech => self.tech_red,
        }
    }

    /// Indicator style: category colour when lit, muted otherwise
    pub fn indicator(&self, category: IndicatorCategory, active: bool) -> Style {
        if active {
            Style::default()
                .fg(self.paper)
                .bg(self.category_color(category))
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.stone_light).bg(self.inactive)
        }
    }

    /// Element style: gold-on-dark when toggled
    pub fn element(&self, toggled: bool) -> Style {
        if toggled {
            Style::default()
                .fg(self.gold)
                .bg(self.stone_dark)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.stone_light)
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Styles
    // ─────────────────────────────────────────────────────────────────────

    pub fn text(&self) -> Style {
        Style::default().fg(self.paper)
    }

    pub fn dimmed(&self) -> Style {
        Style::default().fg(self.stone_mid)
    }

    pub fn header(&self) -> Style {
        Style::default().fg(self.gold).add_modifier(Modifier::BOLD)
    }

    pub fn accent(&self) -> Style {
        Style::default().fg(self.gold)
    }

    pub fn success(&self) -> Style {
        Style::default()
            .fg(self.qualified_green)
            .add_modifier(Modifier::BOLD)
    }

    pub fn warning(&self) -> Style {
        Style::default().fg(self.warning_orange)
    }

    /// Panel border (focused or not)
    pub fn border(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.gold).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.inactive)
        }
    }

    /// Selector button style
    pub fn button(&self, selected: bool) -> Style {
        if selected {
            Style::default()
                .fg(self.stone_dark)
                .bg(self.gold)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.stone_mid)
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Icons and Symbols
// ─────────────────────────────────────────────────────────────────────────────

/// UI Icons used throughout the TUI
pub mod icons {
    // Elements
    pub const ELEMENT_ON: &str = "●";
    pub const ELEMENT_OFF: &str = "○";

    // Stage icons (keyed by config token)
    pub const GRID: &str = "▦";
    pub const BOOK: &str = "▤";
    pub const AWARD: &str = "✦";
    pub const UNKNOWN: &str = "?";

    pub const CHART: &str = "▥";

    pub const BAR_FULL: char = '█';

    /// Map a stage icon token to a glyph
    pub fn stage_icon(token: &str) -> &'static str {
        match token {
            "grid" => GRID,
            "book" => BOOK,
            "award" => AWARD,
            _ => UNKNOWN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_defaults() {
        let theme = CampusTheme::new();
        assert_eq!(theme.gold, Color::Rgb(197, 160, 89));
        assert_eq!(theme.pedagogy_blue, Color::Rgb(59, 130, 246));
    }

    #[test]
    fn test_category_colors_differ() {
        let theme = CampusTheme::new();
        assert_ne!(
            theme.category_color(IndicatorCategory::Pedagogy),
            theme.category_color(IndicatorCategory::Tech)
        );
    }

    #[test]
    fn test_indicator_style_active_vs_inactive() {
        let theme = CampusTheme::new();
        let lit = theme.indicator(IndicatorCategory::Tech, true);
        let off = theme.indicator(IndicatorCategory::Tech, false);
        assert_eq!(lit.bg, Some(theme.tech_red));
        assert_eq!(off.bg, Some(theme.inactive));
    }

    #[test]
    fn test_border_focused_vs_unfocused() {
        let theme = CampusTheme::new();
        assert_ne!(theme.border(true).fg, theme.border(false).fg);
    }

    #[test]
    fn test_stage_icon_tokens() {
        assert_eq!(icons::stage_icon("grid"), icons::GRID);
        assert_eq!(icons::stage_icon("award"), icons::AWARD);
        assert_eq!(icons::stage_icon("rocket"), icons::UNKNOWN);
    }
}
