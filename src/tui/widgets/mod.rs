//! TUI Widgets - UI Components
//!
//! Each widget is a stateless renderer that takes a view produced by the
//! engine and draws it into a ratatui buffer. No derivation logic lives here.
//!
//! - ParityGrid: module tracker with milestone indicators
//! - StagePipeline: certification pathway with progress dots
//! - MetricChart: metric selector with two-period bar chart

mod metric_chart;
mod parity_grid;
mod stage_pipeline;

pub use metric_chart::MetricChart;
pub use parity_grid::ParityGrid;
pub use stage_pipeline::StagePipeline;

#[cfg(test)]
pub(crate) mod test_support {
    use ratatui::buffer::Buffer;

    /// Convert buffer to string representation
    pub fn buffer_to_string(buffer: &Buffer) -> String {
        let mut result = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                result.push_str(buffer[(x, y)].symbol());
            }
            result.push('\n');
        }
        result
    }
}
