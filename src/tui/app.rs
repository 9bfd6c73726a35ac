//! TUI Application - Main entry point and run loop

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};

use super::events::{handle_key_event, poll_event, Action};
use super::state::{AppState, PanelFocus};
use super::theme::CampusTheme;
use super::widgets::{MetricChart, ParityGrid, StagePipeline};
use crate::config::DiagramConfig;
use crate::engine::{CyclicStageWidget, DerivedView, StageView};

/// Input poll timeout (~20 fps redraw)
const TICK_RATE_MS: u64 = 50;

/// TUI Application
pub struct TuiApp {
    config: DiagramConfig,
    state: AppState,
    theme: CampusTheme,
}

impl TuiApp {
    pub fn new(config: DiagramConfig) -> Self {
        Self {
            state: AppState::new(&config),
            theme: CampusTheme::new(),
            config,
        }
    }

    /// Run the TUI application
    ///
    /// The stage widget is mounted for the lifetime of the loop and
    /// unmounted before the terminal is restored, on success and on error.
    pub async fn run(mut self) -> anyhow::Result<()> {
        let stage = CyclicStageWidget::mount(&self.config.stages)?;
        let mut terminal = self.setup_terminal()?;

        let result = self.main_loop(&mut terminal, &stage).await;

        stage.unmount().await;
        self.restore_terminal(&mut terminal)?;

        result
    }

    /// Setup terminal for TUI
    fn setup_terminal(&self) -> anyhow::Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(terminal)
    }

    /// Restore terminal to normal state
    fn restore_terminal(
        &self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> anyhow::Result<()> {
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        Ok(())
    }

    /// Main event loop
    async fn main_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
        stage: &CyclicStageWidget,
    ) -> anyhow::Result<()> {
        let tick_rate = Duration::from_millis(TICK_RATE_MS);

        loop {
            self.state.tick();

            let stage_view = stage.view();
            terminal.draw(|frame| render_frame(frame, &self.state, &stage_view, &self.theme))?;

            if let Some(key) = poll_event(tick_rate)? {
                let action = handle_key_event(key, &mut self.state);
                tracing::trace!(?action, "key handled");
                if action == Action::Quit {
                    self.state.should_quit = true;
                }
            }

            if self.state.should_quit {
                break;
            }

            // Let the stage timer run between frames
            tokio::task::yield_now().await;
        }

        Ok(())
    }
}

/// Render the whole dashboard
pub fn render_frame(frame: &mut Frame, state: &AppState, stage: &StageView, theme: &CampusTheme) {
    let area = frame.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(12),   // Grid + chart
            Constraint::Length(6), // Stage pathway
            Constraint::Length(1), // Footer
        ])
        .split(area);

    render_header(frame, main_chunks[0], theme);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(main_chunks[1]);

    let parity_view = state.parity.view();
    let block = panel(" MODULE TRACKER ", state.focus == PanelFocus::Parity, theme);
    let inner = block.inner(top[0]);
    frame.render_widget(block, top[0]);
    frame.render_widget(
        ParityGrid::new(&parity_view, theme).cursor(
            state
                .cursor_element()
                .filter(|_| state.focus == PanelFocus::Parity),
        ),
        inner,
    );

    let metric_view = state.metric.view();
    let block = panel(" NETWORK EXPANSION ", state.focus == PanelFocus::Metric, theme);
    let inner = block.inner(top[1]);
    frame.render_widget(block, top[1]);
    frame.render_widget(MetricChart::new(&metric_view, theme), inner);

    let block = panel(
        " CERTIFICATION PATHWAY ",
        state.focus == PanelFocus::Stage,
        theme,
    );
    let inner = block.inner(main_chunks[2]);
    frame.render_widget(block, main_chunks[2]);
    frame.render_widget(
        StagePipeline::new(stage, theme).frame(state.frame),
        inner,
    );

    render_footer(frame, main_chunks[3], state, theme);
}

fn panel<'a>(title: &'a str, focused: bool, theme: &CampusTheme) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border(focused))
        .title(title)
}

fn render_header(frame: &mut Frame, area: Rect, theme: &CampusTheme) {
    let header = Line::from(vec![
        Span::styled("◆ INTERACTIVE DIAGRAMS", theme.header()),
        Span::raw("  │  "),
        Span::styled("Teaching network at a glance", theme.text()),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border(false));

    frame.render_widget(Paragraph::new(header).block(block), area);
}

fn render_footer(frame: &mut Frame, area: Rect, state: &AppState, theme: &CampusTheme) {
    let line = match &state.status {
        Some(message) => Line::from(Span::styled(message.as_str(), theme.warning())),
        None => Line::from(vec![
            Span::styled(" 0-9", theme.accent()),
            Span::styled(":toggle  ", theme.dimmed()),
            Span::styled("r", theme.accent()),
            Span::styled(":reset  ", theme.dimmed()),
            Span::styled("c/f/s ←/→", theme.accent()),
            Span::styled(":metric  ", theme.dimmed()),
            Span::styled("Tab", theme.accent()),
            Span::styled(":focus  ", theme.dimmed()),
            Span::styled("q", theme.accent()),
            Span::styled(":quit", theme.dimmed()),
        ]),
    };
    frame.render_widget(Paragraph::new(line), area);
}
