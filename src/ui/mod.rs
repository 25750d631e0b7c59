pub mod cpu_memory;
pub mod disk;
pub mod footer;
pub mod gpu;
pub mod header;
pub mod network;
pub mod processes;
pub mod system_info;
pub mod theme;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::Paragraph;

use crate::app::App;
use crate::config::ThresholdsConfig;
use crate::system::snapshot::Sample;
use crate::ui::theme::Theme;

pub const HEADER_HEIGHT: u16 = 10;
pub const FOOTER_HEIGHT: u16 = 3;

/// Named screen areas, one per metrics category plus header and footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Regions {
    pub header: Rect,
    pub system_info: Rect,
    pub cpu_memory: Rect,
    pub gpu: Rect,
    pub network: Rect,
    pub processes: Rect,
    pub disk: Rect,
    pub footer: Rect,
}

impl Regions {
    pub fn split(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(area);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
            .split(rows[1]);

        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
            ])
            .split(columns[0]);

        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Ratio(1, 4),
                Constraint::Ratio(2, 4),
                Constraint::Ratio(1, 4),
            ])
            .split(columns[1]);

        Regions {
            header: rows[0],
            system_info: left[0],
            cpu_memory: left[1],
            gpu: left[2],
            network: right[0],
            processes: right[1],
            disk: right[2],
            footer: rows[2],
        }
    }

    /// Everything between header and footer.
    pub fn main(&self) -> Rect {
        self.system_info.union(self.disk)
    }
}

pub fn draw(frame: &mut Frame, app: &App) {
    render_frame(
        frame,
        app.sample.as_ref(),
        &app.thresholds,
        app.last_error.as_deref(),
        &app.theme,
    );
}

/// Renders one complete frame; a pure function of its inputs.
pub fn render_frame(
    frame: &mut Frame,
    sample: Option<&Sample>,
    thresholds: &ThresholdsConfig,
    last_error: Option<&str>,
    theme: &Theme,
) {
    let _span = tracing::trace_span!("ui.render_frame").entered();

    let regions = Regions::split(frame.area());

    header::render(frame, regions.header, theme);

    match sample {
        Some(sample) => {
            system_info::render(frame, regions.system_info, sample, theme);
            cpu_memory::render(frame, regions.cpu_memory, sample, thresholds, theme);
            gpu::render(frame, regions.gpu, sample, thresholds, theme);
            network::render(frame, regions.network, sample, theme);
            processes::render(frame, regions.processes, sample, thresholds, theme);
            disk::render(frame, regions.disk, sample, thresholds, theme);
        }
        None => {
            let waiting = Paragraph::new("Collecting metrics...")
                .alignment(Alignment::Center)
                .style(Style::default().fg(theme.notice));
            frame.render_widget(waiting, regions.main());
        }
    }

    footer::render(frame, regions.footer, last_error, theme);
}
