use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Cell, Paragraph, Row, Table};

use crate::config::ThresholdsConfig;
use crate::format::truncate_unicode;
use crate::system::process::ProcessEntry;
use crate::system::snapshot::{Metric, Sample};
use crate::ui::theme::{Level, Theme};

const NAME_WIDTH: usize = 20;
const STATUS_WIDTH: usize = 10;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    sample: &Sample,
    thresholds: &ThresholdsConfig,
    theme: &Theme,
) {
    let block = theme.panel("Top Processes");

    let processes = match &sample.processes {
        Metric::Available(list) => list,
        Metric::Unavailable(reason) => {
            let msg = Paragraph::new(format!("Process list unavailable: {reason}"))
                .style(Style::default().fg(theme.error))
                .block(block);
            frame.render_widget(msg, area);
            return;
        }
    };

    let header = Row::new(["PID", "Process", "CPU%", "MEM%", "Status"])
        .style(
            Style::default()
                .fg(theme.title)
                .add_modifier(Modifier::BOLD),
        );

    let rows = processes
        .iter()
        .map(|p| process_row(p, thresholds, theme));

    let table = Table::new(
        rows,
        [
            Constraint::Length(8),
            Constraint::Length(NAME_WIDTH as u16),
            Constraint::Length(7),
            Constraint::Length(7),
            Constraint::Length(STATUS_WIDTH as u16),
        ],
    )
    .header(header)
    .column_spacing(1)
    .block(block);
    frame.render_widget(table, area);
}

fn process_row(p: &ProcessEntry, thresholds: &ThresholdsConfig, theme: &Theme) -> Row<'static> {
    let cpu_color = Level::of(p.cpu_percent as f64, thresholds.process_cpu).muted_color();
    let mem_color = Level::of(p.memory_percent as f64, thresholds.process_memory).muted_color();

    Row::new(vec![
        Cell::from(p.pid.to_string()).style(Style::default().fg(theme.pid)),
        Cell::from(truncate_unicode(&p.name, NAME_WIDTH)).style(theme.value_style()),
        Cell::from(format!("{:.1}", p.cpu_percent)).style(Style::default().fg(cpu_color)),
        Cell::from(format!("{:.1}", p.memory_percent)).style(Style::default().fg(mem_color)),
        Cell::from(truncate_unicode(&p.status, STATUS_WIDTH)).style(Style::default().fg(theme.status)),
    ])
}
