use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Cell, Paragraph, Row, Table};

use crate::config::ThresholdsConfig;
use crate::format::{bytes_to_human, truncate_unicode, usage_bar};
use crate::system::snapshot::{Metric, Sample};
use crate::ui::theme::{Theme, level_color};

const DEVICE_WIDTH: usize = 15;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    sample: &Sample,
    thresholds: &ThresholdsConfig,
    theme: &Theme,
) {
    let block = theme.panel("Disk Usage");

    let disks = match &sample.disks {
        Metric::Available(disks) => disks,
        Metric::Unavailable(reason) => {
            let msg = Paragraph::new(format!("Disk usage unavailable: {reason}"))
                .style(Style::default().fg(theme.error))
                .block(block);
            frame.render_widget(msg, area);
            return;
        }
    };

    let rows = disks.iter().map(|disk| {
        Row::new(vec![
            Cell::from(truncate_unicode(&disk.device, DEVICE_WIDTH)).style(theme.label_style()),
            Cell::from(format!("{:.1}%", disk.percent)).style(theme.value_style()),
            Cell::from(format!(
                "{} / {}",
                bytes_to_human(disk.free as f64),
                bytes_to_human(disk.total as f64)
            ))
            .style(theme.value_style()),
            Cell::from(usage_bar(disk.percent))
                .style(Style::default().fg(level_color(disk.percent, thresholds.disk))),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(DEVICE_WIDTH as u16),
            Constraint::Length(7),
            Constraint::Length(17),
            Constraint::Length(20),
        ],
    )
    .column_spacing(1)
    .block(block);
    frame.render_widget(table, area);
}
