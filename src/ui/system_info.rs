use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::widgets::{Cell, Row, Table};

use crate::format::format_uptime;
use crate::system::snapshot::Sample;
use crate::ui::theme::Theme;

pub fn render(frame: &mut Frame, area: Rect, sample: &Sample, theme: &Theme) {
    let host = &sample.host;
    let entries = [
        ("System", format!("{} {}", host.os, host.arch)),
        ("Kernel", host.kernel.clone().unwrap_or_else(|| "N/A".to_string())),
        ("Host", host.hostname.clone().unwrap_or_else(|| "N/A".to_string())),
        ("Uptime", format_uptime(sample.uptime)),
        ("User", host.user.clone().unwrap_or_else(|| "Unknown".to_string())),
        ("Time", sample.taken_at.format("%Y-%m-%d %H:%M:%S").to_string()),
    ];

    let rows = entries.into_iter().map(|(label, value)| {
        Row::new(vec![
            Cell::from(label).style(theme.label_style()),
            Cell::from(value).style(theme.value_style()),
        ])
    });

    let table = Table::new(rows, [Constraint::Length(8), Constraint::Min(10)])
        .column_spacing(2)
        .block(theme.panel("System Info"));
    frame.render_widget(table, area);
}
