use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Cell, Paragraph, Row, Table};

use crate::format::{bytes_to_human, format_rate, with_thousands};
use crate::system::network::NetworkStats;
use crate::system::snapshot::{Metric, Sample};
use crate::ui::theme::Theme;

const SHOWN_INTERFACES: usize = 3;

pub fn render(frame: &mut Frame, area: Rect, sample: &Sample, theme: &Theme) {
    let block = theme.panel("Network Traffic");

    let stats = match &sample.network {
        Metric::Available(stats) => stats,
        Metric::Unavailable(reason) => {
            let msg = Paragraph::new(format!("Network counters unavailable: {reason}"))
                .style(Style::default().fg(theme.error))
                .block(block);
            frame.render_widget(msg, area);
            return;
        }
    };

    let rows = rows(stats).into_iter().map(|(label, value)| {
        Row::new(vec![
            Cell::from(label).style(theme.label_style()),
            Cell::from(value).style(theme.value_style()),
        ])
    });

    let table = Table::new(rows, [Constraint::Length(18), Constraint::Min(10)])
        .column_spacing(1)
        .block(block);
    frame.render_widget(table, area);
}

pub fn rows(stats: &NetworkStats) -> Vec<(&'static str, String)> {
    let counters = &stats.counters;
    let interfaces = stats
        .active_interfaces
        .iter()
        .take(SHOWN_INTERFACES)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");

    vec![
        ("Upload Speed", format_rate(stats.rates.upload)),
        ("Download Speed", format_rate(stats.rates.download)),
        ("Total Sent", bytes_to_human(counters.bytes_sent as f64)),
        ("Total Received", bytes_to_human(counters.bytes_recv as f64)),
        ("Packets Sent", with_thousands(counters.packets_sent)),
        ("Packets Received", with_thousands(counters.packets_recv)),
        ("Active Interfaces", interfaces),
    ]
}
