use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Cell, Row, Table};

use crate::config::{Threshold, ThresholdsConfig};
use crate::format::{bytes_to_human, usage_bar};
use crate::system::snapshot::{Metric, Sample};
use crate::ui::theme::{Theme, level_color};

pub fn render(
    frame: &mut Frame,
    area: Rect,
    sample: &Sample,
    thresholds: &ThresholdsConfig,
    theme: &Theme,
) {
    let cpu = &sample.cpu;
    let memory = &sample.memory;

    let mut rows = vec![usage_row(
        format!("CPU ({} cores)", cpu.cores),
        cpu.percent as f64,
        thresholds.cpu,
        theme,
    )];

    if let Some(mhz) = cpu.frequency_mhz {
        rows.push(text_row("CPU Freq", format!("{mhz:.0} MHz"), theme));
    }

    rows.push(usage_row(
        "Memory".to_string(),
        memory.percent,
        thresholds.memory,
        theme,
    ));
    rows.push(text_row(
        "",
        format!(
            "{} / {}",
            bytes_to_human(memory.used as f64),
            bytes_to_human(memory.total as f64)
        ),
        theme,
    ));

    if let Metric::Available(swap) = &sample.swap {
        rows.push(usage_row(
            "Swap".to_string(),
            swap.percent,
            thresholds.swap,
            theme,
        ));
    }

    let table = Table::new(
        rows,
        [
            Constraint::Length(16),
            Constraint::Length(20),
            Constraint::Length(20),
        ],
    )
    .column_spacing(1)
    .block(theme.panel("CPU & Memory"));
    frame.render_widget(table, area);
}

fn usage_row(label: String, percent: f64, threshold: Threshold, theme: &Theme) -> Row<'static> {
    Row::new(vec![
        Cell::from(label).style(theme.label_style()),
        Cell::from(format!("{percent:5.1}%")).style(theme.value_style()),
        Cell::from(usage_bar(percent)).style(Style::default().fg(level_color(percent, threshold))),
    ])
}

fn text_row(label: &'static str, value: String, theme: &Theme) -> Row<'static> {
    Row::new(vec![
        Cell::from(label).style(theme.label_style()),
        Cell::from(value).style(theme.value_style()),
        Cell::from(""),
    ])
}
