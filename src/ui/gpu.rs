use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Cell, Paragraph, Row, Table};

use crate::config::ThresholdsConfig;
use crate::format::truncate_unicode;
use crate::system::gpu::GpuDevice;
use crate::system::snapshot::{Metric, Sample};
use crate::ui::theme::{Theme, level_color};

const NAME_WIDTH: usize = 12;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    sample: &Sample,
    thresholds: &ThresholdsConfig,
    theme: &Theme,
) {
    let block = theme.panel("GPU Status");

    let devices = match &sample.gpus {
        Metric::Available(devices) if devices.is_empty() => {
            let msg = Paragraph::new("No GPUs detected")
                .style(Style::default().fg(theme.notice))
                .block(block);
            frame.render_widget(msg, area);
            return;
        }
        Metric::Available(devices) => devices,
        Metric::Unavailable(reason) => {
            let msg = Paragraph::new(format!("GPU query failed: {reason}"))
                .style(Style::default().fg(theme.error))
                .block(block);
            frame.render_widget(msg, area);
            return;
        }
    };

    let rows = devices.iter().map(|gpu| device_row(gpu, thresholds, theme));
    let table = Table::new(
        rows,
        [
            Constraint::Length(NAME_WIDTH as u16),
            Constraint::Length(6),
            Constraint::Length(15),
            Constraint::Length(7),
            Constraint::Min(9),
        ],
    )
    .column_spacing(1)
    .block(block);
    frame.render_widget(table, area);
}

fn device_row(gpu: &GpuDevice, thresholds: &ThresholdsConfig, theme: &Theme) -> Row<'static> {
    let util = match gpu.utilization_percent {
        Some(u) => Cell::from(format!("{u:.0}%"))
            .style(Style::default().fg(level_color(u as f64, thresholds.gpu_utilization))),
        None => Cell::from("N/A").style(theme.value_style()),
    };
    let memory = match (gpu.memory_used_mb, gpu.memory_total_mb) {
        (Some(used), Some(total)) => format!("{used}MB/{total}MB"),
        _ => "N/A".to_string(),
    };
    let temp = match gpu.temperature_c {
        Some(t) => Cell::from(format!("{t:.0}\u{b0}C"))
            .style(Style::default().fg(level_color(t as f64, thresholds.temperature))),
        None => Cell::from("N/A").style(theme.value_style()),
    };

    Row::new(vec![
        Cell::from(truncate_unicode(&short_name(&gpu.name), NAME_WIDTH)).style(theme.label_style()),
        util,
        Cell::from(memory).style(theme.value_style()),
        temp,
        Cell::from(power_label(gpu)).style(theme.value_style()),
    ])
}

/// Drops vendor prefixes that carry no information in a one-vendor panel.
pub fn short_name(name: &str) -> String {
    name.replace("NVIDIA ", "").replace("GeForce ", "")
}

pub fn power_label(gpu: &GpuDevice) -> String {
    match (gpu.power_watts, gpu.power_limit_watts) {
        (Some(draw), Some(limit)) => format!("{draw:.0}W/{limit:.0}W"),
        (Some(draw), None) => format!("{draw:.0}W/N/A"),
        _ => "N/A".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn device(power: Option<f32>, limit: Option<f32>) -> GpuDevice {
        GpuDevice {
            name: "NVIDIA GeForce RTX 4090".to_string(),
            utilization_percent: Some(10.0),
            memory_used_mb: Some(1),
            memory_total_mb: Some(2),
            temperature_c: Some(40.0),
            power_watts: power,
            power_limit_watts: limit,
        }
    }

    #[test]
    fn vendor_prefixes_removed() {
        assert_eq!(short_name("NVIDIA GeForce RTX 4090"), "RTX 4090");
        assert_eq!(short_name("Tesla T4"), "Tesla T4");
    }

    #[test]
    fn power_label_variants() {
        assert_eq!(power_label(&device(Some(220.4), Some(450.0))), "220W/450W");
        assert_eq!(power_label(&device(Some(50.0), None)), "50W/N/A");
        assert_eq!(power_label(&device(None, None)), "N/A");
    }
}
