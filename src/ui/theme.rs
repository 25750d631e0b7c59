use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, BorderType, Borders};

use crate::config::Threshold;

/// Severity of a percentage against a [`Threshold`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Normal,
    Warning,
    Critical,
}

impl Level {
    /// Strictly greater than `crit` is critical, strictly greater than `warn` a warning.
    pub fn of(percent: f64, threshold: Threshold) -> Self {
        if percent > threshold.crit {
            Level::Critical
        } else if percent > threshold.warn {
            Level::Warning
        } else {
            Level::Normal
        }
    }

    pub fn color(self) -> Color {
        match self {
            Level::Normal => Color::Green,
            Level::Warning => Color::Yellow,
            Level::Critical => Color::Red,
        }
    }

    /// Process table variant: unremarkable values stay neutral.
    pub fn muted_color(self) -> Color {
        match self {
            Level::Normal => Color::White,
            other => other.color(),
        }
    }
}

pub fn level_color(percent: f64, threshold: Threshold) -> Color {
    Level::of(percent, threshold).color()
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub border: Color,
    pub title: Color,
    pub label: Color,
    pub value: Color,
    pub banner: Color,
    pub notice: Color,
    pub error: Color,
    pub pid: Color,
    pub status: Color,
    pub border_type: BorderType,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            border: Color::LightGreen,
            title: Color::LightCyan,
            label: Color::LightCyan,
            value: Color::Green,
            banner: Color::LightGreen,
            notice: Color::Yellow,
            error: Color::Red,
            pid: Color::LightCyan,
            status: Color::Blue,
            border_type: BorderType::Plain,
        }
    }
}

impl Theme {
    pub fn panel<'a>(&self, title: &'a str) -> Block<'a> {
        Block::default()
            .borders(Borders::ALL)
            .border_type(self.border_type)
            .border_style(Style::default().fg(self.border))
            .title(Span::styled(
                format!(" {title} "),
                Style::default()
                    .fg(self.title)
                    .add_modifier(Modifier::BOLD),
            ))
    }

    pub fn label_style(&self) -> Style {
        Style::default().fg(self.label)
    }

    pub fn value_style(&self) -> Style {
        Style::default().fg(self.value)
    }
}
