use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::ui::theme::Theme;

pub const HINT: &str = "System Overview - press q or Ctrl+C to exit";

/// Exit hint, replaced by the last tick's error while one is pending.
pub fn render(frame: &mut Frame, area: Rect, last_error: Option<&str>, theme: &Theme) {
    let span = match last_error {
        Some(err) => Span::styled(
            format!("Error: {err}"),
            Style::default()
                .fg(theme.error)
                .add_modifier(Modifier::BOLD),
        ),
        None => Span::styled(
            HINT,
            Style::default()
                .fg(theme.banner)
                .add_modifier(Modifier::BOLD),
        ),
    };

    let pad = area.height.saturating_sub(1) as usize / 2;
    let lines: Vec<Line> = std::iter::repeat_n(Line::default(), pad)
        .chain(std::iter::once(Line::from(span)))
        .collect();
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}
