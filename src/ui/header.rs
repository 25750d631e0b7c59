use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::ui::theme::Theme;

const BANNER: [&str; 6] = [
    "███████╗██╗   ██╗███████╗████████╗███████╗███╗   ███╗     ██████╗ ██╗   ██╗███████╗██████╗ ██╗   ██╗██╗███████╗██╗    ██╗",
    "██╔════╝╚██╗ ██╔╝██╔════╝╚══██╔══╝██╔════╝████╗ ████║    ██╔═══██╗██║   ██║██╔════╝██╔══██╗██║   ██║██║██╔════╝██║    ██║",
    "███████╗ ╚████╔╝ ███████╗   ██║   █████╗  ██╔████╔██║    ██║   ██║██║   ██║█████╗  ██████╔╝██║   ██║██║█████╗  ██║ █╗ ██║",
    "╚════██║  ╚██╔╝  ╚════██║   ██║   ██╔══╝  ██║╚██╔╝██║    ██║   ██║╚██╗ ██╔╝██╔══╝  ██╔══██╗╚██╗ ██╔╝██║██╔══╝  ██║███╗██║",
    "███████║   ██║   ███████║   ██║   ███████╗██║ ╚═╝ ██║    ╚██████╔╝ ╚████╔╝ ███████╗██║  ██║ ╚████╔╝ ██║███████╗╚███╔███╔╝",
    "╚══════╝   ╚═╝   ╚══════╝   ╚═╝   ╚══════╝╚═╝     ╚═╝     ╚═════╝   ╚═══╝  ╚══════╝╚═╝  ╚═╝  ╚═══╝  ╚═╝╚══════╝ ╚══╝╚══╝",
];

const COMPACT_TITLE: &str = "SYSTEM OVERVIEW";

pub fn render(frame: &mut Frame, area: Rect, theme: &Theme) {
    let style = Style::default()
        .fg(theme.banner)
        .add_modifier(Modifier::BOLD);
    let banner_width = BANNER.iter().map(|l| l.width()).max().unwrap_or(0);

    let lines: Vec<Line> = if banner_width <= area.width as usize
        && BANNER.len() <= area.height as usize
    {
        let pad = (area.height as usize - BANNER.len()) / 2;
        std::iter::repeat_n(Line::default(), pad)
            .chain(BANNER.iter().map(|l| Line::styled(*l, style)))
            .collect()
    } else {
        let pad = area.height.saturating_sub(1) as usize / 2;
        std::iter::repeat_n(Line::default(), pad)
            .chain(std::iter::once(Line::styled(COMPACT_TITLE, style)))
            .collect()
    };

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}
