use crate::i18n::Messages;
use ratatui::{
    layout::Rect,
    style::Color,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw_help(area: Rect, f: &mut Frame, m: &'static Messages) {
    let mut lines: Vec<Line> = m.guide_intro.iter().map(|s| Line::from(*s)).collect();

    for (key, text) in m.guide_keys {
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(format!("{key:<14}"), Style::default().fg(Color::Magenta)),
            Span::raw(*text),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::raw("  "),
        Span::styled(
            "https://github.com/kavehtehrani/quickstart",
            Style::default().fg(Color::Cyan),
        ),
    ]));

    let p = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(m.tab_help));
    f.render_widget(p, area);
}
