//! Status bar widget - scale, sounding notes, channel usage, frame count

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::UiApp;

pub fn render_status(frame: &mut Frame, area: Rect, app: &UiApp) {
    let block = Block::default().title(" airfret ").borders(Borders::ALL);

    let (state_symbol, state_text, state_color) = if app.paused {
        ("⏸", "Paused", Color::Yellow)
    } else {
        ("▶", "Running", Color::Green)
    };

    let channels = app.engine.channels();
    let fingers: String = app
        .engine
        .targets()
        .iter()
        .map(|f| f.name()[..1].to_ascii_uppercase())
        .collect();

    let line = Line::from(vec![
        Span::styled(
            format!(" Scale: {}  ", app.scale_name()),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("{} {}  ", state_symbol, state_text),
            Style::default().fg(state_color),
        ),
        Span::styled(
            format!("Notes: {}  ", app.engine.active_notes()),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!("Channels: {}/{}  ", channels.assigned(), channels.capacity()),
            Style::default().fg(Color::Magenta),
        ),
        Span::styled(
            format!("Fingers: {}  ", fingers),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!("Frame {}", app.frame),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let paragraph = Paragraph::new(line).block(block);
    frame.render_widget(paragraph, area);
}
