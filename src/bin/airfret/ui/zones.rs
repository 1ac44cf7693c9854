//! Zone grid widget - proportional map of the layout with claim state

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use airfret::layout::NoteZone;

/// Draw every zone scaled into the terminal area. Claimed zones light up.
pub fn render_zones(frame: &mut Frame, area: Rect, zones: &[NoteZone]) {
    let block = Block::default().title(" Zones ").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if zones.is_empty() || inner.width == 0 || inner.height == 0 {
        return;
    }

    // Scale image-space rects into the terminal cell grid.
    let (max_x, max_y) = zones.iter().fold((0.0f32, 0.0f32), |(mx, my), zone| {
        let r = zone.rect();
        (mx.max(r.x + r.width), my.max(r.y + r.height))
    });
    if max_x <= 0.0 || max_y <= 0.0 {
        return;
    }

    for zone in zones {
        let r = zone.rect();
        let x = inner.x + (r.x / max_x * inner.width as f32) as u16;
        let y = inner.y + (r.y / max_y * inner.height as f32) as u16;
        let width = (r.width / max_x * inner.width as f32).max(1.0) as u16;
        let height = (r.height / max_y * inner.height as f32).max(1.0) as u16;

        let cell = Rect {
            x,
            y,
            width: width.min(inner.right().saturating_sub(x)),
            height: height.min(inner.bottom().saturating_sub(y)),
        };
        if cell.width == 0 || cell.height == 0 {
            continue;
        }

        let style = if zone.is_free() {
            Style::default().fg(Color::Gray)
        } else {
            Style::default().fg(Color::Black).bg(Color::Cyan)
        };
        let widget = Paragraph::new(zone.label().unwrap_or(""))
            .style(style)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(widget, cell);
    }
}
