use crate::app::App;
use crate::navigation::Route;
use ratatui::{
    layout::Alignment,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::helpers::centered_fixed;

/// Render the "Where to?" booking modal (placeholder panel)
pub fn render(f: &mut Frame, app: &App) {
    let overlay = centered_fixed(44, 8, f.area());
    if overlay.width < 20 || overlay.height < 5 {
        return;
    }
    f.render_widget(Clear, overlay);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("Where to?", app.style("detail_title"))),
        Line::from(Span::styled("Anywhere · Any week", app.style("detail_muted"))),
        Line::from(""),
        Line::from(Span::styled("Esc to close", app.style("detail_muted"))),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.style("panel_border_focused"))
        .title(format!(" ✕  {} ", Route::Booking.title()));

    f.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block)
            .style(app.style("detail_body")),
        overlay,
    );
}
