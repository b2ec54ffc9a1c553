use crate::app::App;
use crate::auth::Strategy;
use crate::navigation::Route;
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::helpers::centered_fixed;

/// Buttons in display order.
pub(super) const BUTTONS: [Strategy; 2] = [Strategy::Google, Strategy::Apple];

fn glyph(strategy: Strategy) -> &'static str {
    match strategy {
        Strategy::Google => "G",
        Strategy::Apple => "A",
    }
}

/// Render the "Log in or sign up" modal
pub fn render(f: &mut Frame, app: &App) {
    let overlay = centered_fixed(48, 12, f.area());
    if overlay.width < 30 || overlay.height < 8 {
        return;
    }
    f.render_widget(Clear, overlay);

    let width = overlay.width.saturating_sub(4) as usize;
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled("─".repeat(width), app.style("panel_border"))),
        Line::from(""),
    ];

    for strategy in BUTTONS {
        let label = format!("{}  {}", glyph(strategy), strategy.label());
        let role = if strategy == app.login_focus {
            "button_focused"
        } else {
            "button_outline"
        };
        lines.push(Line::from(Span::styled(
            format!("{:^width$}", label, width = width),
            app.style(role),
        )));
        lines.push(Line::from(""));
    }

    let hint = if app.auth_in_flight() {
        "Waiting for the identity provider…"
    } else {
        "Enter select · g Google · a Apple"
    };
    lines.push(Line::from(Span::styled(hint, app.style("detail_muted"))));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.style("panel_border_focused"))
        .title(format!(" ✕  {} ", Route::Login.title()))
        .title_alignment(Alignment::Center);

    f.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block)
            .style(app.style("detail_body")),
        overlay,
    );
}

/// Move the focused button, clamping at the ends.
pub(super) fn move_focus(current: Strategy, down: bool) -> Strategy {
    let idx = BUTTONS.iter().position(|s| *s == current).unwrap_or(0);
    let next = if down {
        (idx + 1).min(BUTTONS.len() - 1)
    } else {
        idx.saturating_sub(1)
    };
    BUTTONS[next]
}
