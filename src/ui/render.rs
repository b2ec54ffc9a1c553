//! Render dispatch: the screen on top of the navigation stack, then any
//! modal and overlay above it.

use crate::app::App;
use crate::navigation::Route;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    widgets::Paragraph,
    Frame,
};

use super::{booking, detail, header, help, listings, login, status};

/// Minimum terminal dimensions required for normal operation.
pub(super) const MIN_WIDTH: u16 = 60;
pub(super) const MIN_HEIGHT: u16 = 16;

pub(super) fn render(f: &mut Frame, app: &mut App) {
    let area = f.area();
    if area.width < 1 || area.height < 1 {
        return;
    }

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = if area.height < 3 || area.width < 20 {
            Paragraph::new("Too small")
        } else {
            Paragraph::new(format!(
                "Terminal too small\n\nMinimum: {}x{}\nCurrent: {}x{}",
                MIN_WIDTH, MIN_HEIGHT, area.width, area.height
            ))
            .alignment(Alignment::Center)
        };
        f.render_widget(msg, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    if matches!(app.nav.current_screen(), Route::Listing { .. }) {
        detail::render(f, app, chunks[0]);
    } else {
        render_explore(f, app, chunks[0]);
    }
    status::render(f, app, chunks[1]);

    match app.nav.current_modal() {
        Some(Route::Login) => login::render(f, app),
        Some(Route::Booking) => booking::render(f, app),
        _ => {}
    }

    if app.show_help {
        help::render(f, app);
    }
}

/// Home tab: explorer header over the listing feed.
fn render_explore(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(header::HEADER_HEIGHT), Constraint::Min(0)])
        .split(area);

    header::render(f, app, chunks[0]);
    listings::render(f, app, chunks[1]);
}
