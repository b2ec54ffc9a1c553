use crate::app::App;
use crate::keybindings::Context;
use ratatui::{layout::Rect, widgets::Paragraph, Frame};
use std::borrow::Cow;

/// Render the status bar
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    let text: Cow<'_, str> = if let Some((msg, _)) = &app.status_message {
        Cow::Borrowed(msg.as_ref())
    } else {
        let hints = match app.context() {
            Context::Feed => "[h/l]category [0]all [j/k]move [Enter]open [/]search [L]ogin [X]sign out [?]help [q]uit",
            Context::Detail => "[b]ack [j/k]scroll [Ctrl+d/u]page [s]hare [o]pen [?]help [q]uit",
            Context::Login => "[j/k]move [Enter]continue [Esc]close",
            Context::Booking | Context::Global => "[Esc]close [q]uit",
        };
        if app.session.is_signed_in() {
            Cow::Borrowed(hints)
        } else {
            Cow::Owned(format!("{}  · signed out", hints))
        }
    };

    let style = if app.status_is_error {
        app.style("status_error")
    } else {
        app.style("status_bar")
    };

    f.render_widget(Paragraph::new(text).style(style), area);
}
