//! Help overlay — scrollable keybinding table.
//!
//! Lists every binding grouped by context, including user overrides.

use crate::app::App;
use crate::keybindings::Context;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Row, Table},
    Frame,
};

use super::helpers::centered_rect;

/// Context display order and labels for the help screen.
const CONTEXT_ORDER: [(Context, &str); 5] = [
    (Context::Global, "General"),
    (Context::Feed, "Explore"),
    (Context::Detail, "Listing"),
    (Context::Login, "Log in"),
    (Context::Booking, "Booking"),
];

/// Rows of the help table, grouped by context with a heading per group.
fn help_rows(app: &App) -> Vec<Row<'static>> {
    let bindings = app.keybindings.all_bindings();
    let mut rows = Vec::new();

    for (ctx, label) in &CONTEXT_ORDER {
        let group: Vec<_> = bindings.iter().filter(|(c, ..)| c == ctx).collect();
        if group.is_empty() {
            continue;
        }

        if !rows.is_empty() {
            rows.push(Row::new(vec![String::new(), String::new()]));
        }
        rows.push(
            Row::new(vec![
                Line::from(Span::styled(
                    format!("-- {} --", label),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
            ])
            .style(app.style("help_heading")),
        );

        for (_, key, _, description) in group {
            rows.push(Row::new(vec![format!("  {}", key), description.to_string()]));
        }
    }

    rows
}

/// Render the help overlay on top of the current view.
pub fn render(f: &mut Frame, app: &App) {
    let overlay = centered_rect(80, 80, f.area());
    if overlay.width < 20 || overlay.height < 6 {
        return;
    }
    f.render_widget(Clear, overlay);

    let rows = help_rows(app);
    let total_rows = rows.len();

    // -2 border, -2 header + margin
    let visible_height = overlay.height.saturating_sub(4) as usize;
    let max_scroll = total_rows.saturating_sub(visible_height);
    let scroll = app.help_scroll_offset.min(max_scroll);
    let visible_rows: Vec<Row> = rows.into_iter().skip(scroll).take(visible_height).collect();

    let title = if max_scroll > 0 {
        format!(" Help ({}/{}) ", scroll + 1, max_scroll + 1)
    } else {
        " Help (? to close) ".to_string()
    };

    let table = Table::new(visible_rows, [Constraint::Length(16), Constraint::Min(20)])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(app.style("panel_border_focused"))
                .title(title),
        )
        .header(
            Row::new(vec!["Key", "Action"])
                .style(Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED))
                .bottom_margin(1),
        )
        .style(app.style("detail_body"));

    f.render_widget(table, overlay);

    if scroll < max_scroll {
        let hint_area = Rect {
            x: overlay.x + 1,
            y: overlay.y + overlay.height - 1,
            width: overlay.width.saturating_sub(2),
            height: 1,
        };
        f.render_widget(
            Paragraph::new(Span::styled(
                " j/k to scroll, ? or Esc to close ",
                app.style("detail_muted"),
            )),
            hint_area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listings::ListingStore;
    use std::time::Duration;

    #[test]
    fn rows_cover_every_binding_plus_headings() {
        let app = App::new(ListingStore::bundled().unwrap(), Duration::from_millis(200), None);
        let bindings = app.keybindings.all_bindings().len();
        let rows = help_rows(&app).len();
        // one heading per context, one spacer between groups
        assert_eq!(rows, bindings + CONTEXT_ORDER.len() * 2 - 1);
    }
}
