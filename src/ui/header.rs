//! Explorer header: search button, filter glyph, and the category chip row.

use crate::app::App;
use crate::listings::{Category, CATALOG};
use crate::util::display_width;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Total height the header needs.
pub const HEADER_HEIGHT: u16 = 6;

/// Columns between chips.
const CHIP_GAP: usize = 3;

fn chip_label(category: &Category) -> String {
    format!("{} {}", category.glyph, category.name)
}

/// First chip to draw so that `active` fits within `available` columns.
///
/// Chips scroll the way the mobile row does: the window only moves once
/// the active chip would fall off the right edge.
pub(super) fn first_visible_chip(widths: &[usize], active: usize, available: usize) -> usize {
    let mut first = 0;
    while first < active {
        let span: usize = widths[first..=active].iter().sum::<usize>()
            + CHIP_GAP * (active - first);
        if span <= available {
            break;
        }
        first += 1;
    }
    first
}

pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 10 || area.height < 3 {
        return;
    }

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(app.style("panel_border"));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(inner);

    render_action_row(f, app, rows[0]);
    render_chips(f, app, rows[1]);
}

fn render_action_row(f: &mut Frame, app: &App, area: Rect) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(5)])
        .split(area);

    let search = Paragraph::new(vec![
        Line::from(vec![
            Span::styled("⌕ ", app.style("search_button")),
            Span::styled("Where to?", app.style("card_title")),
        ]),
        Line::from(Span::styled("  Anywhere · Any week", app.style("card_meta"))),
    ])
    .block(
        Block::default()
            .borders(Borders::LEFT | Borders::RIGHT)
            .border_style(app.style("panel_border")),
    );
    f.render_widget(search, cols[0]);

    let filter = Paragraph::new(Line::from(Span::styled(" ☰ ", app.style("button_outline"))))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(app.style("panel_border")),
        );
    f.render_widget(filter, cols[1]);
}

fn render_chips(f: &mut Frame, app: &App, area: Rect) {
    let labels: Vec<String> = CATALOG.iter().map(chip_label).collect();
    let widths: Vec<usize> = labels.iter().map(|l| display_width(l)).collect();

    let active = app.active_category().map(|c| c.index());
    let first = active.map_or(0, |a| first_visible_chip(&widths, a, area.width as usize));

    let mut spans = Vec::with_capacity(labels.len() * 2 + 1);
    if first > 0 {
        spans.push(Span::styled("‹ ", app.style("chip_normal")));
    }
    for (i, label) in labels.into_iter().enumerate().skip(first) {
        if i > first {
            spans.push(Span::raw(" ".repeat(CHIP_GAP)));
        }
        let role = if Some(i) == active {
            "chip_active"
        } else {
            "chip_normal"
        };
        spans.push(Span::styled(label, app.style(role)));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_starts_at_zero_when_everything_fits() {
        let widths = [5, 5, 5];
        assert_eq!(first_visible_chip(&widths, 2, 80), 0);
    }

    #[test]
    fn window_scrolls_just_enough_for_active_chip() {
        // 10 + 3 + 10 + 3 + 10 = 36 columns for all three
        let widths = [10, 10, 10];
        assert_eq!(first_visible_chip(&widths, 2, 30), 1);
        assert_eq!(first_visible_chip(&widths, 2, 10), 2);
        assert_eq!(first_visible_chip(&widths, 0, 5), 0);
    }

    #[test]
    fn chip_labels_carry_glyphs() {
        assert_eq!(chip_label(&CATALOG[5]), "☂ Beachfront");
    }
}
