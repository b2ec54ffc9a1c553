//! Listing detail screen.
//!
//! The body scrolls as one column: the hero image band followed by the
//! listing info. The band shrinks and its content drifts upward more slowly
//! than the page, and the title header fades in once the page has scrolled
//! far enough (see [`super::parallax`]).

use crate::app::App;
use crate::listings::Listing;
use crate::util::{display_width, strip_control_chars, truncate_to_width, wrap_text};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::listings::{format_price, format_rating};
use super::parallax::{image_rise_rows, visible_image_rows, ParallaxFrame, IMAGE_ROWS};

const FOOTER_HEIGHT: u16 = 3;
/// Blank rows after the description so it clears the footer.
const BOTTOM_PADDING: usize = 2;
/// Left/right padding of the info column.
const INFO_MARGIN: u16 = 2;

fn count(n: Option<u32>) -> String {
    n.map_or_else(|| "–".to_string(), |n| n.to_string())
}

fn rooms_line(listing: &Listing) -> String {
    let bathrooms = listing
        .bathrooms
        .map_or_else(|| "–".to_string(), |b| b.to_string());
    format!(
        "{} guests · {} bedrooms · {} bed · {} bathrooms",
        count(listing.guests_included),
        count(listing.bedrooms),
        count(listing.beds),
        bathrooms
    )
}

/// Info column below the hero image, wrapped to `width`.
fn info_lines(app: &App, listing: &Listing, width: usize) -> Vec<Line<'static>> {
    let divider = "─".repeat(width);
    let mut lines = Vec::new();

    for row in wrap_text(&strip_control_chars(&listing.name), width) {
        lines.push(Line::from(Span::styled(row, app.style("detail_title"))));
    }
    lines.push(Line::from(Span::styled(
        format!(
            "{} in {}",
            strip_control_chars(&listing.room_type),
            strip_control_chars(&listing.smart_location)
        ),
        app.style("detail_body"),
    )));
    lines.push(Line::from(Span::styled(
        rooms_line(listing),
        app.style("detail_muted"),
    )));
    lines.push(Line::from(vec![
        Span::styled("★ ", app.style("card_star")),
        Span::styled(
            format!(
                "{} · {} reviews",
                format_rating(listing),
                listing.number_of_reviews
            ),
            app.style("detail_body"),
        ),
    ]));

    lines.push(Line::from(Span::styled(
        divider.clone(),
        app.style("panel_border"),
    )));
    lines.push(Line::from(Span::styled(
        format!("Hosted by {}", strip_control_chars(&listing.host_name)),
        app.style("card_title"),
    )));
    let since = listing
        .host_since
        .map_or_else(|| "–".to_string(), |d| d.to_string());
    lines.push(Line::from(Span::styled(
        format!("Host since {}", since),
        app.style("detail_muted"),
    )));
    lines.push(Line::from(Span::styled(divider, app.style("panel_border"))));

    if let Some(description) = listing.description.as_deref() {
        for row in wrap_text(&strip_control_chars(description), width) {
            lines.push(Line::from(Span::styled(row, app.style("detail_body"))));
        }
    }

    for _ in 0..BOTTOM_PADDING {
        lines.push(Line::from(""));
    }
    lines
}

/// Render the listing detail screen
pub fn render(f: &mut Frame, app: &mut App, area: Rect) {
    let Some(listing) = app.detail_listing() else {
        let missing = Paragraph::new("Listing not found. Press Esc to go back.")
            .alignment(Alignment::Center)
            .style(app.style("detail_muted"));
        f.render_widget(missing, area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(FOOTER_HEIGHT)])
        .split(area);
    let body = chunks[0];

    let info_width = body.width.saturating_sub(INFO_MARGIN * 2) as usize;
    let info = info_lines(app, &listing, info_width);

    let total_rows = (info.len() + IMAGE_ROWS as usize).min(u16::MAX as usize) as u16;
    app.clamp_detail_scroll(total_rows.saturating_sub(body.height));
    let scroll = app.detail_scroll;

    // Hero band, shrinking as the page scrolls
    let band_rows = visible_image_rows(scroll).min(body.height);
    let band_area = Rect { height: band_rows, ..body };
    if band_rows > 0 {
        render_image_band(f, app, &listing, band_area, image_rise_rows(scroll));
    }

    // Info column under the band
    let info_area = Rect {
        x: body.x + INFO_MARGIN,
        y: body.y + band_rows,
        width: info_width as u16,
        height: body.height - band_rows,
    };
    let info_skip = scroll.saturating_sub(IMAGE_ROWS);
    f.render_widget(Paragraph::new(info).scroll((info_skip, 0)), info_area);

    render_header(f, app, &listing, body, ParallaxFrame::at_rows(scroll));
    render_footer(f, app, &listing, chunks[1]);
}

fn render_image_band(f: &mut Frame, app: &App, listing: &Listing, area: Rect, rise: u16) {
    let caption = match listing.xl_picture_url.as_deref() {
        Some(url) => url::Url::parse(url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
            .map_or_else(|| "photo".to_string(), |host| format!("photo · {}", host)),
        None => "no photo".to_string(),
    };

    let mut rows = vec![Line::from(""); IMAGE_ROWS as usize];
    rows[IMAGE_ROWS as usize / 2] = Line::from(caption);

    let band = Paragraph::new(rows)
        .alignment(Alignment::Center)
        .style(app.style("image_band"))
        .scroll((rise, 0));
    f.render_widget(band, area);
}

/// Transparent header with round buttons, or the solid title header once
/// the page has scrolled past the fade point.
fn render_header(f: &mut Frame, app: &App, listing: &Listing, body: Rect, frame: ParallaxFrame) {
    let row = Rect { height: 1, ..body };
    let buttons = " ⇪  ♡ ";
    let back = " ‹ ";

    if frame.header_visible() {
        let title_width = (row.width as usize)
            .saturating_sub(display_width(back) + display_width(buttons) + 1);
        let name = strip_control_chars(&listing.name);
        let title = truncate_to_width(&name, title_width).into_owned();
        let pad = (row.width as usize)
            .saturating_sub(display_width(back) + display_width(&title) + display_width(buttons));

        f.render_widget(Clear, row);
        let header = Paragraph::new(Line::from(vec![
            Span::raw(back),
            Span::raw(title),
            Span::raw(" ".repeat(pad)),
            Span::raw(buttons),
        ]))
        .style(app.style("detail_header"));
        f.render_widget(header, row);
    } else {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(6),
            ])
            .split(row);
        f.render_widget(
            Paragraph::new(Span::styled(back, app.style("button_outline"))),
            cols[0],
        );
        f.render_widget(
            Paragraph::new(Span::styled(buttons, app.style("button_outline"))),
            cols[2],
        );
    }
}

fn render_footer(f: &mut Frame, app: &App, listing: &Listing, area: Rect) {
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(app.style("panel_border"))
        .style(app.style("footer"));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(13)])
        .split(inner);

    let price = format_price(listing.price).replacen("$ ", "$", 1);
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(format!(" {}", price), app.style("card_price")),
            Span::raw(" night"),
        ])),
        cols[0],
    );
    f.render_widget(
        Paragraph::new(Span::styled(" Reserve ", app.style("button_primary")))
            .alignment(Alignment::Right),
        cols[1],
    );
}
