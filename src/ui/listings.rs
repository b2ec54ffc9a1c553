use crate::app::App;
use crate::listings::Listing;
use crate::util::{display_width, strip_control_chars, truncate_to_width};
use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

/// "$ 120" for whole prices, "$ 89.50" otherwise; "$ –" when unknown.
pub(super) fn format_price(price: Option<f64>) -> String {
    match price {
        Some(p) if p.fract() == 0.0 => format!("$ {}", p as i64),
        Some(p) => format!("$ {:.2}", p),
        None => "$ –".to_string(),
    }
}

/// "4.65", or "New" for listings without reviews.
pub(super) fn format_rating(listing: &Listing) -> String {
    match listing.star_rating() {
        Some(r) => format!("{}", (r * 100.0).round() / 100.0),
        None => "New".to_string(),
    }
}

fn card(app: &App, listing: &Listing, width: usize) -> ListItem<'static> {
    let rating = format!("★ {}", format_rating(listing));
    let name_width = width.saturating_sub(rating.chars().count() + 2);
    let name = strip_control_chars(&listing.name);
    let name = truncate_to_width(&name, name_width).into_owned();
    let pad = width.saturating_sub(display_width(&name) + rating.chars().count());

    let band_label = listing
        .medium_url
        .as_deref()
        .or(listing.thumbnail_url.as_deref())
        .map_or("no photo", |_| "photo");
    let band = format!(" {:<w$}♡ ", band_label, w = width.saturating_sub(4));

    ListItem::new(vec![
        Line::from(Span::styled(band, app.style("image_band"))),
        Line::from(vec![
            Span::styled(name, app.style("card_title")),
            Span::raw(" ".repeat(pad)),
            Span::styled(rating, app.style("card_star")),
        ]),
        Line::from(Span::styled(
            strip_control_chars(&listing.room_type).into_owned(),
            app.style("card_meta"),
        )),
        Line::from(vec![
            Span::styled(format_price(listing.price), app.style("card_price")),
            Span::styled(" night", app.style("card_meta")),
        ]),
        Line::from(""),
    ])
}

/// Render the listing feed panel
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let visible = app.visible_listings();
    let category = app.feed.category();

    let title = if app.feed.is_loading() {
        " Loading… ".to_string()
    } else if category.is_empty() {
        format!(" {} homes ", visible.len())
    } else {
        format!(" {} · {} ", category, visible.len())
    };

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(app.style("panel_border"))
        .title(Span::styled(title, app.style("loading")));
    let inner_width = block.inner(area).width as usize;

    if visible.is_empty() {
        let message = if app.feed.is_loading() {
            ""
        } else {
            "No homes in this category yet"
        };
        let empty = Paragraph::new(Span::styled(message, app.style("loading"))).block(block);
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = visible
        .iter()
        .map(|listing| card(app, listing, inner_width))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(app.style("card_selected").add_modifier(Modifier::BOLD));
    let mut state = ListState::default().with_selected(Some(app.selected_listing));
    f.render_stateful_widget(list, area, &mut state);
}
