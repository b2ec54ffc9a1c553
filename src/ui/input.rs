//! Input handling for the TUI.
//!
//! Keys resolve to actions through the keybinding registry using the
//! context of whatever is on top of the navigator, then dispatch here.

use crate::app::{App, AppEvent};
use crate::auth::{self, Strategy};
use crate::keybindings::{Action as KbAction, Context as KbContext};
use crate::navigation::Route;
use crate::util::validate_url_for_open;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyModifiers};
use tokio::sync::mpsc;

use super::helpers::catch_task_panic;
use super::login::move_focus;
use super::Action;

/// Rows moved by PageDown/PageUp on the detail screen.
const DETAIL_PAGE: u16 = 10;

/// Main input dispatch function.
pub(super) async fn handle_input(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Result<Action> {
    // Help overlay captures all keys while visible
    if app.show_help {
        return Ok(handle_help_input(app, code));
    }

    let context = app.context();
    let Some(action) = app.keybindings.action_for_key(code, modifiers, context) else {
        return Ok(Action::Continue);
    };

    match action {
        KbAction::Quit => return Ok(Action::Quit),
        KbAction::ShowHelp => {
            app.show_help = true;
            app.help_scroll_offset = 0;
        }
        KbAction::CycleTheme => {
            let name = app.cycle_theme();
            app.set_status(format!("Theme: {}", name));
        }
        KbAction::Back => {
            if app.nav.back() {
                app.detail_scroll = 0;
            }
        }
        _ => match context {
            KbContext::Feed => handle_feed_action(app, action, event_tx),
            KbContext::Detail => handle_detail_action(app, action),
            KbContext::Login => handle_login_action(app, action, event_tx),
            KbContext::Booking | KbContext::Global => {}
        },
    }

    Ok(Action::Continue)
}

/// Handle input while the help overlay is visible.
fn handle_help_input(app: &mut App, code: KeyCode) -> Action {
    match code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
            app.show_help = false;
            app.help_scroll_offset = 0;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.help_scroll_offset = app.help_scroll_offset.saturating_add(1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.help_scroll_offset = app.help_scroll_offset.saturating_sub(1);
        }
        _ => {}
    }
    Action::Continue
}

fn handle_feed_action(app: &mut App, action: KbAction, event_tx: &mpsc::Sender<AppEvent>) {
    match action {
        KbAction::NavDown => app.nav_down(),
        KbAction::NavUp => app.nav_up(),
        KbAction::NextCategory => app.next_category(event_tx),
        KbAction::PrevCategory => app.prev_category(event_tx),
        KbAction::ClearCategory => app.select_category(None, event_tx),
        KbAction::Select => {
            if !app.open_selected() && app.feed.is_loading() {
                app.set_status("Still loading…");
            }
        }
        KbAction::OpenSearch => app.nav.navigate(Route::Booking),
        KbAction::OpenLogin => {
            if app.session.is_signed_in() {
                app.set_status("Already signed in");
            } else {
                app.present_login();
            }
        }
        KbAction::SignOut => {
            if !app.sign_out() {
                app.set_status("Not signed in");
            }
        }
        _ => {}
    }
}

fn handle_detail_action(app: &mut App, action: KbAction) {
    match action {
        KbAction::ScrollDown => app.scroll_detail_down(1),
        KbAction::ScrollUp => app.scroll_detail_up(1),
        KbAction::PageDown => app.scroll_detail_down(DETAIL_PAGE),
        KbAction::PageUp => app.scroll_detail_up(DETAIL_PAGE),
        KbAction::Share => share_listing(app),
        KbAction::OpenInBrowser => open_listing_in_browser(app),
        _ => {}
    }
}

fn handle_login_action(app: &mut App, action: KbAction, event_tx: &mpsc::Sender<AppEvent>) {
    match action {
        KbAction::NavDown => app.login_focus = move_focus(app.login_focus, true),
        KbAction::NavUp => app.login_focus = move_focus(app.login_focus, false),
        KbAction::Select => {
            let strategy = app.login_focus;
            spawn_sign_in(app, strategy, event_tx);
        }
        KbAction::SignInGoogle => spawn_sign_in(app, Strategy::Google, event_tx),
        KbAction::SignInApple => spawn_sign_in(app, Strategy::Apple, event_tx),
        _ => {}
    }
}

/// Surface the share text for the open listing in the status bar.
fn share_listing(app: &mut App) {
    let Some(listing) = app.detail_listing() else {
        return;
    };
    match listing.share_message() {
        Some(message) => {
            tracing::info!(listing = %listing.id, "Shared listing");
            app.set_status(message.replace('\n', " "));
        }
        None => app.set_error("This listing has no link to share"),
    }
}

fn open_listing_in_browser(app: &mut App) {
    let Some(listing) = app.detail_listing() else {
        return;
    };
    let Some(url) = listing.listing_url.as_deref() else {
        app.set_error("This listing has no link");
        return;
    };

    // Validate before handing anything to the OS opener
    match validate_url_for_open(url) {
        Err(e) => app.set_error(e.to_string()),
        Ok(url) => {
            if let Err(e) = open::that(url.as_str()) {
                app.set_error(format!("Failed to open browser: {}", e));
            }
        }
    }
}

/// Start `strategy`'s sign-in flow in the background.
///
/// Completion comes back as `AppEvent::AuthCompleted`. Only one flow runs
/// at a time.
fn spawn_sign_in(app: &mut App, strategy: Strategy, event_tx: &mpsc::Sender<AppEvent>) {
    if app.auth_in_flight() {
        app.set_status("Sign-in already in progress");
        return;
    }
    let Some(provider) = app.identity.clone() else {
        app.set_error("No identity service configured");
        return;
    };

    tracing::info!(strategy = strategy.as_str(), "Starting sign-in");
    app.set_status(format!("{}…", strategy.label()));

    let tx = event_tx.clone();
    app.auth_handle = Some(tokio::spawn(async move {
        let event = match catch_task_panic(auth::sign_in(provider.as_ref(), strategy)).await {
            Ok(result) => AppEvent::AuthCompleted {
                strategy,
                result: result.map_err(|e| e.to_string()),
            },
            Err(error) => AppEvent::TaskPanicked {
                task: "sign-in",
                error,
            },
        };

        if let Err(e) = tx.send(event).await {
            tracing::warn!(error = %e, "Failed to send sign-in result (receiver dropped)");
        }
    }));
}
