use crate::auth::{IdentityProvider, Session, Strategy};
use crate::feed::{FeedController, SettleTicket};
use crate::keybindings::{Context, KeybindingRegistry};
use crate::listings::{CategoryId, Listing, ListingStore, CATALOG};
use crate::navigation::{Navigator, Route};
use crate::theme::{StyleMap, ThemeVariant};
use ratatui::style::Style;
use std::borrow::Cow;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;

/// How long a status message stays on screen.
const STATUS_TTL: Duration = Duration::from_secs(3);

// ============================================================================
// Background Events
// ============================================================================

/// Events from background tasks
#[derive(Debug)]
pub enum AppEvent {
    /// The category settle timer fired.
    CategorySettled(SettleTicket),
    /// A sign-in flow finished.
    ///
    /// `result` carries the activated session id, `None` when the flow
    /// ended without creating one, or the error text.
    AuthCompleted {
        strategy: Strategy,
        result: Result<Option<String>, String>,
    },
    /// A background task panicked.
    TaskPanicked { task: &'static str, error: String },
}

impl From<SettleTicket> for AppEvent {
    fn from(ticket: SettleTicket) -> Self {
        Self::CategorySettled(ticket)
    }
}

// ============================================================================
// Application State
// ============================================================================

/// Central application state
pub struct App {
    /// Home feed: category selection and settled results.
    pub feed: FeedController,
    pub nav: Navigator,
    pub session: Session,
    /// `None` when no identity service is configured; sign-in is then
    /// refused with a status message.
    pub identity: Option<Arc<dyn IdentityProvider>>,

    // Theme
    pub theme_variant: ThemeVariant,
    pub theme: StyleMap,

    pub keybindings: KeybindingRegistry,

    // UI state
    /// Highlighted card in the home feed.
    pub selected_listing: usize,
    /// Detail screen scroll, in rows.
    pub detail_scroll: u16,
    /// Highlighted button in the login modal.
    pub login_focus: Strategy,

    /// Handle to the running sign-in task, if any.
    pub auth_handle: Option<tokio::task::JoinHandle<()>>,

    pub status_message: Option<(Cow<'static, str>, Instant)>,
    /// Set when the status message reports a failure.
    pub status_is_error: bool,

    pub show_help: bool,
    pub help_scroll_offset: usize,

    /// Dirty flag to skip unnecessary frame renders
    pub needs_redraw: bool,
}

impl App {
    pub fn new(
        store: ListingStore,
        settle_delay: Duration,
        identity: Option<Arc<dyn IdentityProvider>>,
    ) -> Self {
        Self {
            feed: FeedController::new(store, settle_delay),
            nav: Navigator::new(),
            session: Session::default(),
            identity,
            theme_variant: ThemeVariant::Dark,
            theme: StyleMap::from_palette(&ThemeVariant::Dark.palette()),
            keybindings: KeybindingRegistry::new(),
            selected_listing: 0,
            detail_scroll: 0,
            login_focus: Strategy::Google,
            auth_handle: None,
            status_message: None,
            status_is_error: false,
            show_help: false,
            help_scroll_offset: 0,
            needs_redraw: true,
        }
    }

    /// Resolve a semantic role name to its `Style`.
    pub fn style(&self, role: &str) -> Style {
        self.theme.resolve(role)
    }

    pub fn set_theme(&mut self, variant: ThemeVariant) {
        self.theme_variant = variant;
        self.theme = StyleMap::from_palette(&variant.palette());
        self.needs_redraw = true;
    }

    /// Cycle to the next theme variant. Returns the new theme's name.
    pub fn cycle_theme(&mut self) -> &'static str {
        let next = self.theme_variant.next();
        self.set_theme(next);
        next.name()
    }

    /// Keybinding context for whatever is on top of the navigator.
    pub fn context(&self) -> Context {
        match self.nav.current() {
            Route::Tabs => Context::Feed,
            Route::Listing { .. } => Context::Detail,
            Route::Login => Context::Login,
            Route::Booking => Context::Booking,
        }
    }

    // ------------------------------------------------------------------------
    // Home feed
    // ------------------------------------------------------------------------

    /// Listings to draw on the home feed (empty while a switch settles).
    pub fn visible_listings(&self) -> &[Arc<Listing>] {
        self.feed.visible()
    }

    pub fn selected_listing(&self) -> Option<&Arc<Listing>> {
        self.visible_listings().get(self.selected_listing)
    }

    /// Active category chip, `None` when the feed is unfiltered.
    pub fn active_category(&self) -> Option<CategoryId> {
        CategoryId::from_name(self.feed.category())
    }

    /// Select `category` (`None` clears the filter) and start its settle.
    pub fn select_category(&mut self, category: Option<CategoryId>, tx: &mpsc::Sender<AppEvent>) {
        let name = category.map(CategoryId::name).unwrap_or("");
        self.feed.select_category(name, tx);
        self.selected_listing = 0;
        self.needs_redraw = true;
    }

    /// Move the chip selection one step right, wrapping at the end.
    pub fn next_category(&mut self, tx: &mpsc::Sender<AppEvent>) {
        let next = match self.active_category() {
            Some(current) => CategoryId::from_index((current.index() + 1) % CATALOG.len()),
            None => CategoryId::from_index(0),
        };
        self.select_category(next, tx);
    }

    /// Move the chip selection one step left, wrapping at the start.
    pub fn prev_category(&mut self, tx: &mpsc::Sender<AppEvent>) {
        let last = CATALOG.len() - 1;
        let prev = match self.active_category() {
            Some(current) if current.index() > 0 => CategoryId::from_index(current.index() - 1),
            _ => CategoryId::from_index(last),
        };
        self.select_category(prev, tx);
    }

    /// Apply a settle ticket from the timer. Returns true when the feed changed.
    pub fn settle_category(&mut self, ticket: SettleTicket) -> bool {
        if !self.feed.settle(ticket) {
            return false;
        }
        self.clamp_selection();
        true
    }

    pub fn nav_down(&mut self) {
        let len = self.visible_listings().len();
        if len > 0 {
            self.selected_listing = self.selected_listing.saturating_add(1).min(len - 1);
        }
    }

    pub fn nav_up(&mut self) {
        self.selected_listing = self.selected_listing.saturating_sub(1);
    }

    pub fn clamp_selection(&mut self) {
        let len = self.visible_listings().len();
        self.selected_listing = self.selected_listing.min(len.saturating_sub(1));
    }

    // ------------------------------------------------------------------------
    // Detail screen
    // ------------------------------------------------------------------------

    /// Open the detail screen for the highlighted card.
    pub fn open_selected(&mut self) -> bool {
        let Some(id) = self.selected_listing().map(|l| l.id.clone()) else {
            return false;
        };
        self.open_listing(id);
        true
    }

    pub fn open_listing(&mut self, id: impl Into<String>) {
        self.detail_scroll = 0;
        self.nav.navigate(Route::Listing { id: id.into() });
    }

    /// Listing shown by the detail screen, if that screen is on top of the stack.
    pub fn detail_listing(&self) -> Option<Arc<Listing>> {
        match self.nav.current_screen() {
            Route::Listing { id } => self.feed.store().get(id),
            _ => None,
        }
    }

    pub fn scroll_detail_down(&mut self, rows: u16) {
        self.detail_scroll = self.detail_scroll.saturating_add(rows);
    }

    pub fn scroll_detail_up(&mut self, rows: u16) {
        self.detail_scroll = self.detail_scroll.saturating_sub(rows);
    }

    /// Keep the detail scroll inside its content.
    pub fn clamp_detail_scroll(&mut self, max: u16) {
        self.detail_scroll = self.detail_scroll.min(max);
    }

    // ------------------------------------------------------------------------
    // Session
    // ------------------------------------------------------------------------

    /// Open the screen for a route path such as `/listing/10003`.
    ///
    /// Returns false for paths that name no screen or an unknown listing.
    pub fn open_path(&mut self, path: &str) -> bool {
        match Route::from_path(path) {
            Some(Route::Listing { id }) => {
                if self.feed.store().get(&id).is_none() {
                    return false;
                }
                self.open_listing(id);
                true
            }
            Some(route) => {
                self.nav.navigate(route);
                true
            }
            None => false,
        }
    }

    /// Drop the local session and bring the login modal back.
    pub fn sign_out(&mut self) -> bool {
        if !self.session.is_signed_in() {
            return false;
        }
        self.session.sign_out();
        tracing::info!("Signed out");
        self.set_status("Signed out");
        self.present_login();
        true
    }

    pub fn present_login(&mut self) {
        self.login_focus = Strategy::Google;
        self.nav.navigate(Route::Login);
    }

    pub fn auth_in_flight(&self) -> bool {
        self.auth_handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Record a finished sign-in flow.
    ///
    /// A created session is activated and the shell returns to the tabs
    /// root. No session leaves everything in place.
    pub fn finish_sign_in(&mut self, strategy: Strategy, result: Result<Option<String>, String>) {
        self.auth_handle = None;
        match result {
            Ok(Some(session_id)) => {
                self.session.activate(session_id);
                self.nav.navigate(Route::Tabs);
                self.set_status("Signed in");
            }
            Ok(None) => {
                tracing::debug!(strategy = strategy.as_str(), "Sign-in produced no session");
            }
            Err(error) => {
                tracing::error!(strategy = strategy.as_str(), error = %error, "OAuth error");
                self.set_error(format!("Sign-in failed: {}", error));
            }
        }
    }

    // ------------------------------------------------------------------------
    // Status bar
    // ------------------------------------------------------------------------

    /// Set status message (will auto-expire after 3 seconds)
    pub fn set_status(&mut self, msg: impl Into<Cow<'static, str>>) {
        self.status_message = Some((msg.into(), Instant::now()));
        self.status_is_error = false;
    }

    /// Like [`set_status`](Self::set_status), styled as an error.
    pub fn set_error(&mut self, msg: impl Into<Cow<'static, str>>) {
        self.set_status(msg);
        self.status_is_error = true;
    }

    /// Clear status message if expired. Returns true if one was cleared.
    pub fn clear_expired_status(&mut self) -> bool {
        if let Some((_, time)) = &self.status_message {
            if time.elapsed() >= STATUS_TTL {
                self.status_message = None;
                self.status_is_error = false;
                return true;
            }
        }
        false
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.feed.unmount();
        if let Some(handle) = self.auth_handle.take() {
            handle.abort();
            tracing::debug!("Aborted sign-in task on App drop");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time;

    fn test_app() -> App {
        let store = ListingStore::bundled().unwrap();
        App::new(store, Duration::from_millis(200), None)
    }

    #[test]
    fn test_starts_on_unfiltered_feed() {
        let app = test_app();
        assert_eq!(app.context(), Context::Feed);
        assert_eq!(app.active_category(), None);
        assert_eq!(app.visible_listings().len(), app.feed.store().len());
    }

    #[test]
    fn test_nav_clamps_to_visible() {
        let mut app = test_app();
        app.nav_up();
        assert_eq!(app.selected_listing, 0);
        for _ in 0..100 {
            app.nav_down();
        }
        assert_eq!(app.selected_listing, app.visible_listings().len() - 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_category_cycle_wraps() {
        let (tx, _rx) = mpsc::channel(8);
        let mut app = test_app();

        app.next_category(&tx);
        assert_eq!(app.active_category(), Some(CategoryId::TinyHomes));
        app.prev_category(&tx);
        assert_eq!(app.active_category(), Some(CategoryId::Countryside));
        app.next_category(&tx);
        assert_eq!(app.active_category(), Some(CategoryId::TinyHomes));

        app.select_category(None, &tx);
        assert_eq!(app.active_category(), None);
        assert!(app.feed.is_loading());
    }

    #[tokio::test(start_paused = true)]
    async fn test_settle_updates_feed_and_resets_selection() {
        let (tx, mut rx) = mpsc::channel(8);
        let mut app = test_app();
        app.selected_listing = 5;

        app.select_category(Some(CategoryId::Beachfront), &tx);
        assert_eq!(app.selected_listing, 0);
        assert!(app.visible_listings().is_empty());

        let Some(AppEvent::CategorySettled(ticket)) = rx.recv().await else {
            panic!("expected a settle ticket");
        };
        assert!(app.settle_category(ticket));
        assert!(!app.visible_listings().is_empty());
        assert!(app
            .visible_listings()
            .iter()
            .all(|l| l.is_in_category("Beachfront")));
    }

    #[test]
    fn test_open_selected_pushes_detail() {
        let mut app = test_app();
        app.nav_down();
        let expected = app.selected_listing().unwrap().id.clone();

        assert!(app.open_selected());
        assert_eq!(app.context(), Context::Detail);
        assert_eq!(app.detail_listing().unwrap().id, expected);
    }

    #[test]
    fn test_detail_scroll_saturates() {
        let mut app = test_app();
        app.scroll_detail_up(3);
        assert_eq!(app.detail_scroll, 0);
        app.scroll_detail_down(10);
        app.clamp_detail_scroll(4);
        assert_eq!(app.detail_scroll, 4);
    }

    #[test]
    fn test_finish_sign_in_with_session_returns_to_tabs() {
        let mut app = test_app();
        app.open_listing("10001");
        app.present_login();
        assert_eq!(app.context(), Context::Login);

        app.finish_sign_in(Strategy::Google, Ok(Some("sess_42".to_string())));
        assert_eq!(app.session.session_id(), Some("sess_42"));
        assert_eq!(app.nav.current(), &Route::Tabs);
    }

    #[test]
    fn test_sign_out_presents_login() {
        let mut app = test_app();
        assert!(!app.sign_out());

        app.finish_sign_in(Strategy::Google, Ok(Some("sess_1".to_string())));
        assert!(app.sign_out());
        assert!(!app.session.is_signed_in());
        assert_eq!(app.nav.current(), &Route::Login);
    }

    #[test]
    fn test_open_path_resolves_routes() {
        let mut app = test_app();
        assert!(app.open_path("/listing/10003"));
        assert_eq!(app.detail_listing().unwrap().id, "10003");

        assert!(app.open_path("/(modals)/booking"));
        assert_eq!(app.context(), Context::Booking);

        assert!(!app.open_path("/listing/99999"));
        assert!(!app.open_path("/settings"));
    }

    #[test]
    fn test_finish_sign_in_without_session_stays() {
        let mut app = test_app();
        app.present_login();
        app.finish_sign_in(Strategy::Apple, Ok(None));
        assert!(!app.session.is_signed_in());
        assert_eq!(app.nav.current(), &Route::Login);
        assert!(app.status_message.is_none());
    }

    #[test]
    fn test_finish_sign_in_error_sets_error_status() {
        let mut app = test_app();
        app.present_login();
        app.finish_sign_in(Strategy::Google, Err("network down".to_string()));
        assert_eq!(app.nav.current(), &Route::Login);
        assert!(app.status_is_error);
        let (msg, _) = app.status_message.as_ref().unwrap();
        assert!(msg.contains("network down"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_status_expires_after_3_seconds() {
        let mut app = test_app();
        app.set_status("Link copied");

        time::advance(Duration::from_millis(2999)).await;
        assert!(!app.clear_expired_status());
        assert!(app.status_message.is_some());

        time::advance(Duration::from_millis(1)).await;
        assert!(app.clear_expired_status());
        assert!(app.status_message.is_none());
    }

    #[test]
    fn test_cycle_theme_round_trip() {
        let mut app = test_app();
        assert_eq!(app.cycle_theme(), "Light");
        assert_eq!(app.theme_variant, ThemeVariant::Light);
        assert_eq!(app.cycle_theme(), "Dark");
        assert_eq!(
            app.style("button_primary"),
            ThemeVariant::Dark.palette().button_primary
        );
    }

    #[test]
    fn test_modal_context_overrides_screen() {
        let mut app = test_app();
        app.open_listing("10002");
        app.nav.navigate(Route::Booking);
        assert_eq!(app.context(), Context::Booking);
        assert!(app.nav.back());
        assert_eq!(app.context(), Context::Detail);
    }
}
