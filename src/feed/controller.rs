use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

use super::timer::{SettleTicket, SettleTimer};
use crate::listings::{filter, Listing, ListingStore};

/// Delay between a category selection and its filtered results appearing.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(200);

/// What the home feed is showing.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedState {
    /// Results for `category` are settled and can be rendered.
    Idle {
        category: String,
        results: Vec<Arc<Listing>>,
    },
    /// A category switch is in progress; render nothing.
    Loading { category: String },
}

impl FeedState {
    pub fn category(&self) -> &str {
        match self {
            Self::Idle { category, .. } | Self::Loading { category } => category,
        }
    }
}

/// Mediates between category selection and the rendered listing feed.
///
/// Every selection moves to [`FeedState::Loading`] synchronously and
/// (re)starts a settle timer. When the timer's ticket comes back through the
/// event loop, [`settle`](Self::settle) filters the store and moves to
/// [`FeedState::Idle`]. Tickets from superseded selections are ignored, so
/// only the latest selection ever settles.
#[derive(Debug)]
pub struct FeedController {
    store: ListingStore,
    state: FeedState,
    timer: SettleTimer,
    settle_delay: Duration,
}

impl FeedController {
    /// Start in `Idle("", all())`.
    pub fn new(store: ListingStore, settle_delay: Duration) -> Self {
        let results = store.all().to_vec();
        Self {
            store,
            state: FeedState::Idle {
                category: String::new(),
                results,
            },
            timer: SettleTimer::new(),
            settle_delay,
        }
    }

    /// Switch to `category`, entering `Loading` immediately.
    ///
    /// Any pending settle is cancelled; the returned ticket is the only one
    /// that [`settle`](Self::settle) will accept until the next selection.
    pub fn select_category<T>(
        &mut self,
        category: impl Into<String>,
        notify: &mpsc::Sender<T>,
    ) -> SettleTicket
    where
        T: From<SettleTicket> + Send + 'static,
    {
        let category = category.into();
        tracing::debug!(category = %category, "Category selected, loading");
        self.state = FeedState::Loading { category };
        self.timer.schedule(self.settle_delay, notify)
    }

    /// Apply a settle ticket. Returns false (and changes nothing) when the
    /// ticket is stale or the feed is not loading.
    pub fn settle(&mut self, ticket: SettleTicket) -> bool {
        if !self.timer.is_current(ticket) {
            tracing::debug!(
                generation = ticket.generation(),
                "Ignoring stale settle ticket"
            );
            return false;
        }

        let FeedState::Loading { category } = &self.state else {
            return false;
        };

        let category = category.clone();
        let results = filter(self.store.all(), &category);
        tracing::debug!(category = %category, results = results.len(), "Feed settled");

        self.timer.complete(ticket);
        self.state = FeedState::Idle { category, results };
        true
    }

    /// Cancel any pending settle. Call when the feed is torn down.
    pub fn unmount(&mut self) {
        if self.timer.cancel() {
            tracing::debug!("Cancelled pending settle on unmount");
        }
    }

    pub fn state(&self) -> &FeedState {
        &self.state
    }

    /// Currently selected category label ("" for no filter).
    pub fn category(&self) -> &str {
        self.state.category()
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, FeedState::Loading { .. })
    }

    /// Listings the presentation layer should draw: empty while loading.
    pub fn visible(&self) -> &[Arc<Listing>] {
        match &self.state {
            FeedState::Idle { results, .. } => results,
            FeedState::Loading { .. } => &[],
        }
    }

    pub fn store(&self) -> &ListingStore {
        &self.store
    }
}
