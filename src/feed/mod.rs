//! Home feed view-state.
//!
//! - [`controller`] - `Idle`/`Loading` state machine over the listing store
//! - [`timer`] - single-slot cancellable settle timer
//!
//! # Example
//!
//! ```ignore
//! let mut feed = FeedController::new(store, DEFAULT_SETTLE_DELAY);
//! feed.select_category("Cabins", &event_tx); // Loading("Cabins") right away
//! // ...later, when the ticket arrives on the event channel:
//! feed.settle(ticket); // Idle("Cabins", filtered)
//! ```

mod controller;
mod timer;

pub use controller::{FeedController, FeedState, DEFAULT_SETTLE_DELAY};
pub use timer::{SettleTicket, SettleTimer};
