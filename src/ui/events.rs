//! Application event handling.
//!
//! Applies results from background work: category settle timers and
//! sign-in flows.

use crate::app::{App, AppEvent};

/// Handle one event from a background task.
pub(super) fn handle_app_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::CategorySettled(ticket) => {
            if !app.settle_category(ticket) {
                tracing::trace!(generation = ticket.generation(), "Settle ticket dropped");
            }
        }
        AppEvent::AuthCompleted { strategy, result } => {
            app.finish_sign_in(strategy, result);
        }
        AppEvent::TaskPanicked { task, error } => {
            tracing::error!(task, error, "Background task panicked");
            app.set_error(format!("Internal error in {} task", task));
        }
    }
}
