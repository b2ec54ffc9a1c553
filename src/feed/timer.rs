use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Token delivered when a settle timer fires.
///
/// Carries the generation it was scheduled under, so a ticket that was
/// already in flight when its timer got superseded can still be recognized
/// as stale by the receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettleTicket {
    generation: u64,
}

impl SettleTicket {
    pub fn generation(self) -> u64 {
        self.generation
    }
}

/// A single-slot, cancellable delay.
///
/// At most one timer is outstanding: scheduling a new one aborts the
/// previous task first. Dropping the timer aborts whatever is pending.
#[derive(Debug, Default)]
pub struct SettleTimer {
    handle: Option<JoinHandle<()>>,
    generation: u64,
}

impl SettleTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a ticket to be sent on `tx` after `delay`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule<T>(&mut self, delay: Duration, tx: &mpsc::Sender<T>) -> SettleTicket
    where
        T: From<SettleTicket> + Send + 'static,
    {
        if self.cancel() {
            tracing::debug!(generation = self.generation, "Superseded pending settle timer");
        }

        self.generation = self.generation.wrapping_add(1);
        let ticket = SettleTicket {
            generation: self.generation,
        };

        let tx = tx.clone();
        self.handle = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Err(e) = tx.send(T::from(ticket)).await {
                tracing::warn!(error = %e, "Failed to deliver settle ticket (receiver dropped)");
            }
        }));

        ticket
    }

    /// Abort the outstanding timer, if any. Returns true if one was pending.
    ///
    /// Every ticket issued so far becomes stale, including one that already
    /// reached the channel before the abort.
    pub fn cancel(&mut self) -> bool {
        self.generation = self.generation.wrapping_add(1);
        match self.handle.take() {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    /// Whether `ticket` belongs to the most recently scheduled timer.
    pub fn is_current(&self, ticket: SettleTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Release the handle once its ticket has been consumed.
    pub fn complete(&mut self, ticket: SettleTicket) {
        if self.is_current(ticket) {
            self.handle = None;
        }
    }
}

impl Drop for SettleTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn fires_after_delay() {
        let (tx, mut rx) = mpsc::channel::<SettleTicket>(4);
        let mut timer = SettleTimer::new();

        let ticket = timer.schedule(Duration::from_millis(200), &tx);
        assert!(timer.handle.is_some());

        let early = tokio::time::timeout(Duration::from_millis(199), rx.recv()).await;
        assert!(early.is_err(), "ticket delivered before the delay elapsed");

        assert_eq!(rx.recv().await, Some(ticket));
        assert!(timer.is_current(ticket));
    }

    #[tokio::test(start_paused = true)]
    async fn rescheduling_aborts_previous_timer() {
        let (tx, mut rx) = mpsc::channel::<SettleTicket>(4);
        let mut timer = SettleTimer::new();

        let first = timer.schedule(Duration::from_millis(200), &tx);
        let second = timer.schedule(Duration::from_millis(200), &tx);
        assert_ne!(first, second);
        assert!(!timer.is_current(first));

        assert_eq!(rx.recv().await, Some(second));
        let extra = tokio::time::timeout(Duration::from_secs(1), rx.recv()).await;
        assert!(extra.is_err(), "superseded ticket was delivered");
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_prevents_delivery() {
        let (tx, mut rx) = mpsc::channel::<SettleTicket>(4);
        let mut timer = SettleTimer::new();

        timer.schedule(Duration::from_millis(200), &tx);
        assert!(timer.cancel());
        assert!(!timer.cancel());
        assert!(timer.handle.is_none());

        let result = tokio::time::timeout(Duration::from_secs(1), rx.recv()).await;
        assert!(result.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_invalidates_delivered_ticket() {
        let (tx, mut rx) = mpsc::channel::<SettleTicket>(4);
        let mut timer = SettleTimer::new();

        timer.schedule(Duration::from_millis(200), &tx);
        let delivered = rx.recv().await.unwrap();
        assert!(timer.is_current(delivered));

        timer.cancel();
        assert!(!timer.is_current(delivered));
    }

    #[tokio::test(start_paused = true)]
    async fn drop_cancels_pending_timer() {
        let (tx, mut rx) = mpsc::channel::<SettleTicket>(4);
        {
            let mut timer = SettleTimer::new();
            timer.schedule(Duration::from_millis(50), &tx);
        }
        let result = tokio::time::timeout(Duration::from_secs(1), rx.recv()).await;
        assert!(result.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn complete_releases_current_handle_only() {
        let (tx, mut rx) = mpsc::channel::<SettleTicket>(4);
        let mut timer = SettleTimer::new();

        let stale = timer.schedule(Duration::from_millis(10), &tx);
        let current = timer.schedule(Duration::from_millis(10), &tx);

        timer.complete(stale);
        assert!(timer.handle.is_some());

        assert_eq!(rx.recv().await, Some(current));
        timer.complete(current);
        assert!(timer.handle.is_none());
    }
}
