//! Single-flight gate for token refresh.
//!
//! At most one refresh call is outstanding at a time. The first request to
//! hit a 401 becomes the leader and performs the refresh; every concurrent
//! 401 joins as a waiter and suspends on a oneshot channel. When the refresh
//! settles the leader drains the queue in FIFO order, completing every waiter
//! exactly once with the shared outcome.
//!
//! The flag check-and-set happens under an async mutex, so the guarantee
//! holds on multi-threaded runtimes, not just cooperative single-threaded
//! ones.

use async_lock::Mutex;
use tokio::sync::oneshot;

use crate::error::AuthError;

pub(crate) type RefreshOutcome = Result<(), AuthError>;

/// What `join` handed this caller.
pub(crate) enum Ticket {
    /// No refresh was in flight — this caller must run it and `settle`.
    Leader,
    /// A refresh is in flight — await the shared outcome.
    Waiter(oneshot::Receiver<RefreshOutcome>),
}

#[derive(Default)]
struct GateState {
    in_flight: bool,
    waiters: Vec<oneshot::Sender<RefreshOutcome>>,
}

/// Shared refresh state for one HTTP client instance.
#[derive(Default)]
pub(crate) struct RefreshGate {
    state: Mutex<GateState>,
}

impl RefreshGate {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Claim leadership or enqueue as a waiter.
    pub(crate) async fn join(&self) -> Ticket {
        let mut state = self.state.lock().await;
        if state.in_flight {
            let (tx, rx) = oneshot::channel();
            state.waiters.push(tx);
            Ticket::Waiter(rx)
        } else {
            state.in_flight = true;
            Ticket::Leader
        }
    }

    /// Publish the refresh outcome: clears the in-flight flag and completes
    /// every queued waiter in enqueue order. Called by the leader on every
    /// exit path, success or failure.
    pub(crate) async fn settle(&self, outcome: RefreshOutcome) {
        let waiters = {
            let mut state = self.state.lock().await;
            state.in_flight = false;
            std::mem::take(&mut state.waiters)
        };
        for waiter in waiters {
            // A waiter that gave up (dropped its receiver) is skipped.
            let _ = waiter.send(outcome.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_first_join_leads_then_waits() {
        let gate = RefreshGate::new();
        assert!(matches!(gate.join().await, Ticket::Leader));
        assert!(matches!(gate.join().await, Ticket::Waiter(_)));
        assert!(matches!(gate.join().await, Ticket::Waiter(_)));
    }

    #[tokio::test]
    async fn test_settle_completes_every_waiter_with_outcome() {
        let gate = RefreshGate::new();
        let Ticket::Leader = gate.join().await else {
            panic!("expected leader");
        };

        let mut receivers = Vec::new();
        for _ in 0..4 {
            match gate.join().await {
                Ticket::Waiter(rx) => receivers.push(rx),
                Ticket::Leader => panic!("second leader while refresh in flight"),
            }
        }

        gate.settle(Err(AuthError::MissingRefreshToken)).await;

        for rx in receivers {
            assert_eq!(rx.await.unwrap(), Err(AuthError::MissingRefreshToken));
        }
    }

    #[tokio::test]
    async fn test_gate_reopens_after_settle() {
        let gate = RefreshGate::new();
        let Ticket::Leader = gate.join().await else {
            panic!("expected leader");
        };
        gate.settle(Ok(())).await;
        assert!(matches!(gate.join().await, Ticket::Leader));
    }

    #[tokio::test]
    async fn test_dropped_waiter_does_not_block_settle() {
        let gate = RefreshGate::new();
        let Ticket::Leader = gate.join().await else {
            panic!("expected leader");
        };
        let Ticket::Waiter(rx) = gate.join().await else {
            panic!("expected waiter");
        };
        drop(rx);
        gate.settle(Ok(())).await;
        assert!(matches!(gate.join().await, Ticket::Leader));
    }
}
