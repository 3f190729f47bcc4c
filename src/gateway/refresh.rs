use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use tokio::sync::oneshot;

use crate::error::RefreshFailure;

/// Result every request blocked on a refresh receives: the new access token.
pub type RefreshOutcome = Result<String, RefreshFailure>;

#[derive(Debug, Default)]
struct RefreshState {
    refreshing: bool,
    waiters: VecDeque<oneshot::Sender<RefreshOutcome>>,
}

/// Single-flight guard for access-token renewal.
///
/// The first caller to [`join`](Self::join) while idle becomes the leader and
/// must perform the refresh; everyone arriving before it settles is queued and
/// receives the leader's outcome in arrival order.
#[derive(Debug, Default)]
pub struct RefreshCoordinator {
    state: Mutex<RefreshState>,
}

pub enum Ticket<'a> {
    Leader(RefreshLease<'a>),
    Follower(oneshot::Receiver<RefreshOutcome>),
}

impl RefreshCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, RefreshState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn join(&self) -> Ticket<'_> {
        let mut state = self.lock();
        if state.refreshing {
            let (tx, rx) = oneshot::channel();
            state.waiters.push_back(tx);
            tracing::debug!(queued = state.waiters.len(), "refresh in flight, request queued");
            return Ticket::Follower(rx);
        }

        state.refreshing = true;
        Ticket::Leader(RefreshLease {
            coordinator: self,
            settled: false,
        })
    }

    pub fn is_refreshing(&self) -> bool {
        self.lock().refreshing
    }

    pub fn pending(&self) -> usize {
        self.lock().waiters.len()
    }

    /// Return to idle and hand the outcome to every queued request, oldest first.
    fn settle(&self, outcome: &RefreshOutcome) -> usize {
        let waiters = {
            let mut state = self.lock();
            state.refreshing = false;
            std::mem::take(&mut state.waiters)
        };

        let count = waiters.len();
        for waiter in waiters {
            // A dropped receiver means that request was cancelled; nothing to deliver
            let _ = waiter.send(outcome.clone());
        }
        count
    }
}

/// Wait for the leader's outcome as a follower.
pub async fn wait(rx: oneshot::Receiver<RefreshOutcome>) -> RefreshOutcome {
    rx.await.unwrap_or(Err(RefreshFailure::Abandoned))
}

/// Held by the one caller performing the refresh.
///
/// Dropping it unsettled (a cancelled future, a panic) still returns the
/// coordinator to idle and rejects everyone queued.
pub struct RefreshLease<'a> {
    coordinator: &'a RefreshCoordinator,
    settled: bool,
}

impl RefreshLease<'_> {
    pub fn settle(mut self, outcome: &RefreshOutcome) -> usize {
        self.settled = true;
        self.coordinator.settle(outcome)
    }
}

impl Drop for RefreshLease<'_> {
    fn drop(&mut self) {
        if !self.settled {
            tracing::warn!("refresh abandoned before settling");
            self.coordinator.settle(&Err(RefreshFailure::Abandoned));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leader(coordinator: &RefreshCoordinator) -> RefreshLease<'_> {
        match coordinator.join() {
            Ticket::Leader(lease) => lease,
            Ticket::Follower(_) => panic!("expected to lead the refresh"),
        }
    }

    fn follower(coordinator: &RefreshCoordinator) -> oneshot::Receiver<RefreshOutcome> {
        match coordinator.join() {
            Ticket::Follower(rx) => rx,
            Ticket::Leader(_) => panic!("expected to be queued"),
        }
    }

    #[tokio::test]
    async fn only_first_caller_leads() {
        let coordinator = RefreshCoordinator::new();
        let lease = leader(&coordinator);
        let first = follower(&coordinator);
        let second = follower(&coordinator);
        assert!(coordinator.is_refreshing());
        assert_eq!(coordinator.pending(), 2);

        let delivered = lease.settle(&Ok("A2".to_string()));
        assert_eq!(delivered, 2);
        assert!(!coordinator.is_refreshing());
        assert_eq!(coordinator.pending(), 0);

        assert_eq!(wait(first).await, Ok("A2".to_string()));
        assert_eq!(wait(second).await, Ok("A2".to_string()));
    }

    #[test]
    fn every_waiter_receives_the_failure() {
        let coordinator = RefreshCoordinator::new();
        let lease = leader(&coordinator);
        let mut receivers: Vec<_> = (0..5).map(|_| follower(&coordinator)).collect();

        lease.settle(&Err(RefreshFailure::Rejected("invalid refresh token".into())));

        for rx in receivers.iter_mut() {
            let outcome = rx.try_recv().expect("settled");
            assert!(matches!(outcome, Err(RefreshFailure::Rejected(_))));
        }
    }

    #[tokio::test(flavor = "current_thread")]
    async fn waiters_resume_in_arrival_order() {
        use std::sync::{Arc, Mutex};

        let coordinator = RefreshCoordinator::new();
        let lease = leader(&coordinator);
        let receivers: Vec<_> = (0..6).map(|_| follower(&coordinator)).collect();
        let resumed = Arc::new(Mutex::new(Vec::new()));

        // Spawned newest-first so resume order can only come from settle
        let mut handles = Vec::new();
        for (index, rx) in receivers.into_iter().enumerate().rev() {
            let resumed = resumed.clone();
            handles.push(tokio::spawn(async move {
                let outcome = wait(rx).await;
                resumed.lock().unwrap().push((index, outcome));
            }));
        }
        for _ in 0..3 {
            tokio::task::yield_now().await;
        }
        assert!(resumed.lock().unwrap().is_empty());

        lease.settle(&Ok("A2".into()));
        for handle in handles {
            handle.await.unwrap();
        }

        let resumed = resumed.lock().unwrap();
        let order: Vec<usize> = resumed.iter().map(|(index, _)| *index).collect();
        assert_eq!(order, (0..6).collect::<Vec<_>>());
        assert!(resumed.iter().all(|(_, outcome)| outcome == &Ok("A2".to_string())));
    }

    #[tokio::test]
    async fn dropped_lease_rejects_queue_and_resets() {
        let coordinator = RefreshCoordinator::new();
        let lease = leader(&coordinator);
        let rx = follower(&coordinator);
        drop(lease);

        assert!(!coordinator.is_refreshing());
        assert_eq!(wait(rx).await, Err(RefreshFailure::Abandoned));

        // Next 401 starts a fresh cycle
        let _next = leader(&coordinator);
    }

    #[test]
    fn cancelled_follower_does_not_block_settle() {
        let coordinator = RefreshCoordinator::new();
        let lease = leader(&coordinator);
        drop(follower(&coordinator));
        let live = follower(&coordinator);

        assert_eq!(lease.settle(&Ok("A3".into())), 2);
        drop(live);
    }
}
