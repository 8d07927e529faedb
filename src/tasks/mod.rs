//! Deferred spin operations.
//!
//! A spin is a two-phase timed transaction: the rotation transition is applied
//! after a short style-reset delay, and the outcome commit fires once the
//! animation duration has elapsed. Both deferred steps are scheduled together,
//! keyed to the spin's transaction id, instead of living in ad-hoc timer
//! callbacks.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use uuid::Uuid;

/// Handle for one scheduled spin timeline.
///
/// Dropping the ticket detaches the timeline (it still runs to completion);
/// `abort` cancels whatever has not fired yet. The product never aborts an
/// in-flight spin, but shutdown paths and tests may.
pub struct SpinTicket {
    spin_id: Uuid,
    handle: JoinHandle<()>,
}

impl SpinTicket {
    pub fn spin_id(&self) -> Uuid {
        self.spin_id
    }

    pub fn abort(&self) {
        self.handle.abort();
    }

    /// Wait until both deferred steps have run (or the timeline was aborted).
    pub async fn join(self) {
        let _ = self.handle.await;
    }
}

/// Schedule the two deferred steps of a spin.
///
/// Both delays are measured from now (spin start): `rotation_start` runs after
/// `rotation_delay`, `commit` runs once `commit_delay` has elapsed in total.
pub fn schedule_spin<R, C>(
    spin_id: Uuid,
    rotation_delay: Duration,
    commit_delay: Duration,
    rotation_start: R,
    commit: C,
) -> SpinTicket
where
    R: Future<Output = ()> + Send + 'static,
    C: Future<Output = ()> + Send + 'static,
{
    let handle = tokio::spawn(async move {
        tokio::time::sleep(rotation_delay).await;
        rotation_start.await;
        tokio::time::sleep(commit_delay.saturating_sub(rotation_delay)).await;
        commit.await;
    });

    SpinTicket { spin_id, handle }
}
