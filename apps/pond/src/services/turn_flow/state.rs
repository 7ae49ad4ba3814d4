//! Turn state shared by the controller and the autonomous driver.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;
use tracing::warn;

use crate::domain::{GameSnapshot, Participant, RollOutcome};
use crate::error::{AppError, EngineOp};

/// Everything the turn layer knows about the game at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnState {
    pub snapshot: GameSnapshot,
    pub roll: RollOutcome,
    pub walkthrough_open: bool,
    /// Bumped on every snapshot replacement or roll change.
    pub revision: u64,
}

impl TurnState {
    pub fn active_participant(&self) -> Option<&Participant> {
        self.snapshot.active_participant()
    }

    /// Autonomous control applies: active participant is not Human, the game
    /// is still running and no walkthrough is open.
    pub fn autonomous_applies(&self) -> bool {
        !self.walkthrough_open && self.snapshot.active_is_autonomous() && !self.snapshot.is_over()
    }
}

struct Inner {
    tx: watch::Sender<TurnState>,
    in_flight: Mutex<Option<EngineOp>>,
}

/// Handle to the shared [`TurnState`]. Cheap to clone.
#[derive(Clone)]
pub struct SharedTurn {
    inner: Arc<Inner>,
}

impl SharedTurn {
    pub fn new(snapshot: GameSnapshot) -> Self {
        let (tx, _rx) = watch::channel(TurnState {
            snapshot,
            roll: RollOutcome::default(),
            walkthrough_open: false,
            revision: 0,
        });
        Self {
            inner: Arc::new(Inner {
                tx,
                in_flight: Mutex::new(None),
            }),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<TurnState> {
        self.inner.tx.subscribe()
    }

    pub fn current(&self) -> TurnState {
        self.inner.tx.borrow().clone()
    }

    /// Replace the snapshot wholesale, keeping any displayed roll.
    pub fn replace_snapshot(&self, snapshot: GameSnapshot) {
        self.inner.tx.send_modify(|state| {
            state.snapshot = snapshot;
            state.revision += 1;
        });
    }

    /// Replace the snapshot after a mutating call and clear the roll it
    /// consumed, as one change.
    pub fn commit(&self, snapshot: GameSnapshot) {
        self.inner.tx.send_modify(|state| {
            state.snapshot = snapshot;
            state.roll.clear();
            state.revision += 1;
        });
    }

    pub fn set_roll(&self, roll: RollOutcome) {
        self.inner.tx.send_modify(|state| {
            state.roll = roll;
            state.revision += 1;
        });
    }

    pub fn clear_roll(&self) {
        self.inner.tx.send_if_modified(|state| {
            if !state.roll.is_rolled() && state.roll.choices.is_empty() {
                return false;
            }
            state.roll.clear();
            state.revision += 1;
            true
        });
    }

    /// Returns whether the flag changed.
    pub fn set_walkthrough_open(&self, open: bool) -> bool {
        self.inner.tx.send_if_modified(|state| {
            if state.walkthrough_open == open {
                return false;
            }
            state.walkthrough_open = open;
            true
        })
    }

    pub fn mutation_in_flight(&self) -> Option<EngineOp> {
        *self.inner.in_flight.lock()
    }

    /// Claim the mutation latch for `op`. Only one mutating engine call may
    /// be outstanding; a second claimant gets [`AppError::Busy`].
    pub fn begin_mutation(&self, op: EngineOp) -> Result<MutationGuard, AppError> {
        let mut slot = self.inner.in_flight.lock();
        if let Some(pending) = *slot {
            warn!(%op, %pending, "mutating call refused while another is in flight");
            return Err(AppError::Busy { pending });
        }
        *slot = Some(op);
        Ok(MutationGuard {
            inner: Arc::clone(&self.inner),
        })
    }
}

/// Releases the mutation latch on drop.
pub struct MutationGuard {
    inner: Arc<Inner>,
}

impl Drop for MutationGuard {
    fn drop(&mut self) {
        *self.inner.in_flight.lock() = None;
        // Watchers that saw a change while the latch was held skipped it;
        // wake them again without moving the revision.
        self.inner.tx.send_modify(|_| {});
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latch_admits_one_mutation_at_a_time() {
        let shared = SharedTurn::new(GameSnapshot::default());
        let guard = shared.begin_mutation(EngineOp::RollDice).unwrap();
        assert_eq!(shared.mutation_in_flight(), Some(EngineOp::RollDice));

        let refused = shared.begin_mutation(EngineOp::EndRun);
        assert!(matches!(
            refused,
            Err(AppError::Busy {
                pending: EngineOp::RollDice
            })
        ));

        drop(guard);
        assert_eq!(shared.mutation_in_flight(), None);
        assert!(shared.begin_mutation(EngineOp::EndRun).is_ok());
    }

    #[test]
    fn revision_tracks_snapshot_and_roll_changes_only() {
        let shared = SharedTurn::new(GameSnapshot::default());
        assert_eq!(shared.current().revision, 0);

        shared.set_roll(RollOutcome::new([1, 2, 3, 4], Vec::new()));
        assert_eq!(shared.current().revision, 1);

        shared.clear_roll();
        shared.clear_roll();
        assert_eq!(shared.current().revision, 2);

        assert!(shared.set_walkthrough_open(true));
        assert!(!shared.set_walkthrough_open(true));
        assert_eq!(shared.current().revision, 2);

        shared.set_roll(RollOutcome::new([1, 2, 3, 4], Vec::new()));
        shared.replace_snapshot(GameSnapshot::default());
        assert!(shared.current().roll.is_rolled());
        shared.commit(GameSnapshot::default());
        assert!(!shared.current().roll.is_rolled());
        assert_eq!(shared.current().revision, 5);
    }

    #[test]
    fn releasing_the_latch_wakes_watchers_without_a_new_revision() {
        let shared = SharedTurn::new(GameSnapshot::default());
        let mut changes = shared.subscribe();
        let guard = shared.begin_mutation(EngineOp::EndRun).unwrap();

        // a commit made under the latch is seen and consumed first
        shared.commit(GameSnapshot::default());
        assert!(changes.has_changed().unwrap());
        changes.borrow_and_update();

        drop(guard);
        assert!(changes.has_changed().unwrap());
        assert_eq!(changes.borrow_and_update().revision, 1);
    }
}
