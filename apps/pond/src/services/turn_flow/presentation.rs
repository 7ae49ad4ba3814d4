//! What the rendering layer should show for the current turn.

use crate::domain::{ColumnChoice, DecisionIntent, Participant};

use super::state::TurnState;

/// Control on the turn-start row that the driver is about to press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollControl {
    Hop,
    Stop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChoiceView {
    pub choice: ColumnChoice,
    /// The driver has picked this pairing and is about to submit it.
    pub highlighted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnView {
    /// No dice shown: offer Hop, and Stop once the run has progress.
    AwaitingRoll {
        can_stop: bool,
        highlight: Option<RollControl>,
        interactive: bool,
    },
    Choosing {
        choices: Vec<ChoiceView>,
        interactive: bool,
    },
    /// Dice shown with no legal pairing; the only way on is a forced end.
    Croaked { highlighted: bool, interactive: bool },
    Finished { winner: Participant },
}

impl TurnView {
    pub fn derive(state: &TurnState, intent: DecisionIntent) -> Self {
        if let Some(winner) = &state.snapshot.winner {
            return Self::Finished {
                winner: winner.clone(),
            };
        }

        let interactive = state
            .active_participant()
            .is_some_and(|participant| !participant.is_autonomous());
        // Highlights anticipate the driver, so they never show on a human turn.
        let intent = if interactive {
            DecisionIntent::None
        } else {
            intent
        };

        if !state.roll.is_rolled() {
            let highlight = match intent {
                DecisionIntent::Hop => Some(RollControl::Hop),
                DecisionIntent::Stop => Some(RollControl::Stop),
                _ => None,
            };
            return Self::AwaitingRoll {
                can_stop: state.snapshot.run_progress() > 0,
                highlight,
                interactive,
            };
        }

        if state.roll.is_croaked() {
            return Self::Croaked {
                highlighted: intent == DecisionIntent::Croaked,
                interactive,
            };
        }

        let target = intent.target();
        Self::Choosing {
            choices: state
                .roll
                .choices
                .iter()
                .map(|choice| ChoiceView {
                    choice: *choice,
                    highlighted: target == Some(*choice),
                })
                .collect(),
            interactive,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GameSettings, GameSnapshot, PlayerMode, RollOutcome};

    fn state_for(mode: PlayerMode, hops: usize, roll: RollOutcome) -> TurnState {
        TurnState {
            snapshot: GameSnapshot {
                in_progress: true,
                settings: GameSettings {
                    players: vec![
                        Participant::new(0, "Lily", mode),
                        Participant::new(1, "Pad", PlayerMode::Human),
                    ],
                    win_cols: 3,
                },
                current_player: 0,
                hops,
                ..GameSnapshot::default()
            },
            roll,
            walkthrough_open: false,
            revision: 0,
        }
    }

    #[test]
    fn stop_is_offered_only_with_run_progress() {
        let fresh = TurnView::derive(
            &state_for(PlayerMode::Human, 0, RollOutcome::default()),
            DecisionIntent::None,
        );
        assert!(matches!(
            fresh,
            TurnView::AwaitingRoll {
                can_stop: false,
                interactive: true,
                ..
            }
        ));

        let mid_run = TurnView::derive(
            &state_for(PlayerMode::Human, 2, RollOutcome::default()),
            DecisionIntent::None,
        );
        assert!(matches!(mid_run, TurnView::AwaitingRoll { can_stop: true, .. }));
    }

    #[test]
    fn driver_target_is_highlighted() {
        let seven_nine = ColumnChoice::from_sums(7, Some(9)).unwrap();
        let six = ColumnChoice::from_sums(6, None).unwrap();
        let roll = RollOutcome::new([3, 4, 4, 5], vec![six, seven_nine]);
        let view = TurnView::derive(
            &state_for(PlayerMode::Risky, 1, roll),
            DecisionIntent::Choose(seven_nine),
        );
        let (choices, interactive) = match view {
            TurnView::Choosing {
                choices,
                interactive,
            } => (choices, interactive),
            other => panic!("expected choices, got {other:?}"),
        };
        assert!(!interactive);
        assert_eq!(
            choices.iter().filter(|c| c.highlighted).map(|c| c.choice).collect::<Vec<_>>(),
            vec![seven_nine]
        );
    }

    #[test]
    fn empty_choices_after_a_roll_is_croaked() {
        let roll = RollOutcome::new([1, 1, 1, 1], Vec::new());
        let view = TurnView::derive(&state_for(PlayerMode::Safe, 3, roll), DecisionIntent::Croaked);
        assert_eq!(
            view,
            TurnView::Croaked {
                highlighted: true,
                interactive: false
            }
        );
    }

    #[test]
    fn human_turns_never_show_driver_highlights() {
        let view = TurnView::derive(
            &state_for(PlayerMode::Human, 1, RollOutcome::default()),
            DecisionIntent::Hop,
        );
        assert!(matches!(view, TurnView::AwaitingRoll { highlight: None, .. }));
    }
}
