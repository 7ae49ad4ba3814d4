mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{ms, pass, settle, start, start_with};
use pond::domain::{EngineColumns, PlayerMode, RollOutcome};
use pond::error::{AppError, EngineError, EngineOp};
use pond::errors::ErrorCode;
use pond::{PacingConfig, TurnView};
use pond_test_support::fixtures::{choice, croaked_roll, roll, snapshot, with_hops};
use pond_test_support::{EngineCall, ScriptedEngine};

fn human_then_ai() -> pond::GameSnapshot {
    snapshot(&[PlayerMode::Human, PlayerMode::Safe], 0)
}

#[tokio::test(start_paused = true)]
async fn roll_clears_the_old_dice_and_waits_briefly() {
    let h = start(human_then_ai(), PacingConfig::default()).await;
    let controller = h.session.controller();
    let before = tokio::time::Instant::now();

    controller.request_roll().await.unwrap();

    let rolled = h.engine.first_call_at(EngineOp::RollDice).unwrap();
    assert!(rolled - before >= ms(100));
    assert_eq!(h.session.state().roll, roll());
    assert!(matches!(
        h.session.view(),
        TurnView::Choosing {
            interactive: true,
            ..
        }
    ));

    // dice already showing: nothing more is rolled
    controller.request_roll().await.unwrap();
    assert_eq!(h.engine.count(EngineOp::RollDice), 1);
}

#[tokio::test(start_paused = true)]
async fn choice_without_a_snapshot_leaves_the_game_untouched() {
    let engine = Arc::new(ScriptedEngine::new(human_then_ai()));
    engine.push_roll(Ok(Some(RollOutcome::new(
        [3, 4, 4, 5],
        vec![choice(7, Some(9))],
    ))));
    engine.push_choose_columns(Ok(None));
    let h = start_with(engine, PacingConfig::default()).await;
    let controller = h.session.controller();

    controller.request_roll().await.unwrap();
    let before = h.session.state().snapshot;

    let result = controller.request_choice(choice(7, Some(9))).await;
    assert!(result.is_err());

    assert_eq!(h.session.state().snapshot, before);
    assert!(!h.session.state().roll.is_rolled());
    assert_eq!(
        h.notifier.messages(ErrorCode::ChoiceError),
        vec!["Something went wrong choosing columns".to_string()]
    );
    assert_eq!(
        h.engine.mutations().last(),
        Some(&EngineCall::ChooseColumns(EngineColumns {
            first: 5,
            second: Some(7)
        }))
    );
}

#[tokio::test(start_paused = true)]
async fn single_column_choice_sends_one_engine_index() {
    let engine = Arc::new(ScriptedEngine::new(human_then_ai()));
    engine.push_roll(Ok(Some(RollOutcome::new(
        [1, 4, 6, 6],
        vec![choice(5, None)],
    ))));
    let h = start_with(engine, PacingConfig::default()).await;
    let controller = h.session.controller();

    controller.request_roll().await.unwrap();
    controller.request_choice(choice(5, None)).await.unwrap();

    assert_eq!(
        h.engine.mutations(),
        vec![
            EngineCall::RollDice,
            EngineCall::ChooseColumns(EngineColumns {
                first: 3,
                second: None
            }),
        ]
    );
    assert_eq!(h.session.state().snapshot.hops, 1);
    assert!(!h.session.state().roll.is_rolled());
}

#[tokio::test(start_paused = true)]
async fn failed_engine_call_on_choice_raises_both_notices() {
    let engine = Arc::new(ScriptedEngine::new(human_then_ai()));
    engine.push_choose_columns(Err(EngineError::rejected(
        EngineOp::ChooseColumns,
        "column locked",
    )));
    let h = start_with(engine, PacingConfig::default()).await;
    let controller = h.session.controller();

    controller.request_roll().await.unwrap();
    assert!(controller
        .request_choice(choice(5, Some(9)))
        .await
        .is_err());

    assert_eq!(
        h.notifier.messages(ErrorCode::ChooseColumnsError),
        vec!["Failed to choose columns: column locked".to_string()]
    );
    assert_eq!(h.notifier.count(ErrorCode::ChoiceError), 1);
}

#[tokio::test(start_paused = true)]
async fn croaked_roll_only_leads_to_a_forced_end() {
    let engine = Arc::new(ScriptedEngine::new(snapshot(
        &[PlayerMode::Human, PlayerMode::Human],
        0,
    )));
    engine.push_roll(Ok(Some(croaked_roll())));
    let h = start_with(engine, PacingConfig::default()).await;
    let controller = h.session.controller();

    controller.request_roll().await.unwrap();
    assert_eq!(
        h.session.view(),
        TurnView::Croaked {
            highlighted: false,
            interactive: true
        }
    );

    controller.request_end_run(true).await.unwrap();
    assert_eq!(
        h.engine.mutations(),
        vec![EngineCall::RollDice, EngineCall::EndRun { forced: true }]
    );
    let state = h.session.state();
    assert_eq!(state.snapshot.current_player, 1);
    assert_eq!(state.snapshot.run_progress(), 0);
    assert!(!state.roll.is_rolled());
}

#[tokio::test(start_paused = true)]
async fn croaked_roll_cannot_be_banked_or_chosen_from() {
    let engine = Arc::new(ScriptedEngine::new(with_hops(
        snapshot(&[PlayerMode::Human, PlayerMode::Human], 0),
        3,
    )));
    engine.push_roll(Ok(Some(croaked_roll())));
    let h = start_with(engine, PacingConfig::default()).await;
    let controller = h.session.controller();

    controller.request_roll().await.unwrap();
    controller.request_end_run(false).await.unwrap();
    controller.request_choice(choice(7, None)).await.unwrap();

    assert_eq!(h.engine.mutations(), vec![EngineCall::RollDice]);
    let state = h.session.state();
    assert!(state.roll.is_croaked());
    assert_eq!(state.snapshot.run_progress(), 3);

    controller.request_end_run(true).await.unwrap();
    assert_eq!(
        h.engine.mutations(),
        vec![EngineCall::RollDice, EngineCall::EndRun { forced: true }]
    );
}

#[tokio::test(start_paused = true)]
async fn shown_dice_must_be_used_before_banking() {
    let engine = Arc::new(ScriptedEngine::new(with_hops(human_then_ai(), 2)));
    let h = start_with(engine, PacingConfig::default()).await;
    let controller = h.session.controller();

    controller.request_roll().await.unwrap();
    controller.request_end_run(false).await.unwrap();
    controller.request_end_run(true).await.unwrap();
    // the fixture roll offers 5&9 and 6&8 only
    controller.request_choice(choice(7, Some(9))).await.unwrap();
    assert_eq!(h.engine.mutations(), vec![EngineCall::RollDice]);
    assert!(h.session.state().roll.is_rolled());

    controller.request_choice(choice(6, Some(8))).await.unwrap();
    controller.request_end_run(false).await.unwrap();
    assert_eq!(
        h.engine.mutations(),
        vec![
            EngineCall::RollDice,
            EngineCall::ChooseColumns(EngineColumns {
                first: 4,
                second: Some(6)
            }),
            EngineCall::EndRun { forced: false },
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn banking_wakes_the_driver_for_the_next_seat() {
    let h = start(with_hops(human_then_ai(), 2), PacingConfig::default()).await;

    h.session.controller().request_end_run(false).await.unwrap();
    settle().await;
    assert_eq!(h.session.state().snapshot.current_player, 1);
    assert!(h.session.driver().is_busy());

    pass(ms(500)).await;
    assert_eq!(h.engine.count(EngineOp::CheckContinue), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn handoff_to_an_autonomous_seat_never_stalls_across_workers() {
    for _ in 0..50 {
        let h = start(with_hops(human_then_ai(), 1), PacingConfig::immediate()).await;

        h.session.controller().request_end_run(false).await.unwrap();

        let decided = tokio::time::timeout(Duration::from_secs(2), async {
            while h.engine.count(EngineOp::CheckContinue) == 0 {
                tokio::time::sleep(Duration::from_millis(1)).await;
            }
        })
        .await;
        assert!(decided.is_ok(), "autonomous seat never started deciding");
        h.session.shutdown();
    }
}

#[tokio::test(start_paused = true)]
async fn stop_is_offered_once_the_run_has_progress() {
    let engine = Arc::new(ScriptedEngine::new(human_then_ai()));
    let h = start_with(engine, PacingConfig::default()).await;
    assert!(matches!(
        h.session.view(),
        TurnView::AwaitingRoll {
            can_stop: false,
            ..
        }
    ));

    h.engine.push_game_state(Ok(with_hops(human_then_ai(), 2)));
    h.session.reload().await.unwrap();
    assert!(matches!(
        h.session.view(),
        TurnView::AwaitingRoll {
            can_stop: true,
            interactive: true,
            ..
        }
    ));

    h.session.controller().request_end_run(false).await.unwrap();
    assert_eq!(
        h.engine.mutations(),
        vec![EngineCall::EndRun { forced: false }]
    );
}

#[tokio::test(start_paused = true)]
async fn direct_input_is_ignored_on_an_autonomous_turn() {
    let h = start(
        snapshot(&[PlayerMode::Risky, PlayerMode::Human], 0),
        PacingConfig::default(),
    )
    .await;
    let controller = h.session.controller();

    controller.request_roll().await.unwrap();
    controller.request_choice(choice(6, Some(8))).await.unwrap();
    controller.request_end_run(false).await.unwrap();
    settle().await;

    // the driver is still thinking; none of the above reached the engine
    assert!(h.engine.mutations().is_empty());
}

#[tokio::test(start_paused = true)]
async fn overlapping_rolls_are_refused() {
    let engine = Arc::new(ScriptedEngine::new(human_then_ai()));
    engine.set_mutation_latency(ms(200));
    let h = start_with(engine, PacingConfig::default()).await;
    let controller = h.session.controller().clone();

    let first = tokio::spawn({
        let controller = controller.clone();
        async move { controller.request_roll().await }
    });
    settle().await;
    let second = controller.request_roll().await;
    assert!(matches!(
        second,
        Err(AppError::Busy {
            pending: EngineOp::RollDice
        })
    ));

    pass(ms(400)).await;
    first.await.unwrap().unwrap();
    assert_eq!(h.engine.count(EngineOp::RollDice), 1);
    assert_eq!(h.engine.max_concurrent_mutations(), 1);
}

#[tokio::test(start_paused = true)]
async fn seat_without_a_participant_is_reported() {
    let h = start(snapshot(&[], 0), PacingConfig::default()).await;
    assert!(matches!(
        h.session.controller().request_roll().await,
        Err(AppError::NoActiveTurn)
    ));
}
