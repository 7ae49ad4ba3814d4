mod common;

use pond::domain::{ColumnChoice, ColumnId, GameSnapshot, PlayerMode, RollOutcome, StatsSummary};
use serde_json::json;

#[test]
fn engine_snapshot_json_parses() {
    let raw = json!({
        "in_progress": true,
        "settings": {
            "players": [
                { "mode": "Human", "id": 0, "name": "Sir Hopsalot", "won_cols": [7] },
                { "mode": "Risky", "id": 1, "name": "Bog Zilla" }
            ],
            "win_cols": 3
        },
        "current_player": 1,
        "hops": 2,
        "columns": [
            { "col": 7, "height": 13, "hops": [13, 4, 0, 0], "risked": 2, "locked": 0 },
            { "col": 8, "height": 11, "hops": [0, 0, 0, 0], "risked": 0, "locked": null }
        ],
        "winner": null
    });

    let snapshot: GameSnapshot = serde_json::from_value(raw).unwrap();
    let active = snapshot.active_participant().unwrap();
    assert_eq!(active.mode, PlayerMode::Risky);
    assert!(active.won_cols.is_empty());
    assert_eq!(snapshot.settings.players[0].won_cols, vec![ColumnId::new(7).unwrap()]);
    assert_eq!(snapshot.run_progress(), 2);
    assert_eq!(
        snapshot.locked_columns().collect::<Vec<_>>(),
        vec![ColumnId::new(7).unwrap()]
    );
    assert_eq!(
        snapshot.risked_columns().collect::<Vec<_>>(),
        vec![ColumnId::new(7).unwrap()]
    );
    assert!(!snapshot.is_over());
}

#[test]
fn dice_result_json_parses_with_single_column_choices() {
    let outcome: RollOutcome = serde_json::from_value(json!({
        "dice": [1, 4, 6, 6],
        "choices": [[5, 12], [7, null]]
    }))
    .unwrap();

    assert_eq!(
        outcome.choices,
        vec![
            ColumnChoice::from_sums(5, Some(12)).unwrap(),
            ColumnChoice::from_sums(7, None).unwrap(),
        ]
    );
    assert!(!outcome.is_croaked());

    let empty: RollOutcome = serde_json::from_value(json!({})).unwrap();
    assert!(!empty.is_rolled());
}

#[test]
fn out_of_range_column_is_rejected() {
    let bad = serde_json::from_value::<RollOutcome>(json!({
        "dice": [6, 6, 6, 6],
        "choices": [[13, null]]
    }));
    assert!(bad.is_err());
}

#[test]
fn statistics_json_parses() {
    let summary: StatsSummary = serde_json::from_value(json!({
        "player_stats": [
            { "longest_run": 5, "croaked": 1, "banked": 4, "luck": -0.25 },
            { "longest_run": 2, "croaked": 3, "banked": 2, "luck": 0.5 }
        ],
        "most_contested_column": 6,
        "total_turns": 18
    }))
    .unwrap();

    assert_eq!(summary.player_stats.len(), 2);
    assert_eq!(summary.most_contested_column.get(), 6);
}
