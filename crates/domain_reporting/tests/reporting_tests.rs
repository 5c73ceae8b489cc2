//! Comprehensive tests for domain_reporting
//!
//! The pure pipeline stages are exercised over hand-built snapshots; no data
//! source is involved.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{ClaimIdentity, ClaimRef, LobCode, PolicyRef, YearOfAccount};

use domain_reporting::movement::{rank_by_movement, MovementRecord};
use domain_reporting::novelty::new_in_current;
use domain_reporting::ranking::{top_n_by_group, top_n_global, RankMode, SortDirection};
use domain_reporting::record::{ClaimRecord, Snapshot};

fn date(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, m, d).unwrap()
}

fn record(as_at: NaiveDate, policy: &str, claim: &str, lob: &str, amount: Decimal) -> ClaimRecord {
    ClaimRecord {
        policy_ref: PolicyRef::new(policy),
        claim_ref: ClaimRef::new(claim),
        yoa: YearOfAccount::new(2023),
        major_lob: LobCode::new(lob),
        as_at_date: as_at,
        total_incurred: Some(amount),
    }
}

fn snapshot(as_at: NaiveDate, records: Vec<ClaimRecord>) -> Snapshot {
    Snapshot::from_records(as_at, records).unwrap()
}

// ============================================================================
// Grouped Ranking Tests
// ============================================================================

mod ranking_tests {
    use super::*;

    #[test]
    fn test_report_order_is_lob_then_metric_descending() {
        let current = snapshot(
            date(1, 31),
            vec![
                record(date(1, 31), "P1", "C1", "PROPERTY", dec!(300)),
                record(date(1, 31), "P2", "C2", "MOTOR", dec!(50)),
                record(date(1, 31), "P3", "C3", "MOTOR", dec!(200)),
                record(date(1, 31), "P4", "C4", "CASUALTY", dec!(75)),
            ],
        );

        let report = top_n_by_group(current.into_records(), 10, SortDirection::Descending);
        let order: Vec<_> = report
            .iter()
            .map(|r| (r.record.major_lob.as_str(), r.record.total_incurred))
            .collect();
        assert_eq!(
            order,
            vec![
                ("CASUALTY", Some(dec!(75))),
                ("MOTOR", Some(dec!(200))),
                ("MOTOR", Some(dec!(50))),
                ("PROPERTY", Some(dec!(300))),
            ]
        );
    }

    #[test]
    fn test_ranks_restart_at_each_group() {
        let rows = vec![
            record(date(1, 31), "P1", "C1", "MOTOR", dec!(10)),
            record(date(1, 31), "P2", "C2", "MOTOR", dec!(20)),
            record(date(1, 31), "P3", "C3", "PROPERTY", dec!(30)),
        ];

        let report = top_n_by_group(rows, 10, SortDirection::Descending);
        let ranks: Vec<_> = report
            .iter()
            .map(|r| (r.record.major_lob.as_str(), r.rank))
            .collect();
        assert_eq!(ranks, vec![("MOTOR", 1), ("MOTOR", 2), ("PROPERTY", 1)]);
    }

    #[test]
    fn test_negative_totals_rank_below_positive() {
        let rows = vec![
            record(date(1, 31), "P1", "C1", "MOTOR", dec!(-500)),
            record(date(1, 31), "P2", "C2", "MOTOR", dec!(100)),
        ];

        let report = top_n_by_group(rows, 10, SortDirection::Descending);
        assert_eq!(report.rows()[0].record.total_incurred, Some(dec!(100)));
        assert_eq!(report.rows()[1].record.total_incurred, Some(dec!(-500)));
    }

    #[test]
    fn test_null_metric_rows_are_kept_and_rank_last() {
        let mut unpriced = record(date(1, 31), "P3", "C3", "MOTOR", dec!(0));
        unpriced.total_incurred = None;

        let rows = vec![
            unpriced,
            record(date(1, 31), "P1", "C1", "MOTOR", dec!(40)),
            record(date(1, 31), "P2", "C2", "MOTOR", dec!(90)),
        ];

        let report = top_n_by_group(rows, 10, SortDirection::Descending);
        assert_eq!(report.len(), 3);
        assert_eq!(report.rows()[2].record.total_incurred, None);
        assert_eq!(report.rows()[2].rank, 3);
    }

    #[test]
    fn test_serialized_row_carries_flat_named_fields() {
        let rows = vec![record(date(1, 31), "P1", "C1", "MOTOR", dec!(100))];
        let report = top_n_by_group(rows, 10, SortDirection::Descending);

        let json = serde_json::to_value(report.rows()).unwrap();
        let row = &json[0];
        assert_eq!(row["rank"], 1);
        assert_eq!(row["policy_ref"], "P1");
        assert_eq!(row["claim_ref"], "C1");
        assert_eq!(row["yoa"], 2023);
        assert_eq!(row["major_lob"], "MOTOR");
        assert_eq!(row["total_incurred"], "100");
    }
}

// ============================================================================
// Novelty Detection Tests
// ============================================================================

mod novelty_tests {
    use super::*;

    // Worked example: previous empty, everything is new
    #[test]
    fn test_all_new_when_previous_empty() {
        let current = snapshot(
            date(1, 31),
            vec![
                record(date(1, 31), "P1", "C1", "MOTOR", dec!(100)),
                record(date(1, 31), "P2", "C2", "MOTOR", dec!(50)),
                record(date(1, 31), "P3", "C3", "PROPERTY", dec!(80)),
            ],
        );
        let previous = Snapshot::empty(date(1, 1));

        let report = new_in_current(&current, &previous, 10);
        let rows: Vec<_> = report
            .iter()
            .map(|r| (r.record.major_lob.as_str(), r.rank, r.record.total_incurred))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("MOTOR", 1, Some(dec!(100))),
                ("MOTOR", 2, Some(dec!(50))),
                ("PROPERTY", 1, Some(dec!(80))),
            ]
        );
    }

    #[test]
    fn test_novelty_is_an_identity_anti_join() {
        // Same policy, different yoa: a different claim, therefore new
        let mut renewed = record(date(2, 29), "P1", "C1", "MOTOR", dec!(10));
        renewed.yoa = YearOfAccount::new(2024);

        let current = snapshot(
            date(2, 29),
            vec![record(date(2, 29), "P1", "C1", "MOTOR", dec!(75)), renewed],
        );
        let previous = snapshot(
            date(1, 31),
            vec![record(date(1, 31), "P1", "C1", "MOTOR", dec!(75))],
        );

        let report = new_in_current(&current, &previous, 10);
        assert_eq!(report.len(), 1);
        assert_eq!(report.rows()[0].record.yoa, YearOfAccount::new(2024));
    }

    #[test]
    fn test_novelty_result_columns() {
        let current = snapshot(
            date(1, 31),
            vec![record(date(1, 31), "P1", "C1", "MOTOR", dec!(100))],
        );
        let report = new_in_current(&current, &Snapshot::empty(date(1, 1)), 10);

        let json = serde_json::to_value(report.rows()).unwrap();
        let row = &json[0];
        for field in ["policy_ref", "claim_ref", "yoa", "major_lob", "total_incurred"] {
            assert!(row.get(field).is_some(), "missing field {field}");
        }
    }
}

// ============================================================================
// Movement Calculation Tests
// ============================================================================

mod movement_tests {
    use super::*;

    // Worked example: +20 and -20 rank identically under abs-delta
    #[test]
    fn test_opposite_movements_rank_identically() {
        let previous = snapshot(
            date(1, 31),
            vec![record(date(1, 31), "P1", "C1", "MOTOR", dec!(100))],
        );

        let rise = snapshot(
            date(2, 29),
            vec![record(date(2, 29), "P1", "C1", "MOTOR", dec!(120))],
        );
        let fall = snapshot(
            date(2, 29),
            vec![record(date(2, 29), "P1", "C1", "MOTOR", dec!(80))],
        );

        let up = rank_by_movement(&rise, &previous, 10, RankMode::Global);
        let down = rank_by_movement(&fall, &previous, 10, RankMode::Global);

        assert_eq!(up.rows()[0].record.delta, dec!(20));
        assert_eq!(down.rows()[0].record.delta, dec!(-20));
        assert_eq!(up.rows()[0].record.abs_delta, down.rows()[0].record.abs_delta);
        assert_eq!(up.rows()[0].rank, down.rows()[0].rank);
    }

    #[test]
    fn test_partition_with_novelty_on_mixed_universe() {
        let current = snapshot(
            date(2, 29),
            vec![
                record(date(2, 29), "P1", "C1", "MOTOR", dec!(100)), // existed before
                record(date(2, 29), "P2", "C2", "MOTOR", dec!(40)),  // new
                record(date(2, 29), "P3", "C3", "PROPERTY", dec!(70)), // new
            ],
        );
        let previous = snapshot(
            date(1, 31),
            vec![
                record(date(1, 31), "P1", "C1", "MOTOR", dec!(90)),
                record(date(1, 31), "P4", "C4", "MOTOR", dec!(10)), // disappeared
            ],
        );

        let moved = rank_by_movement(&current, &previous, 100, RankMode::Global);
        let novel = new_in_current(&current, &previous, 100);

        let moved_ids: std::collections::HashSet<ClaimIdentity> = moved
            .iter()
            .map(|r| {
                ClaimIdentity::new(
                    r.record.policy_ref.clone(),
                    r.record.claim_ref.clone(),
                    r.record.yoa,
                )
            })
            .collect();
        let novel_ids: std::collections::HashSet<ClaimIdentity> =
            novel.iter().map(|r| r.record.identity()).collect();

        assert!(moved_ids.is_disjoint(&novel_ids));
        let union: std::collections::HashSet<_> = moved_ids.union(&novel_ids).cloned().collect();
        assert_eq!(union, current.identity_set());
        // The disappeared claim is in neither report
        assert_eq!(union.len(), 3);
    }

    #[test]
    fn test_per_lob_movement_keeps_top_n_within_each_lob() {
        let mut current_rows = Vec::new();
        let mut previous_rows = Vec::new();
        for i in 0..15 {
            let policy = format!("P{i}");
            let claim = format!("C{i}");
            previous_rows.push(record(date(1, 31), &policy, &claim, "MOTOR", dec!(100)));
            current_rows.push(record(
                date(2, 29),
                &policy,
                &claim,
                "MOTOR",
                dec!(100) + Decimal::from(i),
            ));
        }
        let current = snapshot(date(2, 29), current_rows);
        let previous = snapshot(date(1, 31), previous_rows);

        let report = rank_by_movement(&current, &previous, 10, RankMode::PerGroup);
        assert_eq!(report.len(), 10);
        // Largest movement first: claim 14 moved by 14
        assert_eq!(report.rows()[0].record.delta, dec!(14));
        assert_eq!(report.rows()[9].record.delta, dec!(5));
    }

    #[test]
    fn test_movement_result_columns() {
        let current = snapshot(
            date(2, 29),
            vec![record(date(2, 29), "P1", "C1", "MOTOR", dec!(120))],
        );
        let previous = snapshot(
            date(1, 31),
            vec![record(date(1, 31), "P1", "C1", "MOTOR", dec!(100))],
        );

        let report = rank_by_movement(&current, &previous, 10, RankMode::Global);
        let json = serde_json::to_value(report.rows()).unwrap();
        let row = &json[0];
        for field in [
            "policy_ref",
            "claim_ref",
            "yoa",
            "major_lob",
            "current_value",
            "previous_value",
            "delta",
            "abs_delta",
        ] {
            assert!(row.get(field).is_some(), "missing field {field}");
        }
        assert_eq!(row["delta"], "20");
        assert_eq!(row["abs_delta"], "20");
    }

    #[test]
    fn test_movement_global_truncation() {
        let mut current_rows = Vec::new();
        let mut previous_rows = Vec::new();
        for i in 0..12 {
            let policy = format!("P{i}");
            let claim = format!("C{i}");
            let lob = if i % 2 == 0 { "MOTOR" } else { "PROPERTY" };
            previous_rows.push(record(date(1, 31), &policy, &claim, lob, dec!(0)));
            current_rows.push(record(
                date(2, 29),
                &policy,
                &claim,
                lob,
                Decimal::from(i * 10),
            ));
        }
        let current = snapshot(date(2, 29), current_rows);
        let previous = snapshot(date(1, 31), previous_rows);

        let report = rank_by_movement(&current, &previous, 10, RankMode::Global);
        assert_eq!(report.len(), 10);
        let ranks: Vec<_> = report.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, (1..=10).collect::<Vec<u32>>());
        // Smallest two movements (0 and 10) fell off the bottom
        let deltas: Vec<_> = report.iter().map(|r| r.record.delta).collect();
        assert!(!deltas.contains(&dec!(0)));
        assert!(!deltas.contains(&dec!(10)));
    }

    #[test]
    fn test_identical_snapshots_give_zero_deltas() {
        let rows = vec![
            record(date(2, 29), "P1", "C1", "MOTOR", dec!(100)),
            record(date(2, 29), "P2", "C2", "PROPERTY", dec!(55)),
        ];
        let current = snapshot(date(2, 29), rows.clone());
        let previous_rows = rows
            .into_iter()
            .map(|mut r| {
                r.as_at_date = date(1, 31);
                r
            })
            .collect();
        let previous = snapshot(date(1, 31), previous_rows);

        let report = rank_by_movement(&current, &previous, 10, RankMode::Global);
        assert_eq!(report.len(), 2);
        assert!(report.iter().all(|r| r.record.delta == dec!(0)));
    }
}

// ============================================================================
// Global vs Grouped Mode Tests
// ============================================================================

mod mode_tests {
    use super::*;

    #[test]
    fn test_global_mode_crosses_lob_boundaries() {
        let rows = vec![
            record(date(1, 31), "P1", "C1", "MOTOR", dec!(10)),
            record(date(1, 31), "P2", "C2", "PROPERTY", dec!(30)),
            record(date(1, 31), "P3", "C3", "CASUALTY", dec!(20)),
        ];

        let global = top_n_global(rows.clone(), 2, SortDirection::Descending);
        assert_eq!(global.len(), 2);
        assert_eq!(global.rows()[0].record.total_incurred, Some(dec!(30)));
        assert_eq!(global.rows()[1].record.total_incurred, Some(dec!(20)));

        // Grouped mode keeps one per LOB here instead
        let grouped = top_n_by_group(rows, 2, SortDirection::Descending);
        assert_eq!(grouped.len(), 3);
    }
}

// ============================================================================
// Movement Record Shape Tests
// ============================================================================

mod movement_record_tests {
    use super::*;

    #[test]
    fn test_round_trip_serialization() {
        let current = snapshot(
            date(2, 29),
            vec![record(date(2, 29), "P1", "C1", "MOTOR", dec!(75))],
        );
        let previous = snapshot(
            date(1, 31),
            vec![record(date(1, 31), "P1", "C1", "MOTOR", dec!(100))],
        );

        let report = rank_by_movement(&current, &previous, 10, RankMode::Global);
        let json = serde_json::to_string(&report.rows()[0].record).unwrap();
        let parsed: MovementRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, report.rows()[0].record);
    }
}
