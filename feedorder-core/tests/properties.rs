//! Property-based checks for label parsing and order validation.

use proptest::prelude::*;

use feedorder_core::label::parse_age_label;
use feedorder_core::validator::validate_order;
use feedorder_core::{CheckError, Timestamp};

/// Datetime half of a label: anything without a space.
fn arb_datetime() -> impl Strategy<Value = String> {
    "[^ ]{0,24}"
}

/// Short sequences over a narrow range, so ties and rises are common.
fn arb_sequence() -> impl Strategy<Value = Vec<Timestamp>> {
    prop::collection::vec(-5i64..=5, 0..12)
}

/// Strictly non-increasing sequences.
fn arb_ordered() -> impl Strategy<Value = Vec<Timestamp>> {
    prop::collection::vec(any::<i64>(), 0..32).prop_map(|mut seq| {
        seq.sort_unstable_by(|a, b| b.cmp(a));
        seq
    })
}

proptest! {
    #[test]
    fn epoch_round_trips(datetime in arb_datetime(), epoch in any::<i64>()) {
        let label = format!("{datetime} {epoch}");
        prop_assert_eq!(parse_age_label(&label, 1).unwrap(), epoch);
    }

    #[test]
    fn position_is_carried_into_errors(datetime in arb_datetime(), position in 1usize..10_000) {
        let err = parse_age_label(&datetime, position).unwrap_err();
        let is_malformed = matches!(err, CheckError::MalformedLabel { position: p, .. } if p == position);
        prop_assert!(is_malformed);
    }

    #[test]
    fn ordered_sequences_pass(seq in arb_ordered()) {
        prop_assert!(validate_order(&seq).is_ok());
    }

    #[test]
    fn validation_matches_pairwise_order(seq in arb_sequence()) {
        let first_rise = seq.windows(2).position(|w| w[1] > w[0]);
        match (validate_order(&seq), first_rise) {
            (Ok(()), None) => {}
            (Err(report), Some(i)) => {
                prop_assert_eq!(report.position, i + 2);
                prop_assert_eq!(report.prior, seq[i]);
                prop_assert_eq!(report.offending, seq[i + 1]);
            }
            (result, rise) => prop_assert!(false, "{:?} vs first rise {:?}", result, rise),
        }
    }
}

#[test]
fn extreme_epochs_round_trip() {
    for epoch in [i64::MIN, i64::MAX, 0] {
        let label = format!("2025-03-20T15:06:24 {epoch}");
        assert_eq!(parse_age_label(&label, 1).unwrap(), epoch);
    }
}
