//! Property tests for record construction helpers

use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use secret_export_core::reader::timestamp_from_secs;
use secret_export_core::record::{format_rfc1123, provenance_note};

proptest! {
    /// Property: non-zero timestamps survive conversion to UTC
    #[test]
    fn timestamps_round_trip(secs in 1u64..=4_102_444_800) {
        let ts = timestamp_from_secs(secs).expect("representable");
        prop_assert_eq!(u64::try_from(ts.timestamp()).ok(), Some(secs));
    }

    /// Property: the note is two lines, the second one the RFC 1123 run time
    #[test]
    fn note_has_two_lines(name in "[ -~]{0,24}", secs in 0i64..4_102_444_800) {
        let run = Utc.timestamp_opt(secs, 0).single().expect("valid");
        let note = provenance_note(&name, run);
        let lines: Vec<_> = note.split('\n').collect();

        prop_assert_eq!(lines.len(), 2);
        prop_assert!(lines[0].starts_with("exported from the Secret Service collection \""));
        prop_assert_eq!(lines[1].to_string(), format!("({})", format_rfc1123(run)));
        prop_assert!(lines[1].ends_with(" GMT)"));
    }
}
