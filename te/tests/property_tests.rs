//! Property-based tests for sink formats and interval bounds.

use proptest::prelude::*;
use std::num::NonZeroU64;

use threadevents::{Command, Record, Recorder, RuntimeState, dispatch};

fn arb_record() -> impl Strategy<Value = Record> {
    (
        any::<u64>(),
        "[0-3][0-9]\\.[01][0-9]\\.20[0-9]{2}",
        "[0-2][0-9]:[0-5][0-9]:[0-5][0-9]",
        prop::array::uniform3(-50i32..=50),
    )
        .prop_map(|(sequence, date, time, samples)| Record {
            sequence,
            date,
            time,
            samples,
        })
}

fn arb_recorder() -> impl Strategy<Value = Recorder> {
    prop::sample::select(Recorder::ALL.to_vec())
}

fn arb_rate_command() -> impl Strategy<Value = Command> {
    prop::sample::select(vec![Command::Faster, Command::Slower])
}

proptest! {
    /// A rendered block names its own level, ends with one blank line and
    /// has the line count of exactly that variant.
    #[test]
    fn rendered_block_matches_one_variant(record in arb_record(), recorder in arb_recorder()) {
        let block = recorder.render(&record);
        let lines: Vec<&str> = block.lines().collect();
        let header = format!("level {}", recorder.level());
        let id_line = format!("id: {}", record.sequence);

        prop_assert!(block.ends_with("\n\n"));
        prop_assert!(!block.ends_with("\n\n\n"));
        prop_assert_eq!(lines[0], header.as_str());
        prop_assert_eq!(lines[1], id_line.as_str());

        let expected_lines = match recorder {
            Recorder::Minimal => 4,
            Recorder::Standard => 6,
            Recorder::Detailed => 8,
        };
        prop_assert_eq!(lines.len(), expected_lines);
    }

    /// Whatever sequence of faster/slower commands arrives, the interval
    /// never drops below one second and every refusal leaves it at one.
    #[test]
    fn interval_never_below_one(
        start in 1u64..10,
        commands in prop::collection::vec(arb_rate_command(), 0..60),
    ) {
        let record = Record {
            sequence: 0,
            date: "01.01.2026".to_string(),
            time: "00:00:00".to_string(),
            samples: [0, 0, 0],
        };
        let state = RuntimeState::new(record, Recorder::Detailed, NonZeroU64::new(start).unwrap());

        for command in commands {
            let result = dispatch(&state, command);
            if result.is_err() {
                prop_assert_eq!(state.interval_secs(), 1);
            }
            prop_assert!(state.interval_secs() >= 1);
        }
    }
}
