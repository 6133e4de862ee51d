use super::{feed, Recorder};
use crate::{tokenize, Config, History, LineMachine};

use proptest::collection::vec;
use proptest::prelude::*;
use std::string::String;
use std::vec::Vec;

proptest! {
    #[test]
    fn arbitrary_input_keeps_invariants(input in vec(any::<u8>(), 0..512)) {
        let mut m = LineMachine::<_, 16, 64, 4>::with_capacity(Recorder::new(), Config::new());
        for b in input {
            let before = m.sink().ends.len();
            let produced = m.sink().bytes().len();
            m.insert_char(b);
            prop_assert!(m.buffer().len() < 16);
            prop_assert!(m.cursor() <= m.buffer().len());

            // Each call flags at most one final byte, and only if it wrote
            // anything at all.
            let flagged = m.sink().ends.len() - before;
            let wrote = m.sink().bytes().len() > produced;
            prop_assert_eq!(flagged, usize::from(wrote));

            if m.is_complete() {
                let argc = m.args().len();
                prop_assert!(argc < 4);
            }
        }
    }

    #[test]
    fn printable_text_round_trips(text in "[ -~]{0,119}") {
        let mut m = LineMachine::new(());
        feed(&mut m, &text);
        prop_assert!(feed(&mut m, "\n"));
        prop_assert_eq!(m.line(), Some(text.as_bytes()));
    }

    #[test]
    fn repeated_lines_stored_once(line in "[a-z]{1,20}", times in 1..5usize) {
        let mut history = History::<256>::new();
        for _ in 0..times {
            history.push(line.as_bytes());
        }
        prop_assert_eq!(history.len(), 1);
        prop_assert_eq!(history.get(0), Some(line.as_bytes()));
    }

    #[test]
    fn history_walk_stops_at_oldest(lines in vec("[a-z]{1,8}", 1..10), presses in 1..30usize) {
        let mut m = LineMachine::new(());
        for line in &lines {
            feed(&mut m, line);
            feed(&mut m, "\n");
        }
        let depth = m.history().len();
        feed(&mut m, &"\x1b[A".repeat(presses));
        prop_assert_eq!(Some(m.buffer()), m.history_entry(presses.min(depth) - 1));
    }

    #[test]
    fn words_split_on_whitespace(words in vec("[a-z0-9]{1,6}", 0..15), sep in "[ \t]{1,3}") {
        let mut line = words.join(sep.as_str()).into_bytes();
        let args = tokenize::<16>(&mut line);
        let got: Vec<String> = args
            .iter()
            .map(|arg| String::from_utf8_lossy(arg).into_owned())
            .collect();
        prop_assert_eq!(got, words);
    }
}
