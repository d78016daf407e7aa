//! Fuzz target: `Frame::parse`
//!
//! Feeds arbitrary byte sequences to the MP3 frame parser and asserts it
//! never panics, and that anything it accepts re-encodes to the same
//! bytes.
//!
//! cargo fuzz run fuzz_frame_parse

#![no_main]

use bigmouth::audio::{FRAME_LEN, Frame};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(frame) = Frame::parse(data) {
        assert_eq!(data.len(), FRAME_LEN, "parser accepted a wrong-length frame");
        let rebuilt = Frame::new(frame.command(), frame.data());
        assert_eq!(rebuilt.as_bytes(), frame.as_bytes());
        assert_eq!(&frame.as_bytes()[..], data);
    }
});
