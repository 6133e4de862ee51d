//! Allocation-free line editing for character-oriented consoles.
//!
//! This library implements the interactive part of a command shell on a
//! serial port, pseudoterminal or similar byte stream: it accepts input one
//! byte at a time, echoes and redraws the line being typed, supports cursor
//! motion with a small subset of VT100/ANSI control sequences, keeps a
//! bounded history of earlier lines with up/down navigation and Ctrl-R
//! reverse search, and splits finished lines into arguments with shell-like
//! quoting.
//!
//! Reading bytes from the terminal, putting it into raw mode, and deciding
//! what to do with each command are left to the caller. Output goes to a
//! caller-provided [`OutputSink`], one byte at a time.
//!
//! The main entry point in this crate is [`LineMachine`]. All of its storage
//! is inline, with capacities chosen through const parameters, so it works
//! without an allocator.
//!
//! ```rust
//! # use vtline::{sink_fn, Config, LineMachine};
//! # let mut echoed: Vec<u8> = Vec::new();
//! let config = Config::new().with_prompt("> ").unwrap();
//! let mut machine = LineMachine::with_config(
//!     sink_fn(|b, _is_last| {
//!         // Write `b` to the terminal, flushing when `_is_last` is set.
//! #       echoed.push(b);
//!     }),
//!     config,
//! );
//! machine.prompt();
//! for &b in b"led 'on' 1\x1b[D2\r" {
//!     if machine.insert_char(b) {
//!         let args = machine.args();
//!         println!("{:?}", args.as_slice());
//! #       assert_eq!(args.as_slice(), [&b"led"[..], b"on", b"21"]);
//!     }
//! }
//! # drop(machine);
//! # assert!(echoed.starts_with(b"> led"));
//! # assert!(echoed.ends_with(b"\r\n"));
//! ```
//!
//! ```plaintext
//! [[108, 101, 100], [111, 110], [50, 49]]
//! ```
#![cfg_attr(not(test), no_std)]

mod buffer;
mod config;
mod error;
mod history;
mod machine;
mod sink;
mod tokenize;

pub use buffer::LineBuffer;
pub use config::{Config, Prompt, MAX_PROMPT_LEN};
pub use error::ConfigError;
pub use history::{Entries, History};
pub use machine::{LineMachine, DEFAULT_HISTORY_LEN, DEFAULT_MAX_ARGC, DEFAULT_MAX_LINE};
pub use sink::{sink_fn, OutputSink};
pub use tokenize::{tokenize, Args};
