//! Command-line interface definitions.

mod args;

pub use args::{parse_options, usage, Options, ParseOutcome};
