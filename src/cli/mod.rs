//! CLI command implementations

pub mod context;
pub mod merge;
pub mod style;

use anstream::println;
use smush::merge::{MergeStep, ProgressCallback};
use style::{Stylize, arrow};

/// Progress output for plan execution: one line per step
#[derive(Debug, Clone, Copy, Default)]
pub struct CliProgress;

impl CliProgress {
    /// One line per step, as it starts
    pub const fn compact() -> Self {
        Self
    }
}

impl ProgressCallback for CliProgress {
    fn on_step(&self, step: &MergeStep) {
        println!("  {} {}", arrow(), capitalize(&step.to_string()).muted());
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
