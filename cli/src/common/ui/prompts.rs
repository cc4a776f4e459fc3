//! # advisorctl Prompts (`common::ui::prompts`)
//!
//! File: cli/src/common/ui/prompts.rs
//!
//! ## Overview
//!
//! Interactive `[y/N]` confirmation. The default answer is **no**: only `y`
//! or `yes` (any case, surrounding whitespace ignored) confirms. End of input
//! counts as no, so piping `/dev/null` into a destructive command aborts it.
//!
use crate::core::error::Result;
use anyhow::Context;
use std::io::{BufRead, Write};

/// Asks `question` on `output` and reads one line from `input`.
pub fn confirm<R: BufRead, W: Write>(question: &str, input: &mut R, output: &mut W) -> Result<bool> {
    write!(output, "{} (y/N) ", question).context("Failed to write prompt")?;
    output.flush().context("Failed to flush prompt")?;
    let mut answer = String::new();
    input
        .read_line(&mut answer)
        .context("Failed to read confirmation from stdin")?;
    Ok(is_affirmative(&answer))
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
