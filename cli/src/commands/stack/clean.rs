//! # advisorctl Clean Handler
//!
//! File: cli/src/commands/stack/clean.rs
//!
//! ## Overview
//!
//! `advisorctl clean` removes the stack's containers, images, volumes and
//! orphaned containers in one compose call. It is destructive, so it asks
//! first; anything but `y`/`yes` cancels with exit code 0 and nothing is run.
//!
use super::Stack;
use crate::common::{docker::Profile, process::CommandSpec, ui::prompts};
use crate::core::error::Result;
use std::io::{self, BufRead, Write};
use tracing::info;

fn teardown_command(stack: &Stack<'_>) -> CommandSpec {
    stack.compose.command(
        &Profile::ALL,
        ["down", "--rmi", "all", "--volumes", "--remove-orphans"],
    )
}

/// Confirms on stdin/stdout, then tears the stack down.
pub async fn handle_clean(stack: &Stack<'_>) -> Result<i32> {
    let confirmed = {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        confirm_clean(stack, &mut input, &mut io::stdout())?
    };
    if !confirmed {
        return Ok(0);
    }
    teardown(stack).await
}

/// Warns and asks for confirmation. Nothing is run here.
pub fn confirm_clean<R: BufRead, W: Write>(
    stack: &Stack<'_>,
    input: &mut R,
    output: &mut W,
) -> Result<bool> {
    stack
        .console
        .warning("This removes all advisor containers, images and volumes.");
    let confirmed = prompts::confirm("Are you sure?", input, output)?;
    if !confirmed {
        info!("Clean declined by user");
        stack.console.plain("Clean cancelled");
    }
    Ok(confirmed)
}

async fn teardown(stack: &Stack<'_>) -> Result<i32> {
    let command = teardown_command(stack);
    info!("Running teardown: {}", command);
    let code = stack.runner.stream(&command).await?;
    if code == 0 {
        stack.console.success("Containers, images and volumes removed");
    } else {
        stack
            .console
            .error(&format!("'{}' exited with code {}", command, code));
    }
    Ok(code)
}
