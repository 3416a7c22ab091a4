//! `completion` command: print a shell completion script. Runs without an OBS session.

use anyhow::{Context as _, Result};
use clap::{Args, CommandFactory};
use clap_complete::Shell;
use std::io::Write;

use crate::Cli;

#[derive(Args, Debug)]
pub struct CompletionArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}

pub fn execute_completion(args: CompletionArgs, out: &mut dyn Write) -> Result<()> {
    let mut command = Cli::command();
    clap_complete::generate(args.shell, &mut command, "obsctl", out);
    out.flush().context("failed to write completion script")
}
