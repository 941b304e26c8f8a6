//! Command line: the sweep loop by default, plus one-shot runs for a single user,
//! job or pair.

use clap::{Parser, Subcommand};
use uuid::Uuid;

#[derive(Debug, Parser)]
#[command(name = "matcher")]
#[command(about = "Scores job postings against candidate profiles and persists matches")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, PartialEq, Subcommand)]
pub enum Command {
    /// Run the periodic sweep until Ctrl-C (default)
    Sweep,

    /// Evaluate one user/job pair and print the outcome
    Pair {
        #[arg(long)]
        user: Uuid,
        #[arg(long)]
        job: Uuid,
    },

    /// Match one user against the newest jobs
    User {
        /// User id
        id: Uuid,
    },

    /// Match one job against every active user with a CV
    Job {
        /// Job id
        id: Uuid,
    },
}
