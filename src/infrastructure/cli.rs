use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::{
    domain::projection::{FeedKind, SortMode},
    utils::version,
};

#[derive(Parser, Debug)]
#[command(author, version = version(), about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Replay a recorded feed session and print the rendered view after each step
    Replay {
        /// Session file (JSON or JSON5)
        session: PathBuf,

        /// Initial feed kind: all, posts, replies, upvoted, downvoted, hidden
        #[arg(long, value_name = "KIND")]
        feed: Option<FeedKind>,

        /// Initial sort mode: new, old
        #[arg(long, value_name = "SORT")]
        sort: Option<SortMode>,

        /// Print one JSON object per step instead of text
        #[arg(long)]
        json: bool,
    },
}
