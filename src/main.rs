#![deny(warnings)]

use std::io;

use clap::Parser;
use color_eyre::eyre::Result;

use profile_feed::{
    domain::snapshot::SnapshotStore,
    infrastructure::{
        cli::{Cli, Command},
        config::Config,
        replay::{self, Session},
    },
    utils::{initialize_logging, initialize_panic_handler},
};

fn run() -> Result<()> {
    initialize_logging()?;

    initialize_panic_handler()?;

    let args = <Cli as Parser>::parse();

    let config = Config::new()?;

    match args.command {
        Command::Replay {
            session,
            feed,
            sort,
            json,
        } => {
            let session = Session::load(&session)?;
            let navigation = session.navigation(feed, sort, config.feed.default_sort);
            log::info!("Replaying {} step(s) for {}", session.steps.len(), navigation.subject);

            let store = SnapshotStore::shared();
            let reports = replay::run(&session, navigation, config.feed.settings(), &store);
            replay::write_reports(&reports, json, &mut io::stdout().lock())?;
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    if let Err(e) = run() {
        eprintln!("{} error: Something went wrong", env!("CARGO_PKG_NAME"));
        Err(e)
    } else {
        Ok(())
    }
}
