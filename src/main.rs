mod changeset;
mod cli;
mod constants;
mod engine;
mod error;
mod ftp;
mod git;
mod ignore;
mod remote;
mod settings;
mod ui;

use crate::cli::Cli;
use crate::constants::{IGNORE_FILE, SETTINGS_FILE};
use crate::engine::{Reconciler, Summary};
use crate::ftp::FtpTransport;
use crate::ignore::IgnoreSet;
use crate::remote::RemoteSession;
use crate::settings::Settings;
use anyhow::{Context, Result};
use num_format::{Locale, ToFormattedString};
use std::path::Path;

fn main() {
    if let Err(e) = run() {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse_args();

    // everything that can fail without touching the server comes first
    let settings = Settings::load(Path::new(SETTINGS_FILE), &cli.section)?;

    let text = match &cli.diff {
        Some(file) => {
            status!("reading diff list from {}...", file);
            git::read_changes(Path::new(file))?
        }
        None => {
            status!("generating diff list through git diff --name-status {}...", cli.tag);
            git::get_changes(Path::new("."), &cli.tag)?
        }
    };

    let records = changeset::parse(&text);
    status!("{} file(s) to process", records.len());

    let ignore = IgnoreSet::load(Path::new(IGNORE_FILE), cli.diff.as_deref())?;
    status!("{} entries in the ignore list", ignore.len());

    if records.is_empty() {
        status!("nothing to upload");
        return Ok(());
    }

    let session = connect(&settings)?;
    let mut reconciler = Reconciler::new(session, &ignore).with_local_root(".");

    // close the connection even when the batch stopped half way
    let result = reconciler.run(&records);
    if let Err(e) = reconciler.finish() {
        warning!("failed to close connection: {}", e);
    }
    let summary = result.context("upload aborted")?;

    report(&summary);
    Ok(())
}

/// connect, log in and enter the project dir
fn connect(settings: &Settings) -> Result<RemoteSession<FtpTransport>> {
    status!(
        "connecting to {}:{} as {}...",
        settings.host,
        settings.port,
        settings.user
    );

    let spinner = ui::spinner();
    let transport = FtpTransport::connect(settings);
    spinner.finish_and_clear();

    let transport = transport.map_err(|source| error::SyncError::Connect {
        host: settings.host.clone(),
        source,
    })?;
    if let Some(welcome) = transport.welcome() {
        info!(welcome.trim_end());
    }

    Ok(RemoteSession::open(transport, &settings.dir)?)
}

fn report(summary: &Summary) {
    status!(
        "done: {} uploaded ({} bytes), {} deleted, {} already gone, {} ignored",
        summary.uploaded,
        summary.bytes.to_formatted_string(&Locale::en),
        summary.deleted,
        summary.missing,
        summary.ignored
    );
}
