use crate::constants::{CHANGESET_FILE, DEFAULT_SECTION, DEFAULT_TAG};
use clap::Parser;

const AFTER_HELP: &str = "\
If no section is given [default] is assumed. The settings file updiff.ini should specify:
  host = address of the ftp server
  user = login user name
  pwd  = user password (rot13'ed)
  dir  = project directory on the server
  port = ftp port (optional, defaults to 21)";

/// updiff: upload files changed since a git tag to an ftp server
#[derive(Parser, Debug)]
#[command(name = "updiff", about, long_about = None, after_help = AFTER_HELP)]
pub struct Cli {
    /// git tag or revision the change list is generated from
    #[arg(short, long, default_value = DEFAULT_TAG)]
    pub tag: String,

    /// section of updiff.ini holding the ftp connection params
    #[arg(short, long, default_value = DEFAULT_SECTION)]
    pub section: String,

    /// read the change list (git diff --name-status output) from a file
    /// instead of git, defaults to updiff.files when no name is given
    #[arg(
        short,
        long,
        value_name = "FILE",
        num_args = 0..=1,
        default_missing_value = CHANGESET_FILE
    )]
    pub diff: Option<String>,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
