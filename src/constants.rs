// files
pub const RUNNER_NAME: &str = env!("CARGO_PKG_NAME");
pub const SETTINGS_FILE: &str = "updiff.ini";
pub const IGNORE_FILE: &str = "updiff.ignore";
pub const CHANGESET_FILE: &str = "updiff.files";

// cli
pub const DEFAULT_TAG: &str = "HEAD^";
pub const DEFAULT_SECTION: &str = "default";

// ftp
pub const DEFAULT_PORT: u16 = 21;
