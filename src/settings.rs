use crate::constants::DEFAULT_PORT;
use anyhow::{Context, Result, anyhow, bail};
use ini::{Ini, Properties};
use std::path::Path;

/// ftp connection params read from one section of the settings file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub user: String,
    /// password as stored, see [`Settings::password`]
    pub pwd: String,
    /// project root on the server, always absolute
    pub dir: String,
}

impl Settings {
    pub fn load(path: &Path, section: &str) -> Result<Self> {
        let ini = Ini::load_from_file(path)
            .with_context(|| format!("failed to read settings from {}", path.display()))?;
        Self::from_ini(&ini, section)
            .with_context(|| format!("invalid settings in {}", path.display()))
    }

    pub fn from_ini(ini: &Ini, section: &str) -> Result<Self> {
        let Some(props) = ini.section(Some(section)) else {
            bail!("missing section [{section}]");
        };

        let port = match props.get("port") {
            Some(port) => port
                .trim()
                .parse()
                .with_context(|| format!("invalid port {port:?} in [{section}]"))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            host: required(props, section, "host")?,
            port,
            user: required(props, section, "user")?,
            pwd: required(props, section, "pwd")?,
            dir: normalize_root(&required(props, section, "dir")?),
        })
    }

    /// the decoded password, the stored value is only obscured with rot13
    pub fn password(&self) -> String {
        rot13(&self.pwd)
    }
}

fn required(props: &Properties, section: &str, key: &str) -> Result<String> {
    props
        .get(key)
        .map(|value| value.trim().to_string())
        .ok_or_else(|| anyhow!("missing key {key:?} in [{section}]"))
}

/// make the project dir absolute and drop trailing separators so it compares
/// equal to what the server reports as the working directory
pub fn normalize_root(dir: &str) -> String {
    let trimmed = dir.trim().trim_matches('/');
    format!("/{trimmed}")
}

/// rotate ascii letters by 13, applying it twice gives back the input
pub fn rot13(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            'a'..='z' => rotate(c, b'a'),
            'A'..='Z' => rotate(c, b'A'),
            _ => c,
        })
        .collect()
}

fn rotate(c: char, base: u8) -> char {
    char::from((c as u8 - base + 13) % 26 + base)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const SAMPLE: &str = "\
[default]
host = ftp.example.com
user = deploy
pwd = frperg123
dir = www/site/

[staging]
host = staging.example.com
port = 2121
user = stage
pwd = cnff
dir = /
";

    #[test]
    fn test_load_section() {
        let ini = Ini::load_from_str(SAMPLE).unwrap();
        let settings = Settings::from_ini(&ini, "default").unwrap();

        assert_eq!(settings.host, "ftp.example.com");
        assert_eq!(settings.port, 21);
        assert_eq!(settings.user, "deploy");
        assert_eq!(settings.password(), "secret123");
        assert_eq!(settings.dir, "/www/site");
    }

    #[test]
    fn test_optional_port_and_root_dir() {
        let ini = Ini::load_from_str(SAMPLE).unwrap();
        let settings = Settings::from_ini(&ini, "staging").unwrap();

        assert_eq!(settings.port, 2121);
        assert_eq!(settings.dir, "/");
        assert_eq!(settings.password(), "pass");
    }

    #[test]
    fn test_missing_section_is_an_error() {
        let ini = Ini::load_from_str(SAMPLE).unwrap();
        let err = Settings::from_ini(&ini, "production").unwrap_err();
        assert!(err.to_string().contains("[production]"));
    }

    #[test]
    fn test_missing_key_is_an_error() {
        let ini = Ini::load_from_str("[default]\nhost = h\nuser = u\npwd = p\n").unwrap();
        let err = Settings::from_ini(&ini, "default").unwrap_err();
        assert!(err.to_string().contains("\"dir\""));
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("updiff.ini");
        fs::write(&path, SAMPLE).unwrap();

        let settings = Settings::load(&path, "staging").unwrap();
        assert_eq!(settings.host, "staging.example.com");

        assert!(Settings::load(&temp_dir.path().join("missing.ini"), "default").is_err());
    }

    #[test]
    fn test_rot13() {
        assert_eq!(rot13("Hello, World!"), "Uryyb, Jbeyq!");
        assert_eq!(rot13(&rot13("p4ss-Word")), "p4ss-Word");
    }

    #[test]
    fn test_normalize_root() {
        assert_eq!(normalize_root("www"), "/www");
        assert_eq!(normalize_root("/www/site/"), "/www/site");
        assert_eq!(normalize_root("/"), "/");
        assert_eq!(normalize_root(""), "/");
    }
}
