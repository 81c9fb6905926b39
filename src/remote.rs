use crate::error::{Result, SyncError, TransportError};
use crate::{error, pending, status, warning};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// low level remote file store primitives, relative names resolve against
/// the server side working directory
pub trait Transport {
    fn cwd(&mut self, path: &str) -> std::result::Result<(), TransportError>;
    fn pwd(&mut self) -> std::result::Result<String, TransportError>;
    fn mkdir(&mut self, name: &str) -> std::result::Result<(), TransportError>;
    fn remove(&mut self, name: &str) -> std::result::Result<(), TransportError>;
    /// returns the number of bytes written
    fn store(&mut self, name: &str, reader: &mut dyn Read)
    -> std::result::Result<u64, TransportError>;
    fn quit(&mut self) -> std::result::Result<(), TransportError>;
}

/// whether the target of a directory change or delete existed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Found,
    NotFound,
}

/// join a relative path onto an absolute remote dir
pub fn join(base: &str, path: &str) -> String {
    if path.is_empty() {
        base.to_string()
    } else if base.ends_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}

/// a connected remote session positioned somewhere below the project root
///
/// the session keeps track of the server side working directory, only the
/// directory changing methods update it
pub struct RemoteSession<T: Transport> {
    transport: Option<T>,
    root: String,
    cwd: String,
}

impl<T: Transport> RemoteSession<T> {
    /// wrap an already logged in transport and enter the project root
    pub fn open(mut transport: T, root: &str) -> Result<Self> {
        pending!("working dir is {}", root);
        let cwd = transport
            .cwd(root)
            .and_then(|()| transport.pwd())
            .map_err(|source| {
                error!("FAILED");
                SyncError::Transport {
                    operation: "cwd",
                    path: root.to_string(),
                    source,
                }
            })?;
        status!("OK");

        Ok(Self {
            transport: Some(transport),
            root: root.to_string(),
            cwd,
        })
    }

    /// the server side working directory as last reported by the server
    pub fn current_dir(&self) -> &str {
        &self.cwd
    }

    /// absolute remote path of a dir relative to the project root
    pub fn full_path(&self, path: &str) -> String {
        join(&self.root, path)
    }

    fn transport(&mut self) -> Result<&mut T> {
        self.transport.as_mut().ok_or(SyncError::NotConnected)
    }

    fn refresh_cwd(&mut self) -> Result<()> {
        let cwd = self
            .transport()?
            .pwd()
            .map_err(|source| SyncError::Transport {
                operation: "pwd",
                path: String::new(),
                source,
            })?;
        self.cwd = cwd;
        Ok(())
    }

    /// enter a dir relative to the project root
    pub fn change_directory(&mut self, path: &str) -> Result<Presence> {
        let full_path = self.full_path(path);
        pending!("changing working dir to {}", full_path);

        match self.transport()?.cwd(&full_path) {
            Ok(()) => {
                status!("OK");
                self.refresh_cwd()?;
                Ok(Presence::Found)
            }
            Err(TransportError::NotFound(_)) => {
                warning!("NOT FOUND");
                Ok(Presence::NotFound)
            }
            Err(source) => {
                error!("FAILED");
                Err(SyncError::Transport {
                    operation: "cwd",
                    path: full_path,
                    source,
                })
            }
        }
    }

    /// create every missing segment of a dir relative to the project root,
    /// leaving the session inside the deepest segment it could reach
    ///
    /// a segment that can't be entered for any reason other than not existing
    /// is reported and skipped, the caller has to verify the final position
    pub fn make_directory_path(&mut self, path: &str) -> Result<()> {
        let root = self.root.clone();
        self.transport()?
            .cwd(&root)
            .map_err(|source| SyncError::Transport {
                operation: "cwd",
                path: root,
                source,
            })?;

        pending!("attempt to create {}", self.full_path(path));

        for segment in path.split('/').filter(|s| !s.is_empty()) {
            let transport = self.transport()?;
            match transport.cwd(segment) {
                Ok(()) => {}
                Err(TransportError::NotFound(_)) => {
                    let created = transport
                        .mkdir(segment)
                        .and_then(|()| transport.cwd(segment));
                    if let Err(source) = created {
                        error!("FAILED");
                        // name the segment below where the server says we are
                        let position = transport.pwd().unwrap_or_default();
                        return Err(SyncError::Transport {
                            operation: "mkd",
                            path: join(&position, segment),
                            source,
                        });
                    }
                }
                Err(e) => warning!("FAILED to cwd to {} ({})", segment, e),
            }
        }
        status!("OK");

        self.refresh_cwd()
    }

    /// delete a file in the current working dir
    pub fn delete(&mut self, name: &str) -> Result<Presence> {
        let full_path = join(&self.cwd, name);
        pending!("deleting file {}", full_path);

        match self.transport()?.remove(name) {
            Ok(()) => {
                status!("OK");
                Ok(Presence::Found)
            }
            Err(TransportError::NotFound(_)) => {
                warning!("NOT FOUND");
                Ok(Presence::NotFound)
            }
            Err(source) => {
                error!("FAILED");
                Err(SyncError::Transport {
                    operation: "delete",
                    path: full_path,
                    source,
                })
            }
        }
    }

    /// stream a local file into `name` in the current working dir
    pub fn upload(&mut self, local_path: &Path, name: &str) -> Result<u64> {
        let full_path = join(&self.cwd, name);
        pending!("uploading file {} => {}", local_path.display(), full_path);

        let file = File::open(local_path).map_err(|source| {
            error!("FAILED");
            SyncError::LocalFile {
                path: local_path.to_path_buf(),
                source,
            }
        })?;
        let mut reader = BufReader::new(file);

        match self.transport()?.store(name, &mut reader) {
            Ok(bytes) => {
                status!("OK");
                Ok(bytes)
            }
            Err(source) => {
                error!("FAILED");
                Err(SyncError::Transport {
                    operation: "store",
                    path: full_path,
                    source,
                })
            }
        }
    }

    /// close the session, does nothing when already closed
    pub fn disconnect(&mut self) -> Result<()> {
        let Some(mut transport) = self.transport.take() else {
            return Ok(());
        };
        status!("closing connection...");
        transport.quit().map_err(|source| SyncError::Transport {
            operation: "quit",
            path: self.root.clone(),
            source,
        })
    }
}
