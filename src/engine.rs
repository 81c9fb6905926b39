use crate::changeset::{ChangeRecord, ChangeStatus};
use crate::error::{Result, SyncError};
use crate::ignore::{IgnoreMatch, IgnoreSet};
use crate::remote::{Presence, RemoteSession, Transport};
use crate::{error, info, pending, warning};
use std::path::PathBuf;

/// counters for a finished run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Summary {
    pub uploaded: usize,
    pub deleted: usize,
    /// deletes of files the server didn't have
    pub missing: usize,
    pub ignored: usize,
    pub bytes: u64,
}

/// replays change records onto a remote session, one at a time and in order
pub struct Reconciler<'a, T: Transport> {
    session: RemoteSession<T>,
    ignore: &'a IgnoreSet,
    local_root: PathBuf,
}

impl<'a, T: Transport> Reconciler<'a, T> {
    pub fn new(session: RemoteSession<T>, ignore: &'a IgnoreSet) -> Self {
        Self {
            session,
            ignore,
            local_root: PathBuf::from("."),
        }
    }

    /// directory local paths of the records are resolved against
    pub fn with_local_root(mut self, local_root: impl Into<PathBuf>) -> Self {
        self.local_root = local_root.into();
        self
    }

    /// process every record, stopping at the first fatal error
    ///
    /// the remote side is left as far as the run got, nothing is rolled back
    pub fn run(&mut self, records: &[ChangeRecord]) -> Result<Summary> {
        let mut summary = Summary::default();
        for record in records {
            self.apply(record, &mut summary)?;
        }
        Ok(summary)
    }

    fn apply(&mut self, record: &ChangeRecord, summary: &mut Summary) -> Result<()> {
        pending!("*** file {}, mode {}", record.path, record.status);

        match self.ignore.is_ignored(record) {
            Some(IgnoreMatch::File) => {
                warning!("IGNORING FILE");
                summary.ignored += 1;
                return Ok(());
            }
            Some(IgnoreMatch::Dir) => {
                warning!("IGNORING DIR");
                summary.ignored += 1;
                return Ok(());
            }
            None => info!(),
        }

        let (dir, name) = record.split();
        self.enter(dir)?;

        match record.status {
            ChangeStatus::Deleted => match self.session.delete(name)? {
                Presence::Found => summary.deleted += 1,
                Presence::NotFound => summary.missing += 1,
            },
            ChangeStatus::Added | ChangeStatus::Modified | ChangeStatus::Other(_) => {
                let local_path = self.local_root.join(&record.path);
                summary.bytes += self.session.upload(&local_path, name)?;
                summary.uploaded += 1;
            }
        }

        Ok(())
    }

    /// move the session into `dir`, creating it when missing, and make sure
    /// the server agrees about where we ended up
    fn enter(&mut self, dir: &str) -> Result<()> {
        if self.session.change_directory(dir)? == Presence::NotFound {
            self.session.make_directory_path(dir)?;
        }

        let expected = self.session.full_path(dir);
        let actual = self.session.current_dir();
        if expected != actual {
            error!("WORKING DIR DIFFER: {} != {}!", expected, actual);
            return Err(SyncError::Consistency {
                expected,
                actual: actual.to_string(),
            });
        }

        Ok(())
    }

    /// close the remote session
    pub fn finish(mut self) -> Result<()> {
        self.session.disconnect()
    }
}
