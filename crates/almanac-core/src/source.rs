use std::fs;
use std::path::{Path, PathBuf};

use almanac_shared::{AgendaSnapshot, Meeting, Task};
use anyhow::Context;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

pub const SNAPSHOT_FILE: &str = "agenda.json";
pub const TASKS_FILE: &str = "tasks.json";
pub const MEETINGS_FILE: &str = "meetings.json";

/// Read-only view of where the agenda lives. Nothing here ever writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgendaSource {
    /// `agenda.json`, or `tasks.json` + `meetings.json`, inside a data directory.
    Directory {
        data_dir: PathBuf,
        tasks_path: PathBuf,
        meetings_path: PathBuf,
        snapshot_path: PathBuf,
    },
    /// One explicit snapshot document.
    Snapshot(PathBuf),
}

impl AgendaSource {
    pub fn open(data_dir: &Path) -> Self {
        let data_dir = data_dir.to_path_buf();
        Self::Directory {
            tasks_path: data_dir.join(TASKS_FILE),
            meetings_path: data_dir.join(MEETINGS_FILE),
            snapshot_path: data_dir.join(SNAPSHOT_FILE),
            data_dir,
        }
    }

    pub fn snapshot_file(path: &Path) -> Self {
        Self::Snapshot(path.to_path_buf())
    }

    #[tracing::instrument(skip(self))]
    pub fn load(&self) -> anyhow::Result<AgendaSnapshot> {
        let snapshot = match self {
            Self::Snapshot(path) => read_json::<AgendaSnapshot>(path)?,
            Self::Directory {
                data_dir,
                tasks_path,
                meetings_path,
                snapshot_path,
            } => {
                if snapshot_path.exists() {
                    debug!(file = %snapshot_path.display(), "snapshot takes precedence");
                    read_json::<AgendaSnapshot>(snapshot_path)?
                } else {
                    debug!(data_dir = %data_dir.display(), "reading agenda lists");
                    AgendaSnapshot {
                        tasks: read_list::<Task>(tasks_path)?,
                        meetings: read_list::<Meeting>(meetings_path)?,
                    }
                }
            }
        };

        info!(
            tasks = snapshot.tasks.len(),
            meetings = snapshot.meetings.len(),
            "loaded agenda"
        );
        Ok(snapshot)
    }
}

fn read_list<T: DeserializeOwned>(path: &Path) -> anyhow::Result<Vec<T>> {
    if !path.exists() {
        debug!(file = %path.display(), "agenda file missing; treating as empty");
        return Ok(vec![]);
    }
    read_json(path)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse {}", path.display()))
}
