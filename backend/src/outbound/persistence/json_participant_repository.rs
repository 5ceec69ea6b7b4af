//! JSON-file participant repository.
//!
//! The whole collection lives in one JSON array on disk, rewritten in full
//! on every save. Write volume is a few hundred records over an event day,
//! so a flat file behind the repository port is sufficient; swapping in an
//! embedded store later touches only this adapter.

use std::io::Write as _;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::warn;

use crate::domain::participant::Participant;
use crate::domain::ports::{ParticipantRepository, ParticipantRepositoryError};

/// File-backed implementation of [`ParticipantRepository`].
///
/// ## Invariants
/// - Readers never observe a torn or mixed-version file: every write lands
///   in a temp file in the destination directory and is renamed over the
///   target.
/// - A missing, empty, or unparsable file heals to a valid empty store; a
///   failed write always surfaces to the caller.
#[derive(Debug, Clone)]
pub struct JsonParticipantRepository {
    path: PathBuf,
}

impl JsonParticipantRepository {
    /// Create a repository over the given file path. The file and its
    /// parent directory are created on first access.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        self.path.as_path()
    }

    async fn replace_with(
        &self,
        participants: &[Participant],
    ) -> Result<(), ParticipantRepositoryError> {
        let payload = serde_json::to_string_pretty(participants)
            .map_err(|err| ParticipantRepositoryError::write(err.to_string()))?;
        let path = self.path.clone();

        // Rename-over-target keeps the swap atomic for concurrent readers.
        let result = tokio::task::spawn_blocking(move || write_atomic(&path, &payload))
            .await
            .map_err(|err| ParticipantRepositoryError::write(err.to_string()))?;
        result.map_err(|err| ParticipantRepositoryError::write(err.to_string()))
    }

    async fn heal_to_empty(&self) -> Result<Vec<Participant>, ParticipantRepositoryError> {
        self.replace_with(&[]).await?;
        Ok(Vec::new())
    }
}

fn write_atomic(path: &Path, payload: &str) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&dir)?;

    let mut temp = tempfile::NamedTempFile::new_in(&dir)?;
    temp.write_all(payload.as_bytes())?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|err| err.error)?;
    Ok(())
}

#[async_trait]
impl ParticipantRepository for JsonParticipantRepository {
    async fn load_all(&self) -> Result<Vec<Participant>, ParticipantRepositoryError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return self.heal_to_empty().await;
            }
            Err(err) => return Err(ParticipantRepositoryError::io(err.to_string())),
        };

        if raw.trim().is_empty() {
            warn!(path = %self.path.display(), "participant store empty, healing to []");
            return self.heal_to_empty().await;
        }

        match serde_json::from_str(raw.trim()) {
            Ok(participants) => Ok(participants),
            Err(err) => {
                // Corrupt-but-present storage degrades to an empty store by
                // policy; the event team accepts the data loss over a dead
                // signup page.
                warn!(
                    path = %self.path.display(),
                    error = %err,
                    "participant store unparsable, healing to []"
                );
                self.heal_to_empty().await
            }
        }
    }

    async fn save_all(
        &self,
        participants: &[Participant],
    ) -> Result<(), ParticipantRepositoryError> {
        self.replace_with(participants).await
    }
}

#[cfg(test)]
#[path = "json_participant_repository_tests.rs"]
mod tests;
