//! File-backed job roles: one `<role>.txt` per role in a fixed directory.
//! Nothing is cached; every call hits the filesystem.

use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::Context;

use crate::errors::AppError;

const ROLE_EXTENSION: &str = "txt";

#[derive(Debug, Clone)]
pub struct RoleStore {
    dir: PathBuf,
}

impl RoleStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Role ids currently on disk, sorted.
    pub async fn list(&self) -> Result<Vec<String>, AppError> {
        let mut entries = tokio::fs::read_dir(&self.dir)
            .await
            .with_context(|| format!("Failed to read job roles dir {}", self.dir.display()))?;

        let mut roles = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .context("Failed to scan job roles dir")?
        {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(ROLE_EXTENSION) {
                continue;
            }
            let is_file = tokio::fs::metadata(&path)
                .await
                .map(|m| m.is_file())
                .unwrap_or(false);
            if !is_file {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                roles.push(stem.to_string());
            }
        }
        roles.sort();
        Ok(roles)
    }

    /// Reads the description text for `role`.
    /// Unknown roles and names that are not a plain file stem are `RoleNotFound`.
    pub async fn load(&self, role: &str) -> Result<String, AppError> {
        let path = self
            .resolve(role)
            .ok_or_else(|| AppError::RoleNotFound(role.to_string()))?;

        match tokio::fs::read_to_string(&path).await {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(AppError::RoleNotFound(role.to_string())),
            Err(e) => Err(AppError::Internal(
                anyhow::Error::new(e).context(format!("Failed to read {}", path.display())),
            )),
        }
    }

    /// `Ok` when `role` names an existing role file; same `RoleNotFound` rules as `load`.
    pub async fn ensure_exists(&self, role: &str) -> Result<(), AppError> {
        let path = self
            .resolve(role)
            .ok_or_else(|| AppError::RoleNotFound(role.to_string()))?;

        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => Ok(()),
            Ok(_) => Err(AppError::RoleNotFound(role.to_string())),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(AppError::RoleNotFound(role.to_string())),
            Err(e) => Err(AppError::Internal(
                anyhow::Error::new(e).context(format!("Failed to stat {}", path.display())),
            )),
        }
    }

    fn resolve(&self, role: &str) -> Option<PathBuf> {
        if !is_plain_role_name(role) {
            return None;
        }
        Some(self.dir.join(format!("{role}.{ROLE_EXTENSION}")))
    }
}

fn is_plain_role_name(role: &str) -> bool {
    !role.is_empty()
        && !role.starts_with('.')
        && !role.contains("..")
        && !role.contains(['/', '\\', '\0'])
}
