//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process
//! startup and then passed into request handling. The intent is to avoid
//! reading process-wide environment variables during request handling, which
//! can lead to inconsistent behaviour in multi-threaded runtimes and test
//! harnesses.

use std::path::{Path, PathBuf};

use crate::constants::DEFAULT_KNOWLEDGE_DIR;
use crate::{CoreError, CoreResult};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    knowledge_dir: PathBuf,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidInput`] when the knowledge directory path
    /// is empty.
    pub fn new(knowledge_dir: PathBuf) -> CoreResult<Self> {
        if knowledge_dir.as_os_str().is_empty() {
            return Err(CoreError::InvalidInput(
                "knowledge_dir cannot be empty".into(),
            ));
        }
        Ok(Self { knowledge_dir })
    }

    pub fn knowledge_dir(&self) -> &Path {
        &self.knowledge_dir
    }
}

/// Resolve the knowledge directory without reading environment variables.
///
/// If `override_dir` is provided it is used as-is; otherwise the well-known
/// default directory applies.
pub fn resolve_knowledge_dir(override_dir: Option<PathBuf>) -> PathBuf {
    override_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_KNOWLEDGE_DIR))
}
