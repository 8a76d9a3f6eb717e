//! The command boundary to the launcher backend. The backend owns filesystem
//! scanning, downloads, and process launching; this crate only issues
//! commands and merges the responses into its own state.

use async_trait::async_trait;

use crate::errors::Result;
use crate::models::{
    DownloadStatus, EngineVersion, EngineVersionsResponse, NewsEntry, Project, ProjectOpened,
};

/// Request/response command surface of the backend collaborator.
///
/// Every method maps to exactly one backend command. List-valued responses
/// are authoritative snapshots; callers replace their slice of state in full
/// rather than merging incrementally.
#[async_trait]
pub trait BackendClient: Send + Sync {
    /// Full catalog plus the installed subset, for startup and manual refresh.
    async fn get_engine_versions(&self) -> Result<EngineVersionsResponse>;

    async fn get_installed_versions(&self) -> Result<Vec<EngineVersion>>;

    /// Current progress of every in-flight engine download. Idempotent;
    /// polled on a fixed cadence.
    async fn poll_download_status(&self) -> Result<Vec<DownloadStatus>>;

    /// Starts an engine download. Progress surfaces through
    /// [`poll_download_status`](Self::poll_download_status); the installed
    /// set is refreshed separately once the command completes.
    async fn install_engine(&self, engine_name: &str) -> Result<()>;

    async fn remove_engine(&self, engine_name: &str) -> Result<Vec<EngineVersion>>;

    /// Launches the engine standalone, without a project.
    async fn open_engine(&self, engine_name: &str) -> Result<()>;

    async fn open_project(&self, project_name: &str) -> Result<ProjectOpened>;

    async fn get_projects(&self) -> Result<Vec<Project>>;

    /// Rebinds a project to an engine by name (or the unbound sentinel) and
    /// returns the full project list with validity recomputed.
    async fn set_project_engine(
        &self,
        project_name: &str,
        engine_name: &str,
    ) -> Result<Vec<Project>>;

    async fn get_project_paths(&self) -> Result<Vec<String>>;

    async fn save_project_path(&self, project_directory: &str) -> Result<Vec<String>>;

    async fn remove_project_path(&self, project_directory: &str) -> Result<Vec<String>>;

    async fn get_news(&self) -> Result<Vec<NewsEntry>>;
}
