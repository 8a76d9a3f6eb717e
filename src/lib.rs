//! Client-side reconciliation and orchestration core for a game-engine
//! version launcher.
//!
//! The backend that scans directories, downloads engine archives, and spawns
//! processes sits behind the [`backend::BackendClient`] command boundary.
//! This crate owns what the front-end shows: the catalog of known engine
//! versions reconciled against the installed set ([`catalog`]), live download
//! progress kept fresh by polling ([`download_tracker`]), each project's
//! binding to an installed engine ([`binding`]), and the orchestrator that
//! holds all of it as immutable snapshots ([`orchestrator`]).

pub mod backend;
pub mod binding;
pub mod catalog;
pub mod download_tracker;
pub mod errors;
pub mod logging;
pub mod models;
pub mod orchestrator;
pub mod services;

pub use backend::BackendClient;
pub use download_tracker::{DownloadTracker, EngineDisplayState, PollGuard};
pub use errors::{LauncherError, Result};
pub use models::{
    DownloadStatus, EngineVersion, EngineVersionsResponse, NewsEntry, Project, ProjectOpened,
    ProjectPath, UNBOUND_ENGINE,
};
pub use orchestrator::{LauncherSnapshot, Orchestrator, Page};
pub use services::{ApiClient, HttpBackend};
