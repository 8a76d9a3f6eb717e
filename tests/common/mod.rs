#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use enginedock::backend::BackendClient;
use enginedock::errors::{LauncherError, Result};
use enginedock::models::{
    DownloadStatus, EngineVersion, EngineVersionsResponse, NewsEntry, Project, ProjectOpened,
    UNBOUND_ENGINE,
};

/// One scripted response for the download status poll.
pub enum PollStep {
    Respond(Vec<DownloadStatus>),
    /// Responds only after the given delay, simulating a slow backend.
    RespondAfter(std::time::Duration, Vec<DownloadStatus>),
    Fail,
}

/// In-memory stand-in for the launcher backend. Holds its own authoritative
/// copies of every list and answers commands the way the real backend does:
/// with complete replacement snapshots.
#[derive(Default)]
pub struct FakeBackend {
    pub all_engines: Mutex<Vec<EngineVersion>>,
    pub installed: Mutex<Vec<EngineVersion>>,
    pub projects: Mutex<Vec<Project>>,
    pub paths: Mutex<Vec<String>>,
    pub news: Mutex<Vec<NewsEntry>>,
    /// Scripted poll responses, consumed front to back; once exhausted every
    /// further poll answers with an empty list.
    pub poll_script: Mutex<VecDeque<PollStep>>,
    pub poll_count: AtomicUsize,
    /// Timestamp handed back by the next open-project command.
    pub open_timestamp: AtomicI64,
    /// When set, every command fails without touching backend state.
    pub fail_commands: AtomicBool,
}

pub fn engine(name: &str) -> EngineVersion {
    EngineVersion {
        engine_name: name.to_string(),
        engine_version: name.to_string(),
        installation_path: format!("/engines/{name}"),
        updated_at: 1_700_000_000_000,
    }
}

pub fn project(name: &str, engine_version: &str, last_date_opened: i64) -> Project {
    Project {
        project_name: name.to_string(),
        project_path: format!("/projects/{name}"),
        last_date_opened,
        engine_version: engine_version.to_string(),
        engine_valid: false,
        favorite: false,
    }
}

impl FakeBackend {
    pub fn with_engines(all: Vec<EngineVersion>, installed: Vec<EngineVersion>) -> Self {
        let backend = Self::default();
        *backend.all_engines.lock().unwrap() = all;
        *backend.installed.lock().unwrap() = installed;
        backend
    }

    pub fn script_polls(&self, steps: Vec<PollStep>) {
        *self.poll_script.lock().unwrap() = steps.into();
    }

    pub fn polls_issued(&self) -> usize {
        self.poll_count.load(Ordering::SeqCst)
    }

    fn check_available(&self) -> Result<()> {
        if self.fail_commands.load(Ordering::SeqCst) {
            return Err(LauncherError::Http("HTTP 503: backend unavailable".to_string()));
        }
        Ok(())
    }

    fn validity_for(&self, engine_version: &str) -> bool {
        engine_version != UNBOUND_ENGINE
            && self
                .installed
                .lock()
                .unwrap()
                .iter()
                .any(|e| e.engine_name == engine_version)
    }
}

#[async_trait]
impl BackendClient for FakeBackend {
    async fn get_engine_versions(&self) -> Result<EngineVersionsResponse> {
        self.check_available()?;
        Ok(EngineVersionsResponse {
            all_versions: self.all_engines.lock().unwrap().clone(),
            installed_versions: self.installed.lock().unwrap().clone(),
        })
    }

    async fn get_installed_versions(&self) -> Result<Vec<EngineVersion>> {
        self.check_available()?;
        Ok(self.installed.lock().unwrap().clone())
    }

    async fn poll_download_status(&self) -> Result<Vec<DownloadStatus>> {
        self.poll_count.fetch_add(1, Ordering::SeqCst);
        let step = self.poll_script.lock().unwrap().pop_front();
        match step {
            Some(PollStep::Respond(snapshot)) => Ok(snapshot),
            Some(PollStep::RespondAfter(delay, snapshot)) => {
                tokio::time::sleep(delay).await;
                Ok(snapshot)
            }
            Some(PollStep::Fail) => {
                Err(LauncherError::Http("HTTP 500: poll failed".to_string()))
            }
            None => Ok(Vec::new()),
        }
    }

    async fn install_engine(&self, engine_name: &str) -> Result<()> {
        self.check_available()?;
        let found = self
            .all_engines
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.engine_name == engine_name)
            .cloned()
            .ok_or_else(|| LauncherError::NotFound(engine_name.to_string()))?;
        let mut installed = self.installed.lock().unwrap();
        if !installed.iter().any(|e| e.engine_name == engine_name) {
            installed.push(found);
        }
        Ok(())
    }

    async fn remove_engine(&self, engine_name: &str) -> Result<Vec<EngineVersion>> {
        self.check_available()?;
        let mut installed = self.installed.lock().unwrap();
        installed.retain(|e| e.engine_name != engine_name);
        Ok(installed.clone())
    }

    async fn open_engine(&self, engine_name: &str) -> Result<()> {
        self.check_available()?;
        self.installed
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.engine_name == engine_name)
            .map(|_| ())
            .ok_or_else(|| LauncherError::NotFound(engine_name.to_string()))
    }

    async fn open_project(&self, project_name: &str) -> Result<ProjectOpened> {
        self.check_available()?;
        let timestamp = self.open_timestamp.load(Ordering::SeqCst);
        let mut projects = self.projects.lock().unwrap();
        let opened = projects
            .iter_mut()
            .find(|p| p.project_name == project_name)
            .ok_or_else(|| LauncherError::NotFound(project_name.to_string()))?;
        opened.last_date_opened = timestamp;
        Ok(ProjectOpened {
            project_name: project_name.to_string(),
            last_date_opened: timestamp,
        })
    }

    async fn get_projects(&self) -> Result<Vec<Project>> {
        self.check_available()?;
        Ok(self.projects.lock().unwrap().clone())
    }

    async fn set_project_engine(
        &self,
        project_name: &str,
        engine_name: &str,
    ) -> Result<Vec<Project>> {
        self.check_available()?;
        let engine_valid = self.validity_for(engine_name);
        let mut projects = self.projects.lock().unwrap();
        let target = projects
            .iter_mut()
            .find(|p| p.project_name == project_name)
            .ok_or_else(|| LauncherError::NotFound(project_name.to_string()))?;
        target.engine_version = engine_name.to_string();
        target.engine_valid = engine_valid;
        Ok(projects.clone())
    }

    async fn get_project_paths(&self) -> Result<Vec<String>> {
        self.check_available()?;
        Ok(self.paths.lock().unwrap().clone())
    }

    async fn save_project_path(&self, project_directory: &str) -> Result<Vec<String>> {
        self.check_available()?;
        let mut paths = self.paths.lock().unwrap();
        if !paths.iter().any(|p| p == project_directory) {
            paths.push(project_directory.to_string());
        }
        Ok(paths.clone())
    }

    async fn remove_project_path(&self, project_directory: &str) -> Result<Vec<String>> {
        self.check_available()?;
        let mut paths = self.paths.lock().unwrap();
        paths.retain(|p| p != project_directory);
        Ok(paths.clone())
    }

    async fn get_news(&self) -> Result<Vec<NewsEntry>> {
        self.check_available()?;
        Ok(self.news.lock().unwrap().clone())
    }
}
