//! Composition root. Owns the authoritative catalog, installed set, project
//! list, and watched paths; every backend response replaces one slice of an
//! immutable snapshot through a single assignment point.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use crate::backend::BackendClient;
use crate::binding;
use crate::catalog;
use crate::download_tracker::{DownloadTracker, PollGuard};
use crate::errors::Result;
use crate::models::{EngineVersion, NewsEntry, Project, ProjectPath};

/// Immutable view of all launcher state. Consumers hold an `Arc` to a
/// snapshot; state transitions swap the whole snapshot, never fields.
#[derive(Clone, Debug, Default)]
pub struct LauncherSnapshot {
    pub all_engines: Vec<EngineVersion>,
    pub installed_engines: Vec<EngineVersion>,
    pub projects: Vec<Project>,
    pub project_paths: Vec<ProjectPath>,
    pub news: Vec<NewsEntry>,
}

/// The launcher's mutually exclusive views. Switching pages does not cancel
/// in-flight requests; only the download polling loop is scoped to the
/// Engines page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Page {
    #[default]
    Projects,
    Engines,
    Settings,
    News,
}

struct PageState {
    page: Page,
    poll_guard: Option<PollGuard>,
}

pub struct Orchestrator {
    backend: Arc<dyn BackendClient>,
    state: RwLock<Arc<LauncherSnapshot>>,
    generation: AtomicU64,
    downloads: DownloadTracker,
    page: Mutex<PageState>,
}

impl Orchestrator {
    pub fn new(backend: Arc<dyn BackendClient>) -> Self {
        let downloads = DownloadTracker::new(Arc::clone(&backend));
        Self {
            backend,
            state: RwLock::new(Arc::new(LauncherSnapshot::default())),
            generation: AtomicU64::new(0),
            downloads,
            page: Mutex::new(PageState {
                page: Page::default(),
                poll_guard: None,
            }),
        }
    }

    pub fn snapshot(&self) -> Arc<LauncherSnapshot> {
        match self.state.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    /// Bumped on every committed snapshot; equality of generations implies
    /// equality of state, so views can skip re-rendering.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    pub fn downloads(&self) -> &DownloadTracker {
        &self.downloads
    }

    /// Runs the startup refreshes. The four fetches are issued concurrently
    /// and may complete in any order; each merges only the slice it owns, so
    /// interleaved completions cannot corrupt unrelated state. Individual
    /// failures are logged and leave that slice at its prior value.
    pub async fn activate(&self) {
        let (engines, projects, paths, news) = tokio::join!(
            self.refresh_engines(),
            self.refresh_projects(),
            self.refresh_project_paths(),
            self.refresh_news(),
        );
        for (name, result) in [
            ("engines", engines),
            ("projects", projects),
            ("project paths", paths),
            ("news", news),
        ] {
            if let Err(err) = result {
                tracing::warn!("startup refresh of {name} failed: {err}");
            }
        }
    }

    /// Derived view: catalog minus installed, by engine name.
    pub fn available_engines(&self) -> Vec<EngineVersion> {
        let snapshot = self.snapshot();
        catalog::available_engines(&snapshot.all_engines, &snapshot.installed_engines)
    }

    /// Derived view: projects in display order, most recently opened first.
    pub fn sorted_projects(&self) -> Vec<Project> {
        let mut projects = self.snapshot().projects.clone();
        binding::sort_projects(&mut projects);
        projects
    }

    pub async fn refresh_engines(&self) -> Result<()> {
        let response = self.backend.get_engine_versions().await?;
        self.commit(|next| {
            next.all_engines = response.all_versions;
            next.installed_engines = response.installed_versions;
        });
        Ok(())
    }

    pub async fn refresh_installed(&self) -> Result<()> {
        let installed = self.backend.get_installed_versions().await?;
        self.commit(|next| next.installed_engines = installed);
        Ok(())
    }

    pub async fn refresh_projects(&self) -> Result<()> {
        let projects = self.backend.get_projects().await?;
        self.commit(|next| next.projects = projects);
        Ok(())
    }

    pub async fn refresh_project_paths(&self) -> Result<()> {
        let paths = self.backend.get_project_paths().await?;
        self.commit(|next| next.project_paths = paths);
        Ok(())
    }

    pub async fn refresh_news(&self) -> Result<()> {
        let news = self.backend.get_news().await?;
        self.commit(|next| next.news = news);
        Ok(())
    }

    /// Starts an engine download. Progress is observed through the download
    /// tracker; once the command completes the installed set is re-fetched,
    /// which also revalidates project bindings.
    pub async fn install_engine(&self, engine_name: &str) -> Result<()> {
        self.backend.install_engine(engine_name).await?;
        self.refresh_installed().await
    }

    pub async fn remove_engine(&self, engine_name: &str) -> Result<()> {
        let installed = self.backend.remove_engine(engine_name).await?;
        self.commit(|next| next.installed_engines = installed);
        Ok(())
    }

    /// Launches an engine standalone; no local state changes.
    pub async fn open_engine(&self, engine_name: &str) -> Result<()> {
        self.backend.open_engine(engine_name).await
    }

    /// Opens a project. On success only that project's last-opened timestamp
    /// is merged in; the list is then replaced in full to propagate.
    pub async fn open_project(&self, project_name: &str) -> Result<()> {
        let opened = self.backend.open_project(project_name).await?;
        self.commit(|next| {
            next.projects =
                binding::merge_opened(&next.projects, &opened.project_name, opened.last_date_opened);
        });
        Ok(())
    }

    /// Rebinds a project to an engine by name (or the unbound sentinel). No
    /// optimistic mutation: the backend's response replaces the whole project
    /// list, recomputing every project's validity as a side effect.
    pub async fn set_project_engine(&self, project_name: &str, engine_name: &str) -> Result<()> {
        let projects = self
            .backend
            .set_project_engine(project_name, engine_name)
            .await?;
        self.commit(|next| next.projects = projects);
        Ok(())
    }

    pub async fn add_project_path(&self, project_directory: &str) -> Result<()> {
        let paths = self.backend.save_project_path(project_directory).await?;
        self.commit(|next| next.project_paths = paths);
        Ok(())
    }

    pub async fn remove_project_path(&self, project_directory: &str) -> Result<()> {
        let paths = self.backend.remove_project_path(project_directory).await?;
        self.commit(|next| next.project_paths = paths);
        Ok(())
    }

    pub fn active_page(&self) -> Page {
        self.lock_page().page
    }

    /// Switches the active view. Entering the Engines page acquires the
    /// download polling loop; leaving it releases the guard, which aborts
    /// the loop. Nothing else is cancelled by a page switch.
    pub fn set_active_page(&self, page: Page) {
        let mut state = self.lock_page();
        if state.page == page {
            return;
        }
        state.page = page;
        state.poll_guard = match page {
            Page::Engines => Some(self.downloads.start()),
            _ => None,
        };
    }

    /// Single assignment point for launcher state: clones the current
    /// snapshot, applies the slice replacement, revalidates project bindings
    /// against the (possibly new) installed set, and publishes the result.
    ///
    /// Clone, replace, and publish all happen under the write lock (there is
    /// no await in between), so two handlers completing concurrently each
    /// see the other's slice: the later commit starts from the earlier
    /// commit's snapshot instead of a stale base.
    fn commit(&self, replace: impl FnOnce(&mut LauncherSnapshot)) {
        let mut guard = match self.state.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        let mut next = (**guard).clone();
        replace(&mut next);
        binding::validate_projects(&mut next.projects, &next.installed_engines);

        *guard = Arc::new(next);
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    fn lock_page(&self) -> std::sync::MutexGuard<'_, PageState> {
        match self.page.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
