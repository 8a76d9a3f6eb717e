use async_trait::async_trait;

use crate::backend::BackendClient;
use crate::errors::Result;
use crate::models::{
    DownloadStatus, EngineVersion, EngineVersionsResponse, NewsEntry, Project, ProjectOpened,
};
use crate::services::ApiClient;

/// Production [`BackendClient`] speaking JSON over HTTP to the launcher
/// backend.
#[derive(Clone)]
pub struct HttpBackend {
    api: ApiClient,
}

impl HttpBackend {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub fn from_env() -> Self {
        Self::new(ApiClient::from_env())
    }
}

#[async_trait]
impl BackendClient for HttpBackend {
    async fn get_engine_versions(&self) -> Result<EngineVersionsResponse> {
        self.api.get("engines/versions").await
    }

    async fn get_installed_versions(&self) -> Result<Vec<EngineVersion>> {
        self.api.get("engines/installed").await
    }

    async fn poll_download_status(&self) -> Result<Vec<DownloadStatus>> {
        // The wire format is a list of (name, percent) pairs.
        let pairs: Vec<(String, u8)> = self.api.get("engines/downloads/status").await?;
        Ok(pairs.into_iter().map(DownloadStatus::from).collect())
    }

    async fn install_engine(&self, engine_name: &str) -> Result<()> {
        let _: serde_json::Value = self
            .api
            .post(
                &format!("engines/{engine_name}/install"),
                serde_json::json!({}),
            )
            .await?;
        Ok(())
    }

    async fn remove_engine(&self, engine_name: &str) -> Result<Vec<EngineVersion>> {
        self.api.delete(&format!("engines/{engine_name}")).await
    }

    async fn open_engine(&self, engine_name: &str) -> Result<()> {
        let _: serde_json::Value = self
            .api
            .post(
                &format!("engines/{engine_name}/open"),
                serde_json::json!({}),
            )
            .await?;
        Ok(())
    }

    async fn open_project(&self, project_name: &str) -> Result<ProjectOpened> {
        self.api
            .post(
                &format!("projects/{project_name}/open"),
                serde_json::json!({}),
            )
            .await
    }

    async fn get_projects(&self) -> Result<Vec<Project>> {
        self.api.get("projects").await
    }

    async fn set_project_engine(
        &self,
        project_name: &str,
        engine_name: &str,
    ) -> Result<Vec<Project>> {
        self.api
            .post(
                &format!("projects/{project_name}/engine"),
                serde_json::json!({ "engineName": engine_name }),
            )
            .await
    }

    async fn get_project_paths(&self) -> Result<Vec<String>> {
        self.api.get("projects/paths").await
    }

    async fn save_project_path(&self, project_directory: &str) -> Result<Vec<String>> {
        self.api
            .post(
                "projects/paths",
                serde_json::json!({ "projectDirectory": project_directory }),
            )
            .await
    }

    async fn remove_project_path(&self, project_directory: &str) -> Result<Vec<String>> {
        self.api
            .post(
                "projects/paths/remove",
                serde_json::json!({ "projectDirectory": project_directory }),
            )
            .await
    }

    async fn get_news(&self) -> Result<Vec<NewsEntry>> {
        self.api.get("news").await
    }
}
