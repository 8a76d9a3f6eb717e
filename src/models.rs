use serde::{Deserialize, Serialize};

/// Sentinel engine reference meaning "no engine bound". Matches the "N/A"
/// option value the front-end submits.
pub const UNBOUND_ENGINE: &str = "NA";

/// Opaque identifier of a watched project directory. Set membership only;
/// display keeps the backend's order.
pub type ProjectPath = String;

/// One known engine build, installed or not. Replaced wholesale on every
/// refresh, never mutated in place.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EngineVersion {
    pub engine_name: String,
    pub engine_version: String,
    #[serde(default)]
    pub installation_path: String,
    /// Unix millis of the upstream release.
    #[serde(default)]
    pub updated_at: i64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub project_name: String,
    pub project_path: String,
    /// Unix millis; 0 means the project has never been opened.
    #[serde(default)]
    pub last_date_opened: i64,
    /// Engine reference by name, or [`UNBOUND_ENGINE`].
    pub engine_version: String,
    /// Derived: true iff `engine_version` resolves to an installed engine.
    #[serde(default)]
    pub engine_valid: bool,
    #[serde(default)]
    pub favorite: bool,
}

/// Progress of one in-flight engine download. Exists only while the transfer
/// is active; no entry means "not downloading".
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DownloadStatus {
    pub engine_name: String,
    /// 0-100, non-decreasing until the entry disappears.
    pub percent: u8,
}

impl From<(String, u8)> for DownloadStatus {
    fn from((engine_name, percent): (String, u8)) -> Self {
        Self {
            engine_name,
            percent,
        }
    }
}

/// Combined catalog payload returned by the get-engine-versions command.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct EngineVersionsResponse {
    #[serde(rename = "allVersions")]
    pub all_versions: Vec<EngineVersion>,
    #[serde(rename = "installedVersions")]
    pub installed_versions: Vec<EngineVersion>,
}

/// Response of the open-project command: which project was opened and its new
/// last-opened timestamp.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ProjectOpened {
    pub project_name: String,
    pub last_date_opened: i64,
}

/// Display-only news payload; carries no core logic.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct NewsEntry {
    pub title: String,
    pub info: String,
    pub body: String,
    pub image_url: String,
    pub href: String,
}
