//! Project-to-engine binding: resolving a project's recorded engine name
//! against the installed set, validity recomputation, the launch timestamp
//! merge, and display ordering.

use chrono::DateTime;

use crate::models::{EngineVersion, Project, UNBOUND_ENGINE};

/// A selectable entry in the engine dropdown for one project.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineChoice {
    pub engine_name: String,
    pub selected: bool,
}

/// Resolves an engine reference by name against the installed set.
pub fn resolve_engine<'a>(
    installed_engines: &'a [EngineVersion],
    engine_name: &str,
) -> Option<&'a EngineVersion> {
    installed_engines
        .iter()
        .find(|engine| engine.engine_name == engine_name)
}

/// True iff the project's engine reference names a currently installed
/// engine. The unbound sentinel never resolves.
pub fn engine_valid(project: &Project, installed_engines: &[EngineVersion]) -> bool {
    project.engine_version != UNBOUND_ENGINE
        && resolve_engine(installed_engines, &project.engine_version).is_some()
}

/// Recomputes `engine_valid` for every project. Run after any change to the
/// project list or the installed set; validity is never set directly.
pub fn validate_projects(projects: &mut [Project], installed_engines: &[EngineVersion]) {
    for project in projects {
        project.engine_valid = engine_valid(project, installed_engines);
    }
}

/// Dropdown entries for one project: the explicit "N/A" option first, then
/// every installed engine, with the currently resolved one marked selected.
/// An unresolved reference leaves "N/A" selected.
pub fn engine_choices(installed_engines: &[EngineVersion], project: &Project) -> Vec<EngineChoice> {
    let resolved = resolve_engine(installed_engines, &project.engine_version);

    let mut choices = Vec::with_capacity(installed_engines.len() + 1);
    choices.push(EngineChoice {
        engine_name: UNBOUND_ENGINE.to_string(),
        selected: resolved.is_none(),
    });
    for engine in installed_engines {
        choices.push(EngineChoice {
            engine_name: engine.engine_name.clone(),
            selected: resolved.is_some_and(|r| r.engine_name == engine.engine_name),
        });
    }
    choices
}

/// Merges a successful open-project response into the list: only the named
/// project's `last_date_opened` changes, every other field is untouched.
pub fn merge_opened(projects: &[Project], project_name: &str, last_date_opened: i64) -> Vec<Project> {
    projects
        .iter()
        .map(|project| {
            if project.project_name == project_name {
                let mut updated = project.clone();
                updated.last_date_opened = last_date_opened;
                updated
            } else {
                project.clone()
            }
        })
        .collect()
}

/// Display order: most recently opened first; never-opened projects (0) last.
pub fn sort_projects(projects: &mut [Project]) {
    projects.sort_by(|a, b| b.last_date_opened.cmp(&a.last_date_opened));
}

/// Formats a last-opened timestamp for display; 0/absent renders as "N/A".
pub fn format_last_opened(last_date_opened: i64) -> String {
    if last_date_opened <= 0 {
        return "N/A".to_string();
    }
    match DateTime::from_timestamp_millis(last_date_opened) {
        Some(date) => date.format("%a %b %d %Y").to_string(),
        None => "N/A".to_string(),
    }
}
