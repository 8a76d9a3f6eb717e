//! Catalog reconciliation: which known engine versions are still available
//! to install, given the set already present on this machine.

use std::collections::HashSet;

use crate::models::EngineVersion;

/// Returns every engine in `all_engines` whose name does not appear in
/// `installed_engines`. Pure set difference keyed by `engine_name`; callers
/// re-derive after every change to either input rather than caching.
pub fn available_engines(
    all_engines: &[EngineVersion],
    installed_engines: &[EngineVersion],
) -> Vec<EngineVersion> {
    let installed_names: HashSet<&str> = installed_engines
        .iter()
        .map(|engine| engine.engine_name.as_str())
        .collect();

    all_engines
        .iter()
        .filter(|engine| !installed_names.contains(engine.engine_name.as_str()))
        .cloned()
        .collect()
}
