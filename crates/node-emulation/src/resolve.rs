use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("package \"{package}\" not found in any node_modules from \"{root}\"")]
    PackageNotFound { package: String, root: String },
}

/// Locate the installed root directory of `package`, checking the nearest
/// `node_modules` first and walking up from `root`.
pub fn get_installed_path(package: &str, root: &Path) -> Result<PathBuf> {
    let mut dir = Some(root);
    while let Some(current) = dir {
        let candidate = current.join("node_modules").join(package);
        if candidate.is_dir() {
            debug!("installed path: {} -> {}", package, candidate.display());
            return Ok(candidate);
        }
        dir = current.parent();
    }
    Err(anyhow!(ResolveError::PackageNotFound {
        package: package.to_string(),
        root: root.display().to_string(),
    }))
}

/// Pick the entry file of an installed polyfill package for `module`:
/// a browser-specific override first, then the manifest's `main` field,
/// then `index.js`.
pub fn get_package_entry(module: &str, package_dir: &Path) -> Result<PathBuf> {
    // these packages ship a browser entry their manifest does not point at
    let mut main: Option<String> = match module {
        "os" | "process" => Some("browser.js".to_string()),
        "sys" | "util" => Some("util.js".to_string()),
        _ => None,
    };

    if main.is_none() {
        let manifest = package_dir.join("package.json");
        let content = std::fs::read_to_string(&manifest)
            .map_err(|err| anyhow!("read manifest error: {}, {}", manifest.display(), err))?;
        let pkg: Value = serde_json::from_str(&content)?;
        main = if module == "console" {
            Some("index.js".to_string())
        } else {
            pkg.get("main")
                .and_then(|v| v.as_str())
                .map(|s| s.to_string())
        };
    }

    let main = main.unwrap_or_else(|| "index.js".to_string());
    Ok(package_dir.join(main))
}
