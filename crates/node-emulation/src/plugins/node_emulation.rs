use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use regex::Regex;
use thiserror::Error;
use tracing::debug;

use crate::config::Platform;
use crate::load::{loader_by_ext, read_content};
use crate::plugin::{OnLoadResult, OnResolveResult, Plugin, PluginBuild};
use crate::polyfill::{get_polyfills, module_filter};
use crate::resolve::{get_installed_path, get_package_entry};

const INJECT: &str = "window.process = require(\"process\");";

#[derive(Error, Debug)]
pub enum NodeEmulationError {
    #[error("entry points are not configured")]
    MissingEntryPoints,
    #[error("filter did not match \"{0}\"")]
    FilterMismatch(String),
}

/// Makes a browser-platform build behave as if running under a Node-like
/// host: `process.env` values become compile-time constants, entry points
/// get a `process` global shim, and imports of core modules are redirected
/// to installed browser polyfill packages. A no-op for any other platform.
pub struct NodeEmulationPlugin {
    env: HashMap<String, String>,
    root: PathBuf,
}

impl NodeEmulationPlugin {
    /// The environment snapshot is explicit so tests never have to touch the
    /// real process environment.
    pub fn new(env: HashMap<String, String>, root: PathBuf) -> Self {
        Self { env, root }
    }

    /// Capture the real process environment, resolving polyfills relative to
    /// `root`.
    pub fn from_env(root: impl Into<PathBuf>) -> Self {
        Self::new(std::env::vars().collect(), root.into())
    }

    fn inject_environment_variables(&self, build: &mut PluginBuild) -> Result<()> {
        if build.initial_options.entry_points.is_empty() {
            return Err(anyhow!(NodeEmulationError::MissingEntryPoints));
        }

        for (key, value) in &self.env {
            // names like ProgramFiles(x86) cannot be define keys
            if key.contains('(') {
                continue;
            }
            let quoted = serde_json::Value::String(value.clone()).to_string();
            build
                .initial_options
                .define
                .entry(format!("process.env.{}", key))
                .or_insert(quoted);
        }

        for entry_point in build.initial_options.entry_points.clone() {
            let pattern = if cfg!(windows) {
                entry_point.replace('/', "\\\\")
            } else {
                entry_point.clone()
            };
            let filter = Regex::new(&format!("{}$", pattern))?;
            build.on_load(filter, move |args| {
                let contents = format!("{}{}", INJECT, read_content(&args.path)?);
                let loader = loader_by_ext(&args.path)?;
                debug!("load: {} as {}", args.path, loader.as_str());
                Ok(OnLoadResult { contents, loader })
            });
        }
        Ok(())
    }

    fn inject_polyfills(&self, build: &mut PluginBuild) -> Result<()> {
        for (module, package) in get_polyfills() {
            let filter = module_filter(module);
            let matcher = filter.clone();
            let root = self.root.clone();
            build.on_resolve(filter, move |args| {
                // registration guarantees a match, re-check anyway
                let captures = matcher
                    .captures(&args.path)
                    .ok_or_else(|| anyhow!(NodeEmulationError::FilterMismatch(args.path.clone())))?;
                let module = captures
                    .get(1)
                    .map(|m| m.as_str())
                    .ok_or_else(|| anyhow!(NodeEmulationError::FilterMismatch(args.path.clone())))?;

                let package_dir = get_installed_path(package, &root)?;
                // sub-paths like stream/promises land on the root entry too
                let entry = get_package_entry(module, &package_dir)?;
                debug!("resolve: {} -> {}", args.path, entry.display());
                Ok(OnResolveResult { path: entry })
            });
        }
        Ok(())
    }
}

impl Plugin for NodeEmulationPlugin {
    fn name(&self) -> &str {
        "node-emulation"
    }

    fn setup(&self, build: &mut PluginBuild) -> Result<()> {
        if build.initial_options.platform != Platform::Browser {
            return Ok(());
        }

        self.inject_environment_variables(build)?;
        self.inject_polyfills(build)
    }
}
