use std::path::PathBuf;

use anyhow::Result;
use regex::Regex;
use tracing::debug;

use crate::config::BuildOptions;
use crate::load::Loader;

pub struct OnResolveArgs {
    /// the import specifier as written in source, e.g. `stream/promises`
    pub path: String,
}

pub struct OnLoadArgs {
    /// the resolved filesystem path the host is about to read
    pub path: String,
}

pub struct OnResolveResult {
    pub path: PathBuf,
}

pub struct OnLoadResult {
    pub contents: String,
    pub loader: Loader,
}

type ResolveFn = Box<dyn Fn(&OnResolveArgs) -> Result<OnResolveResult> + Send + Sync>;
type LoadFn = Box<dyn Fn(&OnLoadArgs) -> Result<OnLoadResult> + Send + Sync>;

struct ResolveHook {
    filter: Regex,
    callback: ResolveFn,
}

struct LoadHook {
    filter: Regex,
    callback: LoadFn,
}

/// Host-side handle passed to plugin `setup`. Plugins read
/// `initial_options`, may augment `define`, and register hooks; the host
/// drives `resolve`/`load` later during its own phases, first matching hook
/// wins.
pub struct PluginBuild {
    pub initial_options: BuildOptions,
    resolve_hooks: Vec<ResolveHook>,
    load_hooks: Vec<LoadHook>,
}

impl PluginBuild {
    pub fn new(initial_options: BuildOptions) -> Self {
        Self {
            initial_options,
            resolve_hooks: vec![],
            load_hooks: vec![],
        }
    }

    pub fn on_resolve<F>(&mut self, filter: Regex, callback: F)
    where
        F: Fn(&OnResolveArgs) -> Result<OnResolveResult> + Send + Sync + 'static,
    {
        self.resolve_hooks.push(ResolveHook {
            filter,
            callback: Box::new(callback),
        });
    }

    pub fn on_load<F>(&mut self, filter: Regex, callback: F)
    where
        F: Fn(&OnLoadArgs) -> Result<OnLoadResult> + Send + Sync + 'static,
    {
        self.load_hooks.push(LoadHook {
            filter,
            callback: Box::new(callback),
        });
    }

    pub fn resolve(&self, path: &str) -> Result<Option<OnResolveResult>> {
        for hook in &self.resolve_hooks {
            if hook.filter.is_match(path) {
                debug!("resolve: {}", path);
                let args = OnResolveArgs {
                    path: path.to_string(),
                };
                return (hook.callback)(&args).map(Some);
            }
        }
        Ok(None)
    }

    pub fn load(&self, path: &str) -> Result<Option<OnLoadResult>> {
        for hook in &self.load_hooks {
            if hook.filter.is_match(path) {
                debug!("load: {}", path);
                let args = OnLoadArgs {
                    path: path.to_string(),
                };
                return (hook.callback)(&args).map(Some);
            }
        }
        Ok(None)
    }

    pub fn resolve_hook_count(&self) -> usize {
        self.resolve_hooks.len()
    }

    pub fn load_hook_count(&self) -> usize {
        self.load_hooks.len()
    }
}

pub trait Plugin {
    /// define plugin name
    ///
    /// Note: it is recommended to prefix a namespace to avoid name conflicts
    fn name(&self) -> &str;

    /// let plugin run before other plugin
    fn before(&self) -> &str {
        ""
    }

    fn setup(&self, build: &mut PluginBuild) -> Result<()>;
}

pub struct PluginDriver {
    plugins: Vec<Box<dyn Plugin>>,
}

impl Default for PluginDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl PluginDriver {
    pub fn new() -> Self {
        Self { plugins: vec![] }
    }

    fn check_plugin_exist(&self, name: &str) -> bool {
        self.plugins.iter().any(|p| p.name() == name)
    }

    /// register a new plugin
    ///
    /// * `plugin` - a plugin instance
    pub fn register<T: 'static + Plugin>(&mut self, plugin: T) {
        assert!(
            !self.check_plugin_exist(plugin.name()),
            "plugin {} already exist, please check your plugin name",
            plugin.name()
        );
        let mut insert_pos = self.plugins.len();
        let before = plugin.before();

        if let Some(before_pos) = match before.is_empty() {
            false => self.plugins.iter().position(|p| p.name() == before),
            true => None,
        } {
            insert_pos = before_pos;
        }

        self.plugins.insert(insert_pos, Box::new(plugin));
    }

    /// run every plugin's setup against the build handle, in registration
    /// order
    pub fn setup(&self, build: &mut PluginBuild) -> Result<()> {
        for plugin in &self.plugins {
            debug!("setup: {}", plugin.name());
            plugin.setup(build)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use regex::Regex;

    use super::{OnLoadResult, OnResolveResult, PluginBuild};
    use crate::config::BuildOptions;

    #[test]
    fn test_first_matching_resolve_hook_wins() {
        let mut build = PluginBuild::new(BuildOptions::default());
        build.on_resolve(Regex::new("^foo$").unwrap(), |_args| {
            Ok(OnResolveResult {
                path: "first".into(),
            })
        });
        build.on_resolve(Regex::new("^foo$").unwrap(), |_args| {
            Ok(OnResolveResult {
                path: "second".into(),
            })
        });

        let ret = build.resolve("foo").unwrap().unwrap();
        assert_eq!(ret.path.to_string_lossy(), "first");
    }

    #[test]
    fn test_unmatched_path_is_left_to_the_host() {
        let mut build = PluginBuild::new(BuildOptions::default());
        build.on_resolve(Regex::new("^foo$").unwrap(), |_args| {
            Ok(OnResolveResult { path: "foo".into() })
        });

        assert!(build.resolve("./relative").unwrap().is_none());
        assert!(build.load("whatever.js").unwrap().is_none());
    }

    #[test]
    fn test_load_hook_error_propagates() {
        let mut build = PluginBuild::new(BuildOptions::default());
        build.on_load(Regex::new("\\.js$").unwrap(), |args| -> Result<OnLoadResult> {
            anyhow::bail!("boom: {}", args.path)
        });

        assert!(build.load("entry.js").is_err());
    }
}
