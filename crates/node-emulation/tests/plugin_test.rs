use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Result;
use node_emulation::{BuildOptions, NodeEmulationPlugin, Plugin, PluginBuild, PluginDriver};

pub struct TestPlugin1;

impl Plugin for TestPlugin1 {
    fn name(&self) -> &str {
        "test:plugin-1"
    }

    fn setup(&self, build: &mut PluginBuild) -> Result<()> {
        build
            .initial_options
            .define
            .insert("ORDER".to_string(), "\"plugin-1\"".to_string());
        Ok(())
    }
}

pub struct TestPlugin2;

impl Plugin for TestPlugin2 {
    fn name(&self) -> &str {
        "test:plugin-2"
    }

    fn before(&self) -> &str {
        "test:plugin-1"
    }

    fn setup(&self, build: &mut PluginBuild) -> Result<()> {
        build
            .initial_options
            .define
            .insert("ORDER".to_string(), "\"plugin-2\"".to_string());
        Ok(())
    }
}

fn test_root() -> PathBuf {
    std::env::current_dir().unwrap().join("test")
}

fn fixed_options() -> BuildOptions {
    BuildOptions::from_literal_str(
        r#"{"platform":"browser","entryPoints":["test/entry/index.js"]}"#,
    )
    .unwrap()
}

#[test]
fn test_before_ordering() {
    // plugin-2 is registered last but configured to run before plugin-1,
    // so plugin-1's setup runs last and its define value wins
    let mut driver = PluginDriver::new();
    driver.register(TestPlugin2 {});
    driver.register(TestPlugin1 {});

    let mut build = PluginBuild::new(fixed_options());
    driver.setup(&mut build).unwrap();
    assert_eq!(
        build.initial_options.define.get("ORDER"),
        Some(&"\"plugin-1\"".to_string())
    );
}

#[test]
#[should_panic(expected = "already exist")]
fn test_duplicate_registration_panics() {
    let env = HashMap::new();
    let mut driver = PluginDriver::new();
    driver.register(NodeEmulationPlugin::new(env.clone(), test_root()));
    driver.register(NodeEmulationPlugin::new(env, test_root()));
}

#[test]
fn test_browser_build_end_to_end() {
    node_emulation::logger::init_logger();

    let env = HashMap::from([("NODE_ENV".to_string(), "test".to_string())]);
    let mut driver = PluginDriver::new();
    driver.register(NodeEmulationPlugin::new(env, test_root()));

    let mut build = PluginBuild::new(fixed_options());
    driver.setup(&mut build).unwrap();

    // environment constants are in place
    assert_eq!(
        build.initial_options.define.get("process.env.NODE_ENV"),
        Some(&"\"test\"".to_string())
    );

    // the entry point is shimmed
    let loaded = build.load("test/entry/index.js").unwrap().unwrap();
    assert!(loaded
        .contents
        .starts_with("window.process = require(\"process\");"));

    // core modules land inside their polyfill packages
    for (module, suffix) in [
        ("crypto", "test/node_modules/crypto-browserify/index.js"),
        ("process", "test/node_modules/process/browser.js"),
        ("stream/promises", "test/node_modules/readable-stream/readable.js"),
    ] {
        let resolved = build.resolve(module).unwrap().unwrap();
        assert!(
            resolved.path.ends_with(suffix),
            "{} resolved to {}",
            module,
            resolved.path.display()
        );
    }
}

#[test]
fn test_node_build_is_untouched() {
    let env = HashMap::from([("NODE_ENV".to_string(), "test".to_string())]);
    let mut driver = PluginDriver::new();
    driver.register(NodeEmulationPlugin::new(env, test_root()));

    let options = BuildOptions::from_literal_str(r#"{"platform":"node"}"#).unwrap();
    let mut build = PluginBuild::new(options);
    driver.setup(&mut build).unwrap();

    assert!(build.initial_options.define.is_empty());
    assert!(build.resolve("crypto").unwrap().is_none());
}
