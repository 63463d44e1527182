pub mod config;
pub mod load;
pub mod logger;
pub mod plugin;
pub mod plugins;
pub mod polyfill;
pub mod resolve;

pub use config::{BuildOptions, Platform};
pub use plugin::{Plugin, PluginBuild, PluginDriver};
pub use plugins::node_emulation::NodeEmulationPlugin;
