use std::path::Path;

use anyhow::{anyhow, Result};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("unsupported loader \"{ext}\" for \"{path}\"")]
    UnsupportedLoader { ext: String, path: String },
}

/// The host bundler's content-type classification for a loaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Loader {
    Js,
    Jsx,
    Ts,
    Tsx,
    Css,
    Json,
    Text,
    Base64,
    DataUrl,
    Binary,
    File,
    Default,
}

impl Loader {
    pub fn from_ext(ext: &str) -> Option<Loader> {
        match ext {
            "js" => Some(Loader::Js),
            "jsx" => Some(Loader::Jsx),
            "ts" => Some(Loader::Ts),
            "tsx" => Some(Loader::Tsx),
            "css" => Some(Loader::Css),
            "json" => Some(Loader::Json),
            "text" => Some(Loader::Text),
            "base64" => Some(Loader::Base64),
            "dataurl" => Some(Loader::DataUrl),
            "binary" => Some(Loader::Binary),
            "file" => Some(Loader::File),
            "default" => Some(Loader::Default),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Loader::Js => "js",
            Loader::Jsx => "jsx",
            Loader::Ts => "ts",
            Loader::Tsx => "tsx",
            Loader::Css => "css",
            Loader::Json => "json",
            Loader::Text => "text",
            Loader::Base64 => "base64",
            Loader::DataUrl => "dataurl",
            Loader::Binary => "binary",
            Loader::File => "file",
            Loader::Default => "default",
        }
    }
}

/// Classify a file by its extension. Extensions outside the allow-list are
/// fatal, including extension-less paths.
pub fn loader_by_ext(path: &str) -> Result<Loader> {
    let ext = ext_name(path).unwrap_or("");
    Loader::from_ext(ext).ok_or_else(|| {
        anyhow!(LoadError::UnsupportedLoader {
            ext: ext.to_string(),
            path: path.to_string(),
        })
    })
}

pub fn read_content(path: &str) -> Result<String> {
    std::fs::read_to_string(path).map_err(|err| anyhow!("read file error: {}, {}", path, err))
}

fn ext_name(path: &str) -> Option<&str> {
    Path::new(path).extension().and_then(|ext| ext.to_str())
}
