use regex::Regex;

/// Core module name to browser replacement package. Pure configuration,
/// fixed for the process lifetime.
pub fn get_polyfills() -> Vec<(&'static str, &'static str)> {
    vec![
        ("assert", "assert"),
        ("buffer", "buffer"),
        ("console", "console-browserify"),
        ("constants", "constants-browserify"),
        ("crypto", "crypto-browserify"),
        ("domain", "domain-browser"),
        ("events", "events"),
        ("http", "stream-http"),
        ("https", "https-browserify"),
        ("os", "os-browserify"),
        ("path", "path-browserify"),
        ("zlib", "browserify-zlib"),
        ("process", "process"),
        ("punycode", "punycode"),
        ("querystring", "querystring-es3"),
        ("stream", "readable-stream"),
        ("string_decoder", "string_decoder"),
        ("sys", "util"),
        ("timers", "timers-browserify"),
        ("tty", "tty-browserify"),
        ("url", "url"),
        ("util", "util"),
        ("vm", "vm-browserify"),
    ]
}

/// Filter matching the module itself or any sub-path under it,
/// e.g. `stream` and `stream/promises`.
pub fn module_filter(name: &str) -> Regex {
    // table keys are plain identifiers, the pattern cannot fail to compile
    Regex::new(&format!("^({})(/.*)?$", name)).unwrap()
}
