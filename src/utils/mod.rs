/// Tracing subscriber setup.
pub mod logging;
/// TOML configuration (`editor.toml`).
pub mod toml_config;
