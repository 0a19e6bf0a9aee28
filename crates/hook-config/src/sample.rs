//! The configuration written by `hookset sample-config`

const SAMPLE_CONFIG: &str = include_str!("sample-config.yaml");

/// A ready-to-use configuration: whitespace fixing, import sorting,
/// formatting, linting and license-header insertion for Python sources.
pub fn sample_config() -> &'static str {
    SAMPLE_CONFIG
}
