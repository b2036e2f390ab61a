//! Pipeline configuration.
//!
//! A [`PipelineConfig`] is plain data with serde derives so hosts can embed it
//! in their own configuration files. All fields have defaults; construct with
//! `PipelineConfig::default()` and override what you need.

use serde::{Deserialize, Serialize};

/// Pattern a template variable matches when the caller supplies none:
/// one or more letters, digits, hyphens, or underscores (a URL-safe slug).
pub const DEFAULT_VAR_PATTERN: &str = "[0-9A-Za-z_-]+";

/// Behavior knobs for a [`Pipeline`](crate::pipeline::Pipeline).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// When no route matches: `false` (default) produces a 404 response;
    /// `true` hands the exchange to the caller-supplied continuation instead.
    pub continue_on_not_found: bool,

    /// Where extracted path variables land on the request. `None` (default)
    /// attaches each variable as an individually named string attribute;
    /// `Some(name)` attaches all of them as one object-valued attribute.
    pub vars_attribute: Option<String>,

    /// Regex a template variable matches when `add` is called without a
    /// per-variable pattern for it.
    pub default_var_pattern: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            continue_on_not_found: false,
            vars_attribute: None,
            default_var_pattern: DEFAULT_VAR_PATTERN.to_string(),
        }
    }
}
