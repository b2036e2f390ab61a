use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::dispatcher::Dispatchable;
use crate::error::RouteError;
use crate::router::route::{CompiledMatcher, Route, RouteKind};

/// A variable expression is exactly one identifier inside braces.
static VAR_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new("^[A-Za-z_][A-Za-z0-9_]*$").expect("valid variable name pattern"));

/// Classifies target strings and constructs [`Route`] values.
///
/// Classification precedence (first rule that applies wins):
///
/// 1. wrapped in matching regex delimiters → [`RouteKind::Pattern`]
/// 2. trailing `*` → [`RouteKind::Prefix`]
/// 3. contains a `{name}` expression → [`RouteKind::Template`]
/// 4. anything else → [`RouteKind::Static`]
pub struct RouteFactory {
    default_var_pattern: String,
}

impl RouteFactory {
    pub fn new(default_var_pattern: impl Into<String>) -> Self {
        Self {
            default_var_pattern: default_var_pattern.into(),
        }
    }

    /// Determine the kind a target string would be registered as.
    pub fn classify(target: &str) -> RouteKind {
        let bytes = target.as_bytes();
        if bytes.len() >= 2 {
            let delim = bytes[0];
            // `/` opens a path, not a delimiter pair. Delimiters are single
            // ASCII punctuation bytes, used consistently at both ends.
            if delim.is_ascii()
                && !delim.is_ascii_alphanumeric()
                && delim != b'/'
                && delim == bytes[bytes.len() - 1]
            {
                return RouteKind::Pattern;
            }
        }
        if target.ends_with('*') {
            return RouteKind::Prefix;
        }
        if target.contains('{') || target.contains('}') {
            return RouteKind::Template;
        }
        RouteKind::Static
    }

    /// Construct a route for the target, compiling its matcher when the kind
    /// needs one. Malformed targets fail here, at registration time.
    pub fn create(
        &self,
        target: &str,
        dispatchable: Dispatchable,
        var_patterns: &HashMap<String, String>,
    ) -> Result<Route, RouteError> {
        let kind = Self::classify(target);
        let matcher = match kind {
            RouteKind::Pattern => Some(compile_pattern(target)?),
            RouteKind::Template => {
                Some(self.compile_template(target, var_patterns)?)
            }
            RouteKind::Static | RouteKind::Prefix => None,
        };
        debug!(target, kind = ?kind, "route constructed");
        Ok(Route {
            target: Arc::from(target),
            kind,
            matcher,
            dispatchable,
        })
    }

    /// Build the anchored regex for a URI template.
    ///
    /// The template is split on `/`; literal segments are escaped, and each
    /// `{name}` expression becomes a named capture group matching either the
    /// caller-supplied pattern for that variable or the default slug pattern.
    fn compile_template(
        &self,
        target: &str,
        var_patterns: &HashMap<String, String>,
    ) -> Result<CompiledMatcher, RouteError> {
        let mut pattern = String::with_capacity(target.len() + 16);
        pattern.push('^');
        let mut var_names: Vec<Arc<str>> = Vec::new();
        for (i, segment) in target.split('/').enumerate() {
            if i > 0 {
                pattern.push('/');
            }
            if segment.contains('{') || segment.contains('}') {
                let name = parse_expression(segment).ok_or_else(|| {
                    RouteError::InvalidTemplate {
                        target: target.to_string(),
                        segment: segment.to_string(),
                    }
                })?;
                let var_pattern = var_patterns
                    .get(name)
                    .map(String::as_str)
                    .unwrap_or(&self.default_var_pattern);
                pattern.push_str(&format!("(?P<{name}>{var_pattern})"));
                var_names.push(Arc::from(name));
            } else {
                pattern.push_str(&regex::escape(segment));
            }
        }
        pattern.push('$');
        let regex = Regex::new(&pattern).map_err(|source| RouteError::InvalidPattern {
            target: target.to_string(),
            source,
        })?;
        Ok(CompiledMatcher { regex, var_names })
    }
}

/// Extract the variable name from a template segment, or `None` when the
/// segment is not exactly one `{name}` expression.
fn parse_expression(segment: &str) -> Option<&str> {
    let inner = segment.strip_prefix('{')?.strip_suffix('}')?;
    if inner.contains(|c| c == '{' || c == '}') {
        // Two expressions in one segment, e.g. `{a}{b}`.
        return None;
    }
    VAR_NAME_RE.is_match(inner).then_some(inner)
}

/// Compile a delimited pattern target, anchoring the source at both ends.
/// Named capture groups become the route's variables.
fn compile_pattern(target: &str) -> Result<CompiledMatcher, RouteError> {
    let source = &target[1..target.len() - 1];
    let anchored = format!("^(?:{source})$");
    let regex = Regex::new(&anchored).map_err(|source| RouteError::InvalidPattern {
        target: target.to_string(),
        source,
    })?;
    let var_names = regex
        .capture_names()
        .flatten()
        .map(Arc::from)
        .collect();
    Ok(CompiledMatcher { regex, var_names })
}
