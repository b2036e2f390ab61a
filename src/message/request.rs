use std::collections::HashMap;

use http::Method;
use serde_json::Value;
use tracing::debug;
use url::Url;

/// An incoming HTTP request as the routing core sees it.
///
/// The raw request target is kept verbatim; the path component is extracted
/// once at construction and is what the route table matches against. Named
/// attributes carry data attached during the pipeline run — most importantly
/// the path variables bound by the router before the matched handler runs.
///
/// The value is immutable: every `with_*` method consumes the request and
/// returns the augmented copy, so a stage downstream of a mutation sees the
/// replacement and nothing upstream is disturbed.
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    target: String,
    path: String,
    query_params: HashMap<String, String>,
    headers: HashMap<String, String>,
    body: Option<Value>,
    attributes: HashMap<String, Value>,
}

impl Request {
    /// Build a request from a method and a raw request target.
    ///
    /// Both origin-form (`/cats/42?fields=name`) and absolute-form
    /// (`http://host/cats/42`) targets are accepted; only the path and query
    /// components are retained.
    pub fn new(method: Method, target: impl Into<String>) -> Self {
        let target = target.into();
        let (path, query_params) = split_target(&target);
        debug!(method = %method, path = %path, "request constructed");
        Self {
            method,
            target,
            path,
            query_params,
            headers: HashMap::new(),
            body: None,
            attributes: HashMap::new(),
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The raw request target as registered at construction.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// The path component of the target. This is what routes match against.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query_params.get(name).map(String::as_str)
    }

    pub fn query_params(&self) -> &HashMap<String, String> {
        &self.query_params
    }

    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    /// A named attribute previously attached with [`Request::with_attribute`].
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    pub fn attributes(&self) -> &HashMap<String, Value> {
        &self.attributes
    }

    /// Returns a copy with the header set. Header names are stored lowercase.
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    /// Returns a copy carrying the given JSON body.
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Returns a copy with a named attribute attached, replacing any previous
    /// value under the same name.
    pub fn with_attribute(mut self, name: &str, value: Value) -> Self {
        self.attributes.insert(name.to_string(), value);
        self
    }
}

/// Split a raw request target into its path component and query parameters.
fn split_target(target: &str) -> (String, HashMap<String, String>) {
    if target.is_empty() {
        return ("/".to_string(), HashMap::new());
    }
    // Absolute-form targets carry a scheme; let the URL parser take those.
    if !target.starts_with('/') {
        if let Ok(url) = Url::parse(target) {
            let query = url
                .query_pairs()
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect();
            return (url.path().to_string(), query);
        }
    }
    let path = target
        .split(|c| c == '?' || c == '#')
        .next()
        .unwrap_or("/")
        .to_string();
    let query = match target.split_once('?') {
        Some((_, rest)) => {
            let query_str = rest.split('#').next().unwrap_or("");
            url::form_urlencoded::parse(query_str.as_bytes())
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect()
        }
        None => HashMap::new(),
    };
    (path, query)
}
