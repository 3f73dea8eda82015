use std::collections::HashMap;

/// Page served when the client asks for the bare root `/`.
pub const INDEX_PATH: &str = "/index.html";

/// HTTP request methods.
///
/// Only GET is served. Every other token is still parsed so that the
/// connection can answer 405 Method Not Allowed instead of 400.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    /// GET - Retrieve a resource
    GET,
    /// Any other method token, kept verbatim
    Extension(String),
}

impl Method {
    /// Parses an HTTP method token.
    ///
    /// Matching is case-sensitive; anything but `GET` becomes `Method::Extension`.
    ///
    /// # Example
    ///
    /// ```
    /// # use sstt::http::request::Method;
    /// assert_eq!(Method::from_token("GET"), Method::GET);
    /// assert_eq!(Method::from_token("get"), Method::Extension("get".to_string()));
    /// ```
    pub fn from_token(s: &str) -> Self {
        match s {
            "GET" => Method::GET,
            other => Method::Extension(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Method::GET => "GET",
            Method::Extension(token) => token,
        }
    }
}

/// A parsed HTTP request.
///
/// Built once per read cycle by the parser and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Request {
    /// The HTTP method (GET, POST, etc.)
    pub method: Method,
    /// Normalized request path: query stripped, `/` rewritten to `/index.html`
    pub path: String,
    /// Protocol version without the `HTTP/` prefix (e.g. "1.1")
    pub version: String,
    /// Request headers, names kept exactly as received
    pub headers: HashMap<String, String>,
}

impl Request {
    /// Retrieves a header value by its exact (case-sensitive) name.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .get(key)
            .map(|v| v.as_str())
    }

    pub fn host(&self) -> Option<&str> {
        self.header("Host")
    }

    pub fn cookie(&self) -> Option<&str> {
        self.header("Cookie")
    }

    pub fn is_http11(&self) -> bool {
        self.version == "1.1"
    }
}

/// Turns a raw request target into the path used for file lookup.
///
/// A target of exactly `/` becomes `/index.html`; otherwise everything from
/// the first `?` is discarded. The rewrite only looks at the raw target, so
/// `/?x=1` stays `/`.
///
/// ```
/// # use sstt::http::request::normalize_target;
/// assert_eq!(normalize_target("/"), "/index.html");
/// assert_eq!(normalize_target("/?x=1"), "/");
/// assert_eq!(normalize_target("/a.css?v=3"), "/a.css");
/// ```
pub fn normalize_target(target: &str) -> String {
    if target == "/" {
        return INDEX_PATH.to_string();
    }

    match target.split_once('?') {
        Some((path, _query)) => path.to_string(),
        None => target.to_string(),
    }
}
