use std::time::SystemTime;

use crate::config::Config;
use crate::http::session::VisitCounter;

/// HTTP status codes the server can answer with.
///
/// - `Ok` (200): File served
/// - `BadRequest` (400): Malformed request, missing Host or bad cookie
/// - `Forbidden` (403): Visit limit reached
/// - `NotFound` (404): No such file under the webroot
/// - `MethodNotAllowed` (405): Anything but GET
/// - `RequestTimeout` (408): Connection idle for too long
/// - `HttpVersionNotSupported` (505): Anything but HTTP/1.1
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 400 Bad Request
    BadRequest,
    /// 403 Forbidden
    Forbidden,
    /// 404 Not Found
    NotFound,
    /// 405 Method Not Allowed
    MethodNotAllowed,
    /// 408 Timeout Exceeded
    RequestTimeout,
    /// 505 Version Not Supported
    HttpVersionNotSupported,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use sstt::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::RequestTimeout.as_u16(), 408);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::BadRequest => 400,
            StatusCode::Forbidden => 403,
            StatusCode::NotFound => 404,
            StatusCode::MethodNotAllowed => 405,
            StatusCode::RequestTimeout => 408,
            StatusCode::HttpVersionNotSupported => 505,
        }
    }

    /// Returns the reason phrase sent in the status line.
    ///
    /// # Example
    ///
    /// ```
    /// # use sstt::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    /// assert_eq!(StatusCode::RequestTimeout.reason_phrase(), "Timeout Exceeded");
    /// ```
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::Forbidden => "Forbidden",
            StatusCode::NotFound => "Not Found",
            StatusCode::MethodNotAllowed => "Method Not Allowed",
            StatusCode::RequestTimeout => "Timeout Exceeded",
            StatusCode::HttpVersionNotSupported => "Version Not Supported",
        }
    }
}

/// Server-wide values stamped on every response.
#[derive(Debug, Clone)]
pub struct ResponseContext {
    /// Value of the `Server` header
    pub server_name: String,
    /// Seconds advertised in `Keep-Alive: timeout=<N>`
    pub keep_alive_timeout: u64,
}

impl ResponseContext {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            server_name: cfg.server.server_name.clone(),
            keep_alive_timeout: cfg.server.keep_alive_timeout,
        }
    }
}

/// Represents a complete HTTP response ready to be sent to a client.
///
/// Headers keep the order they were added in, which is the order they are
/// written on the wire.
#[derive(Debug)]
pub struct Response {
    /// The HTTP status code
    pub status: StatusCode,
    /// HTTP headers as ordered name/value pairs
    pub headers: Vec<(String, String)>,
    /// Response body as bytes
    pub body: Vec<u8>,
}

/// Builder for constructing HTTP responses in a fluent style.
///
/// # Example
///
/// ```ignore
/// let response = ResponseBuilder::new(StatusCode::Ok)
///     .header("Content-Type", "text/html")
///     .body(b"<html></html>".to_vec())
///     .build();
/// ```
pub struct ResponseBuilder {
    status: StatusCode,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl ResponseBuilder {
    /// Creates a new response builder with the specified status code.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Adds a header, or replaces the value of an existing one in place.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        match self.headers.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.headers.push((key, value)),
        }
        self
    }

    /// Sets the response body.
    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    /// Builds the final Response.
    ///
    /// `Content-Length` is always set to the exact body size, appended
    /// last if it was not declared earlier.
    pub fn build(self) -> Response {
        let length = self.body.len().to_string();
        let builder = self.header("Content-Length", length);

        Response {
            status: builder.status,
            headers: builder.headers,
            body: builder.body,
        }
    }
}

impl Response {
    /// 200 response carrying a file's bytes.
    ///
    /// Header order: Date, Server, Set-Cookie, Content-Type,
    /// Content-Length, Connection, Keep-Alive.
    pub fn file(
        ctx: &ResponseContext,
        content_type: &str,
        visits: VisitCounter,
        body: Vec<u8>,
    ) -> Self {
        ResponseBuilder::new(StatusCode::Ok)
            .header("Date", http_date())
            .header("Server", ctx.server_name.as_str())
            .header("Set-Cookie", visits.set_cookie_value())
            .header("Content-Type", content_type)
            .header("Content-Length", body.len().to_string())
            .header("Connection", "Keep-Alive")
            .header("Keep-Alive", format!("timeout={}", ctx.keep_alive_timeout))
            .body(body)
            .build()
    }

    /// Error response with a small HTML page naming the status.
    ///
    /// A 408 announces `Connection: Close`; every other error keeps the
    /// connection alive.
    pub fn error(ctx: &ResponseContext, status: StatusCode) -> Self {
        let body = error_page(&ctx.server_name, status).into_bytes();

        let builder = ResponseBuilder::new(status)
            .header("Date", http_date())
            .header("Server", ctx.server_name.as_str())
            .header("Content-Type", "text/html")
            .header("Content-Length", body.len().to_string());

        let builder = if status == StatusCode::RequestTimeout {
            builder.header("Connection", "Close")
        } else {
            builder
                .header("Connection", "Keep-Alive")
                .header("Keep-Alive", format!("timeout={}", ctx.keep_alive_timeout))
        };

        builder.body(body).build()
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Whether the server keeps reading from the connection after this one.
    pub fn keep_alive(&self) -> bool {
        self.header("Connection") != Some("Close")
    }
}

pub fn error_page(server_name: &str, status: StatusCode) -> String {
    format!(
        "<html>\n<head>\n<title>{}</title>\n</head>\n<body bgcolor=\"lightgray\">\n\
         <h1>{} {}</h1>\n<a href=\"/index.html\">Back to the main page</a>\n</body>\n</html>\n",
        server_name,
        status.as_u16(),
        status.reason_phrase()
    )
}

/// Current time in RFC 1123 format, e.g. `Sun, 06 Nov 1994 08:49:37 GMT`.
fn http_date() -> String {
    httpdate::fmt_http_date(SystemTime::now())
}
