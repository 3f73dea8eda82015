#![allow(dead_code)]

use std::path::Path;

use sstt::config::Config;
use tempfile::TempDir;
use tokio::io::{AsyncRead, AsyncReadExt};

pub const INDEX_HTML: &str = "<html><body>Welcome</body></html>\n";
pub const STYLE_CSS: &str = "body { color: black; }\n";
pub const IMAGE_PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0xff, 0x00];

/// A webroot with an index page, a stylesheet, a binary image and a file
/// with an unsupported extension.
pub fn webroot() -> TempDir {
    let dir = tempfile::tempdir().expect("create temp webroot");
    write(dir.path(), "index.html", INDEX_HTML.as_bytes());
    write(dir.path(), "style.css", STYLE_CSS.as_bytes());
    write(dir.path(), "image.png", IMAGE_PNG);
    write(dir.path(), "notes.txt", b"plain text");
    std::fs::create_dir(dir.path().join("docs")).expect("create docs dir");
    dir
}

fn write(root: &Path, name: &str, contents: &[u8]) {
    std::fs::write(root.join(name), contents).expect("write webroot file");
}

pub fn config_for(root: &Path) -> Config {
    let mut cfg = Config::default();
    cfg.static_files.webroot = root.to_path_buf();
    cfg.server.server_name = "test-server".to_string();
    cfg
}

/// A response as seen by the client.
#[derive(Debug)]
pub struct RawResponse {
    pub status_line: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn status(&self) -> u16 {
        self.status_line
            .split(' ')
            .nth(1)
            .and_then(|code| code.parse().ok())
            .expect("status code in status line")
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn header_names(&self) -> Vec<&str> {
        self.headers.iter().map(|(k, _)| k.as_str()).collect()
    }
}

/// Reads exactly one response, using Content-Length to find its end.
///
/// Returns `None` if the stream ends before any byte arrives.
pub async fn read_response<R>(stream: &mut R) -> Option<RawResponse>
where
    R: AsyncRead + Unpin,
{
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let head_end = loop {
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos;
        }
        let n = stream.read(&mut chunk).await.expect("read response head");
        if n == 0 {
            assert!(buf.is_empty(), "stream ended inside a response head");
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
    };

    let head = String::from_utf8(buf[..head_end].to_vec()).expect("utf-8 head");
    let mut lines = head.split("\r\n");
    let status_line = lines.next().expect("status line").to_string();
    let headers: Vec<(String, String)> = lines
        .map(|line| {
            let (k, v) = line.split_once(": ").expect("header separator");
            (k.to_string(), v.to_string())
        })
        .collect();

    let length: usize = headers
        .iter()
        .find(|(k, _)| k == "Content-Length")
        .map(|(_, v)| v.parse().expect("numeric Content-Length"))
        .expect("Content-Length header");

    let mut body = buf[head_end + 4..].to_vec();
    while body.len() < length {
        let n = stream.read(&mut chunk).await.expect("read response body");
        assert!(n > 0, "stream ended inside a response body");
        body.extend_from_slice(&chunk[..n]);
    }
    assert_eq!(body.len(), length, "body longer than Content-Length");

    Some(RawResponse {
        status_line,
        headers,
        body,
    })
}

pub fn get(path: &str) -> String {
    format!("GET {} HTTP/1.1\r\nHost: localhost\r\n\r\n", path)
}

pub fn get_with_cookie(path: &str, counter: u32) -> String {
    format!(
        "GET {} HTTP/1.1\r\nHost: localhost\r\nCookie: cookie_counter={}\r\n\r\n",
        path, counter
    )
}
