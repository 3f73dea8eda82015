use crate::http::request::{Method, Request, normalize_target};
use std::collections::HashMap;

const CRLF: &[u8] = b"\r\n";
const HEADERS_END: &[u8] = b"\r\n\r\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The first line is not `<METHOD> <TARGET> HTTP/<VERSION>`.
    #[error("malformed request line")]
    MalformedRequestLine,
    /// The header block is not terminated by an empty line (yet).
    #[error("incomplete request message")]
    IncompleteMessage,
}

/// Parses one request out of `buf`.
///
/// On success returns the request and the number of bytes it spans
/// (request line, headers and the terminating blank line). Request bodies
/// are not supported, so nothing after the blank line is consumed.
pub fn parse_http_request(buf: &[u8]) -> Result<(Request, usize), ParseError> {
    let line_end = find(buf, CRLF).ok_or(ParseError::IncompleteMessage)?;
    let line = std::str::from_utf8(&buf[..line_end])
        .map_err(|_| ParseError::MalformedRequestLine)?;

    let (method, target, version) = parse_request_line(line)?;

    let headers_end = find(buf, HEADERS_END).ok_or(ParseError::IncompleteMessage)?;
    let headers = if headers_end == line_end {
        HashMap::new()
    } else {
        parse_headers(&buf[line_end + CRLF.len()..headers_end])
    };

    let request = Request {
        method,
        path: normalize_target(target),
        version: version.to_string(),
        headers,
    };

    Ok((request, headers_end + HEADERS_END.len()))
}

/// Splits `<METHOD> <TARGET> HTTP/<VERSION>` into its three parts.
fn parse_request_line(line: &str) -> Result<(Method, &str, &str), ParseError> {
    let mut tokens = line.split(' ');

    let method = tokens.next().ok_or(ParseError::MalformedRequestLine)?;
    let target = tokens.next().ok_or(ParseError::MalformedRequestLine)?;
    let protocol = tokens.next().ok_or(ParseError::MalformedRequestLine)?;

    if tokens.next().is_some() {
        return Err(ParseError::MalformedRequestLine);
    }

    if method.is_empty() || !method.bytes().all(is_token_byte) {
        return Err(ParseError::MalformedRequestLine);
    }

    if !target.starts_with('/') || target.bytes().any(|b| b.is_ascii_control()) {
        return Err(ParseError::MalformedRequestLine);
    }

    let version = protocol
        .strip_prefix("HTTP/")
        .filter(|v| !v.is_empty() && !v.bytes().any(|b| b.is_ascii_whitespace()))
        .ok_or(ParseError::MalformedRequestLine)?;

    Ok((Method::from_token(method), target, version))
}

/// Collects `<Name>:<value>` lines. Lines without a valid name are skipped.
fn parse_headers(block: &[u8]) -> HashMap<String, String> {
    let mut headers = HashMap::new();

    for raw in split_lines(block) {
        let Ok(line) = std::str::from_utf8(raw) else {
            continue;
        };

        let Some((name, value)) = line.split_once(':') else {
            continue;
        };

        if name.is_empty() || !name.bytes().all(is_header_name_byte) {
            continue;
        }

        headers.insert(
            name.to_string(),
            value.trim_start_matches([' ', '\t']).trim_end().to_string(),
        );
    }

    headers
}

fn split_lines(block: &[u8]) -> impl Iterator<Item = &[u8]> {
    let mut rest = Some(block);
    std::iter::from_fn(move || {
        let current = rest?;
        match find(current, CRLF) {
            Some(pos) => {
                rest = Some(&current[pos + CRLF.len()..]);
                Some(&current[..pos])
            }
            None => {
                rest = None;
                Some(current)
            }
        }
    })
}

fn is_token_byte(b: u8) -> bool {
    // RFC 9110 tchar: visible ASCII minus the delimiters
    b.is_ascii_graphic() && !b"()<>@,;:\\\"/[]?={}".contains(&b)
}

fn is_header_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-'
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|w| w == needle)
}
