use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite};
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::http::mime;
use crate::http::parser::{ParseError, parse_http_request};
use crate::http::request::{Method, Request};
use crate::http::response::{Response, ResponseContext, StatusCode};
use crate::http::session::VisitCounter;
use crate::http::webroot::Webroot;
use crate::http::writer::ResponseWriter;

/// Bytes requested from the socket per read.
pub const BUFSIZE: usize = 8192;

/// How long to wait for the rest of a request once its first bytes arrived.
pub const READ_CONTINUATION: Duration = Duration::from_millis(500);

/// A request head larger than this without a terminating blank line is rejected.
pub const MAX_HEADER_BYTES: usize = 64 * 1024;

pub struct Connection<S> {
    stream: S,
    buffer: BytesMut,
    state: ConnectionState,
    webroot: Webroot,
    ctx: ResponseContext,
    idle_timeout: Duration,
}

pub enum ConnectionState {
    Reading,
    Processing(Request),
    Writing(ResponseWriter, bool), // bool = keep_alive?
    Closed,
}

/// Result of one WAIT_DATA/PARSE cycle.
enum ReadOutcome {
    Request(Request),
    Malformed(ParseError),
    TimedOut,
    PeerClosed,
}

/// Serves one accepted connection until it times out or the peer goes away.
pub async fn serve_connection<S>(stream: S, cfg: &Config) -> anyhow::Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    Connection::new(stream, cfg).run().await
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, cfg: &Config) -> Self {
        Self {
            stream,
            buffer: BytesMut::with_capacity(BUFSIZE),
            state: ConnectionState::Reading,
            webroot: Webroot::new(cfg.static_files.webroot.clone()),
            ctx: ResponseContext::from_config(cfg),
            idle_timeout: cfg.keep_alive_timeout(),
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::Reading => {
                    self.state = match self.read_request().await? {
                        ReadOutcome::Request(req) => ConnectionState::Processing(req),
                        ReadOutcome::Malformed(e) => {
                            warn!(error = %e, "Rejecting unparseable request");
                            self.respond(Response::error(&self.ctx, StatusCode::BadRequest))
                        }
                        ReadOutcome::TimedOut => {
                            info!(
                                timeout_secs = self.idle_timeout.as_secs(),
                                "Connection idle, closing"
                            );
                            self.respond(Response::error(&self.ctx, StatusCode::RequestTimeout))
                        }
                        ReadOutcome::PeerClosed => {
                            debug!("Peer closed connection");
                            ConnectionState::Closed
                        }
                    };
                }

                ConnectionState::Processing(req) => {
                    let response = self.handle_request(&req).await?;
                    self.state = self.respond(response);
                }

                ConnectionState::Writing(mut writer, keep_alive) => {
                    writer
                        .write_to_stream(&mut self.stream)
                        .await
                        .context("sending response")?;

                    if keep_alive {
                        self.state = ConnectionState::Reading; // go back for next request
                    } else {
                        self.state = ConnectionState::Closed;
                    }
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    fn respond(&self, response: Response) -> ConnectionState {
        debug!(
            status = response.status.as_u16(),
            content_length = response.body.len(),
            "Sending response"
        );
        let keep_alive = response.keep_alive();
        ConnectionState::Writing(ResponseWriter::new(&response), keep_alive)
    }

    /// Waits for the next request, bounded by the idle timeout.
    ///
    /// Once data has arrived, further reads are only waited for while the
    /// request head is still incomplete. Bytes past the first request are
    /// dropped.
    async fn read_request(&mut self) -> anyhow::Result<ReadOutcome> {
        self.buffer.clear();

        match timeout(self.idle_timeout, self.fill_buffer()).await {
            Err(_elapsed) => return Ok(ReadOutcome::TimedOut),
            Ok(n) => {
                if n.context("reading request")? == 0 {
                    return Ok(ReadOutcome::PeerClosed);
                }
            }
        }

        loop {
            match parse_http_request(&self.buffer) {
                Ok((request, _consumed)) => return Ok(ReadOutcome::Request(request)),
                Err(ParseError::IncompleteMessage) if self.buffer.len() < MAX_HEADER_BYTES => {}
                Err(e) => return Ok(ReadOutcome::Malformed(e)),
            }

            // Stalled or half-closed mid-request; EOF shows up on the next cycle.
            match timeout(READ_CONTINUATION, self.fill_buffer()).await {
                Err(_elapsed) => {
                    return Ok(ReadOutcome::Malformed(ParseError::IncompleteMessage));
                }
                Ok(n) => {
                    if n.context("reading request")? == 0 {
                        return Ok(ReadOutcome::Malformed(ParseError::IncompleteMessage));
                    }
                }
            }
        }
    }

    async fn fill_buffer(&mut self) -> std::io::Result<usize> {
        self.buffer.reserve(BUFSIZE);
        self.stream.read_buf(&mut self.buffer).await
    }

    async fn handle_request(&self, req: &Request) -> anyhow::Result<Response> {
        info!(
            method = req.method.as_str(),
            path = %req.path,
            version = %req.version,
            "Request received"
        );
        for (name, value) in &req.headers {
            debug!(header = %name, value = %value, "Request header");
        }

        let (path, visits) = match self.validate(req).await {
            Ok(accepted) => accepted,
            Err(status) => {
                warn!(
                    status = status.as_u16(),
                    method = req.method.as_str(),
                    path = %req.path,
                    "Request rejected"
                );
                return Ok(Response::error(&self.ctx, status));
            }
        };

        let content_type = mime::content_type_for(&path)
            .with_context(|| format!("unsupported file type: {}", path.display()))?;

        let body = match Webroot::read(&path).await {
            Ok(body) => body,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "File vanished before it could be read");
                return Ok(Response::error(&self.ctx, StatusCode::NotFound));
            }
        };

        info!(
            path = %req.path,
            visits = visits.get(),
            bytes = body.len(),
            "Serving file"
        );
        Ok(Response::file(&self.ctx, content_type, visits, body))
    }

    /// Checks a request in order: method, version, file, Host, cookie, visit limit.
    async fn validate(&self, req: &Request) -> Result<(PathBuf, VisitCounter), StatusCode> {
        if req.method != Method::GET {
            return Err(StatusCode::MethodNotAllowed);
        }

        if !req.is_http11() {
            return Err(StatusCode::HttpVersionNotSupported);
        }

        let path = self
            .webroot
            .resolve(&req.path)
            .ok_or(StatusCode::NotFound)?;
        if !Webroot::is_file(&path).await {
            return Err(StatusCode::NotFound);
        }

        if req.host().is_none() {
            return Err(StatusCode::BadRequest);
        }

        let visits = VisitCounter::from_cookie_header(req.cookie())
            .map_err(|_| StatusCode::BadRequest)?;

        if visits.is_exhausted() {
            return Err(StatusCode::Forbidden);
        }

        Ok((path, visits))
    }
}
