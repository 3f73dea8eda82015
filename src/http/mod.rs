//! HTTP protocol implementation.
//!
//! A restricted HTTP/1.1 dialect for serving static files: GET only,
//! HTTP/1.1 only, one request per read, persistent connections closed after
//! an idle timeout.
//!
//! # Architecture
//!
//! - **`connection`**: The per-connection request-response state machine
//! - **`parser`**: Parses the request line and headers out of a byte buffer
//! - **`request`**: HTTP request representation and target normalization
//! - **`session`**: The `cookie_counter` visit counter
//! - **`response`**: Status codes, success and error responses
//! - **`writer`**: Serializes and writes HTTP responses to the client
//! - **`mime`**: Content type lookup by file extension
//! - **`webroot`**: Maps request paths onto files under the webroot
//!
//! # Connection State Machine
//!
//! Each client connection goes through a state machine:
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Wait for data (idle timeout) and parse
//!        └──────┬──────┘
//!               │ Request received
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Validate, build 200 or error
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response to client
//!        └──────┬───────────┘
//!               │ Response sent
//!               ├─ Keep-Alive → Reading (same connection)
//!               └─ Close (408 sent) → Closed
//! ```
//!
//! # Example
//!
//! ```ignore
//! use sstt::config::Config;
//! use sstt::http::connection::Connection;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let cfg = Config::load()?;
//!     let listener = TcpListener::bind("127.0.0.1:8080").await?;
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let cfg = cfg.clone();
//!         tokio::spawn(async move {
//!             let mut conn = Connection::new(socket, &cfg);
//!             if let Err(e) = conn.run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod request;
pub mod response;
pub mod parser;
pub mod connection;
pub mod writer;
pub mod mime;
pub mod session;
pub mod webroot;
