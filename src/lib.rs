//! sstt - Simple static file server
//!
//! A small HTTP/1.1 server that serves files from a webroot over persistent
//! connections and counts each client's visits in a cookie.

pub mod config;
pub mod http;
pub mod server;
