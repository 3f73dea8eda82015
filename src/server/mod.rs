//! Connection acceptance.

pub mod listener;
