//! folio library crate.

pub mod app;
pub mod config;
pub mod domain;
pub mod fixtures;
#[cfg(feature = "harness")]
pub mod harness;
pub mod logging;
pub mod paging;
pub mod render;
pub mod search;
pub mod source;
pub mod thread;
pub mod ui;
