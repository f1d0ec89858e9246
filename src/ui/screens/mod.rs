//! Route screens.

pub mod collections;
pub mod post;
