//! Plain-text renderers for preview panes.

pub mod thread;
