//! Query matching for list search boxes.

pub mod fuzzy;
