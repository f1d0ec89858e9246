pub mod footer;
pub mod header;
pub mod pagination;
pub mod search_box;
pub mod shared;
