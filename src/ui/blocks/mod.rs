pub mod check_item;
pub mod error;
pub mod header;
pub mod summary;
