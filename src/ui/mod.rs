//! Terminal and NDJSON presentation for the `cutover` binary

pub mod blocks;
pub mod components;
pub mod context;
pub mod error;
pub mod json;
pub mod primitives;
pub mod sink;
pub mod terminal;
pub mod theme;
pub mod views;
