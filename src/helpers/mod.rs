//! Helper functions shared by the loaders and templates

mod date;

pub use date::*;
