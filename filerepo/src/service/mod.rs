pub mod files;
pub mod firmware;
