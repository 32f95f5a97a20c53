//! Domain layer for the xjoin search core
//!
//! Typed configuration settings and the tag record model. Nothing here
//! touches the environment or the filesystem.

pub mod models;
