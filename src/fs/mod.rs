//! Filesystem helpers for packaging.
//!
//! Manifest writes go through [`atomic_write`] so a crashed build never leaves
//! a truncated `Info.plist` behind. Deployment moves whole build folders with
//! [`move_path`], which falls back to copy + delete across devices.

mod atomic;
mod move_path;

pub use atomic::atomic_write;
pub use move_path::{copy_tree, move_path};
