//! State management module
//!
//! This module handles all application state, including:
//! - The entry collection and visible error slot (gallery.rs)
//! - Buffering of drag-and-drop gestures (drop_batch.rs)
//! - Shared data structures (data.rs)

pub mod data;
pub mod drop_batch;
pub mod gallery;
