//! View helpers for the converter window

pub mod card;
