//! Helpers for the end-to-end scenarios in `tests/`.
pub mod helpers;
