//! Test organization for the chess rules engine
//!
//! This module organizes tests into logical groupings:
//! - `common`: Shared FEN fixtures and helpers
//! - `integration`: Whole-engine behavior across components

pub mod common;
