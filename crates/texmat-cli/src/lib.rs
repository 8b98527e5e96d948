//! Texmat CLI library.
//!
//! This crate provides the core functionality for the `texmat` binary:
//! parameter and texture loading plus the command implementations.

pub mod commands;
pub mod input;
