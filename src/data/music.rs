//! Contains types and functions for working with musical notes.

pub mod notes;
