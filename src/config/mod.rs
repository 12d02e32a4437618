//! JSON configuration for the command-line tooling.

pub mod demo;
