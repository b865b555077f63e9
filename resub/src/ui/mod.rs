// resub/src/ui/mod.rs
//! Terminal output for the resub CLI.

pub mod report;
