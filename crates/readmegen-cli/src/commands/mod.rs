//! Command implementations for the readmegen CLI.

pub mod generate;

pub use generate::execute as generate_execute;
