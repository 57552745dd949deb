//! Inbound adapters translating user input into dashboard commands.

pub mod cli;
