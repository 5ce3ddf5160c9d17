//! CareConnect shell: configuration, tracing, dependency wiring, console
//! adapters and the `careconnect` command line.

pub mod adapters;
pub mod bootstrap;
pub mod cli;
