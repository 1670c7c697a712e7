//! Process-level plumbing shared by the command line entry points: configuration
//! from flags, environment and `.env`, and console logging.

pub mod config;
pub mod logging;
