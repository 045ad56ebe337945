//! CLI library components for the VRDC entity catalog.

pub mod logging;
pub mod output;
