//! Library side of the `kgs-specimen` command line tool.

pub mod document;
pub mod logging;
pub mod summary;
