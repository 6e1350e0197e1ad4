//! CLI library components for the oBDS converter.

#![allow(missing_docs)]

pub mod logging;
pub mod pipeline;
