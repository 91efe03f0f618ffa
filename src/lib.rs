//! raster-dispatch library
//!
//! Extraction, planning and dispatch of raster tool calls from free text.

pub mod cli;
pub mod client;
pub mod config;
pub mod domain;
pub mod extract;
pub mod plan;
pub mod render;

pub use client::{CallError, RemoteClient, Reply};
pub use domain::{BoundingBox, Intent, Operation, PlannedCall, Point};
pub use extract::extract;
pub use plan::plan;
