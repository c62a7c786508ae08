//! forgekit pipeline library
//!
//! Each module plans the external-tool invocations for one pipeline
//! step (project generation, schema compilation, data regeneration,
//! asset conversion, cubemap generation). Planning is pure path and
//! table work; execution is a separate, sequential step in [`invoke`].

pub mod assets;
pub mod cubemaps;
pub mod data;
pub mod invoke;
pub mod manifest;
pub mod projects;
mod scan;
pub mod schemas;
pub mod toolchain;

pub use invoke::{Plan, RunSummary, ToolInvocation};
pub use manifest::PipelineManifest;
pub use toolchain::Toolchain;
