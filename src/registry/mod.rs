//! Build configuration registry
//!
//! Holds the named build constants (SDK levels, module versions, dependency
//! and plugin coordinates, publish group) consumed by the build orchestrator.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Preset    │────▶│   Catalog   │────▶│  Registry   │
//! │ (built-in)  │     │   (TOML)    │     │ (validated) │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                                                │
//!                                                ▼
//!                                         ┌─────────────┐
//!                                         │    Diff     │
//!                                         │ (revisions) │
//!                                         └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`catalog`]: Immutable `Registry` and its resolve operations
//! - [`coordinate`]: Dependency and plugin coordinates
//! - [`diff`]: Comparison of two registry revisions
//! - [`error`]: Error types for loading and lookups
//! - [`module`]: Publishable modules and their file locations
//! - [`preset`]: Built-in catalog revisions
//! - [`publish`]: Publish identity
//! - [`sdk`]: SDK level bounds
//! - [`semver`]: Version string comparison
//! - [`version`]: Module version triple

pub mod catalog;
pub mod coordinate;
pub mod diff;
pub mod error;
pub mod module;
pub mod preset;
pub mod publish;
pub mod sdk;
pub mod semver;
pub mod version;

pub use catalog::Registry;
pub use module::Module;
pub use preset::Preset;
