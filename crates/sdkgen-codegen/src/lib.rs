//! Client SDK generation engine.
//!
//! A [`LanguageBackend`] turns the API model into client and type sources for
//! one target language and describes the rest of the generated project.
//! Backends are looked up by name through a [`BackendRegistry`].

pub mod config;
pub mod error;
pub mod generator;
pub mod mapper;
pub mod registry;
pub mod template;
pub mod traits;

// Language backends
pub mod backends;

// Re-exports
pub use config::BackendConfig;
pub use error::CodegenError;
pub use generator::{render_project, safe_file_name, GeneratedProject, RenderOutcome};
pub use mapper::{map_type, to_lower_camel, to_snake_case, to_upper_camel};
pub use registry::BackendRegistry;
pub use traits::{AdditionalFile, FileRole, LanguageBackend, OutputStructure};
