//! Language-agnostic model of an API surface.
//!
//! Backends in `sdkgen-codegen` read these types; nothing in the generator
//! mutates them, so one model can be rendered by several backends at once.

pub mod loader;
pub mod report;
pub mod schema_def;
pub mod types;
pub mod validate;

pub use loader::{load_api, load_types, LoadError};
pub use report::{ErrorEntry, Severity, ValidationReport};
pub use types::{
    ApiDescriptor, ApiVersion, EnumDescriptor, EnumScalar, EnumValue, FieldDescriptor,
    MethodDescriptor, ParamDescriptor, TypeDescriptor, TypesDescriptor,
};
