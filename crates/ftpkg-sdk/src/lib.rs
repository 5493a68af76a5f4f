//! Translation core for FeverTokens package descriptions.
//!
//! Turns a declarative package document (exported functions and events,
//! storage layout, implementation bindings, footprints, dependencies) into the
//! symbol model behind two B-method artifacts: a refinement and a glue machine.
//!
//! # Modules
//!
//! - [`model`]: Typed package records and order-preserving collections
//! - [`package_parser`]: YAML document loading
//! - [`schema`]: Structural validation against the package JSON Schema
//! - [`type_mapper`]: Source type descriptor → B type symbol
//! - [`validation`]: Semantic consistency checks (bindings, selectors, footprints)
//! - [`context`]: Symbol and relation derivation for template rendering
//! - [`template_engine`]: Tera-based rendering of the `refinement` and `glue_machine` templates
//! - [`emitter`]: Load → validate → build → render → write pipeline
//! - [`config`]: Where the schema and templates come from

pub mod config;
pub mod context;
pub mod emitter;
pub mod model;
pub mod package_parser;
pub mod schema;
pub mod template_engine;
pub mod type_mapper;
pub mod validation;

pub use config::GeneratorConfig;
pub use context::{build_context, PackageContext};
pub use emitter::{Checker, EmitError, EmitReport, Generator};
pub use model::Package;
pub use type_mapper::{map_type, TypeSymbol};
pub use validation::{validate_package, ValidationError};
