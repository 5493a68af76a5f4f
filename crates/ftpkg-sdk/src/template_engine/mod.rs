//! Tera-based rendering of the two B artifacts.
//!
//! Templates are looked up by identifier: `refinement` resolves to
//! `refinement.tera` and `glue_machine` to `glue_machine.tera`, either from the
//! bundled assets or from a caller-supplied directory.

mod engine;
pub mod filters;
mod loader;

pub use engine::{ArtifactTemplate, EngineError, TemplateEngine};
pub use loader::LoaderError;
