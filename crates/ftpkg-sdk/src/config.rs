//! Generator configuration: where the package schema and artifact templates
//! come from.
//!
//! Resolved once by the caller and handed to [`Generator::new`](crate::Generator::new).
//! Both default to the assets compiled into this crate.

use std::path::PathBuf;

/// Source of the package JSON Schema.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SchemaSource {
    /// `assets/schema/package.schema.json`, compiled in.
    #[default]
    Bundled,
    /// A schema file on disk.
    File(PathBuf),
}

/// Source of the `refinement` and `glue_machine` templates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TemplateSource {
    /// `assets/templates/*.tera`, compiled in.
    #[default]
    Bundled,
    /// A directory containing `refinement.tera` and `glue_machine.tera`.
    Dir(PathBuf),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub schema: SchemaSource,
    pub templates: TemplateSource,
}

impl GeneratorConfig {
    /// Build a config from optional overrides; `None` keeps the bundled asset.
    pub fn from_overrides(schema_path: Option<PathBuf>, template_dir: Option<PathBuf>) -> Self {
        Self {
            schema: schema_path.map_or(SchemaSource::Bundled, SchemaSource::File),
            templates: template_dir.map_or(TemplateSource::Bundled, TemplateSource::Dir),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_bundled() {
        let config = GeneratorConfig::default();
        assert_eq!(config.schema, SchemaSource::Bundled);
        assert_eq!(config.templates, TemplateSource::Bundled);
    }

    #[test]
    fn test_from_overrides() {
        let config = GeneratorConfig::from_overrides(Some(PathBuf::from("s.json")), None);
        assert_eq!(config.schema, SchemaSource::File(PathBuf::from("s.json")));
        assert_eq!(config.templates, TemplateSource::Bundled);

        let config = GeneratorConfig::from_overrides(None, Some(PathBuf::from("tpl")));
        assert_eq!(config.templates, TemplateSource::Dir(PathBuf::from("tpl")));
    }
}
