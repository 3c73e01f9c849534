//! Reading and writing template files

use crate::format::TemplateFormat;
use envgen_core::{Error, Result, Template};
use envgen_utils::atomic_file::write_atomic_string;
use std::path::{Path, PathBuf};

/// A template together with where it lives and how it is encoded
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateFile {
    pub path: PathBuf,
    pub format: TemplateFormat,
    pub template: Template,
}

impl TemplateFile {
    /// Wrap an in-memory template destined for `path`
    ///
    /// Fails with a format error when the extension is not supported.
    pub fn new(path: impl Into<PathBuf>, template: Template) -> Result<Self> {
        let path = path.into();
        let format = TemplateFormat::from_path(&path)?;
        Ok(Self {
            path,
            format,
            template,
        })
    }

    /// Read and parse a template file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        // Checked before reading so an unsupported file is rejected even if missing
        let format = TemplateFormat::from_path(path)?;

        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::file_system(path, "read template", e))?;
        let template = format.parse(&text, path)?;

        tracing::debug!(
            path = %path.display(),
            format = %format,
            variables = template.len(),
            "loaded template"
        );

        Ok(Self {
            path: path.to_path_buf(),
            format,
            template,
        })
    }

    /// Serialize and write the template back to its path
    pub fn save(&self) -> Result<()> {
        let text = self.format.serialize(&self.template)?;
        write_atomic_string(&self.path, &text)?;

        tracing::debug!(
            path = %self.path.display(),
            format = %self.format,
            variables = self.template.len(),
            "saved template"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use envgen_core::VariableConfig;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_save_then_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("env.template.yaml");
        let template: Template = [("A", VariableConfig::literal("1").required(true))]
            .into_iter()
            .collect();

        TemplateFile::new(&path, template.clone()).unwrap().save().unwrap();
        let loaded = TemplateFile::load(&path).unwrap();

        assert_eq!(loaded.format, TemplateFormat::Yaml);
        assert_eq!(loaded.template, template);
    }

    #[test]
    fn test_load_rejects_unsupported_extension_before_reading() {
        let err = TemplateFile::load("does-not-exist.ini").unwrap_err();
        assert!(matches!(err, Error::Format { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = TemplateFile::load(temp_dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, Error::FileSystem { .. }));
    }

    #[test]
    fn test_save_overwrites_in_place() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("template.json");
        fs::write(&path, r#"{"A": {"value": "old"}}"#).unwrap();

        let mut file = TemplateFile::load(&path).unwrap();
        file.template["A"].default = Some("snapshot".to_string());
        file.save().unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"default\": \"snapshot\""));
        assert!(text.ends_with('\n'));
    }
}
