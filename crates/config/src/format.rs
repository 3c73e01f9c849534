//! Supported template document formats

use envgen_core::{Error, Result, Template};
use std::fmt;
use std::path::Path;

/// Document encoding of a template file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateFormat {
    /// Object mapping each variable name to its rule
    Json,
    /// Mapping document
    Yaml,
    /// One table per variable
    Toml,
}

impl TemplateFormat {
    /// Pick the format from a path's extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();

        match extension.to_ascii_lowercase().as_str() {
            "json" => Ok(TemplateFormat::Json),
            "yaml" | "yml" => Ok(TemplateFormat::Yaml),
            "toml" => Ok(TemplateFormat::Toml),
            _ => Err(Error::format(path, extension)),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TemplateFormat::Json => "JSON",
            TemplateFormat::Yaml => "YAML",
            TemplateFormat::Toml => "TOML",
        }
    }

    /// Parse template text; `path` is only used for error messages
    pub fn parse(self, text: &str, path: &Path) -> Result<Template> {
        let parsed: std::result::Result<Template, String> = match self {
            TemplateFormat::Json => serde_json::from_str(text).map_err(|e| e.to_string()),
            TemplateFormat::Yaml => {
                // An empty YAML document is an empty template
                if text.trim().is_empty() {
                    Ok(Template::new())
                } else {
                    serde_yaml::from_str(text).map_err(|e| e.to_string())
                }
            }
            TemplateFormat::Toml => toml::from_str(text).map_err(|e| e.to_string()),
        };
        parsed.map_err(|message| Error::parse(path, self.name(), message))
    }

    /// Serialize a template, keeping declaration order
    pub fn serialize(self, template: &Template) -> Result<String> {
        let serialized: std::result::Result<String, String> = match self {
            TemplateFormat::Json => serde_json::to_string_pretty(template)
                .map(|mut text| {
                    text.push('\n');
                    text
                })
                .map_err(|e| e.to_string()),
            TemplateFormat::Yaml => serde_yaml::to_string(template).map_err(|e| e.to_string()),
            TemplateFormat::Toml => toml::to_string_pretty(template).map_err(|e| e.to_string()),
        };
        serialized.map_err(|message| Error::serialize(self.name(), message))
    }
}

impl fmt::Display for TemplateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use envgen_core::{Source, VariableConfig};
    use std::path::PathBuf;

    fn sample() -> Template {
        [
            ("ZEBRA", VariableConfig::literal("stripes").required(true)),
            ("API_KEY", VariableConfig::remote_secret("prod/api/key").with_default("dev-key")),
            ("HOME_DIR", VariableConfig::environment(Some("HOME"))),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_from_path() {
        assert_eq!(TemplateFormat::from_path(Path::new("t.json")).unwrap(), TemplateFormat::Json);
        assert_eq!(TemplateFormat::from_path(Path::new("t.YML")).unwrap(), TemplateFormat::Yaml);
        assert_eq!(TemplateFormat::from_path(Path::new("a/b.yaml")).unwrap(), TemplateFormat::Yaml);
        assert_eq!(TemplateFormat::from_path(Path::new("t.toml")).unwrap(), TemplateFormat::Toml);

        let err = TemplateFormat::from_path(Path::new("template.ini")).unwrap_err();
        assert!(matches!(err, Error::Format { ref extension, .. } if extension == "ini"));
        assert!(matches!(
            TemplateFormat::from_path(Path::new("template")),
            Err(Error::Format { .. })
        ));
    }

    #[test]
    fn test_each_format_round_trips_in_order() {
        let template = sample();
        for format in [TemplateFormat::Json, TemplateFormat::Yaml, TemplateFormat::Toml] {
            let text = format.serialize(&template).unwrap();
            let parsed = format.parse(&text, &PathBuf::from("t")).unwrap();
            assert_eq!(parsed, template, "{format} round trip");

            let names: Vec<_> = parsed.keys().cloned().collect();
            assert_eq!(names, vec!["ZEBRA", "API_KEY", "HOME_DIR"], "{format} order");
        }
    }

    #[test]
    fn test_parse_toml_tables() {
        let text = r#"
[DB_PASSWORD]
required = true
source = "AwsSecretManager"
value = "prod/db/password"

[PORT]
value = 5432
"#;
        let template = TemplateFormat::Toml.parse(text, Path::new("t.toml")).unwrap();
        assert_eq!(template["DB_PASSWORD"].source, Source::RemoteSecret);
        assert!(template["DB_PASSWORD"].required);
        assert_eq!(template["PORT"].value.as_deref(), Some("5432"));
        assert_eq!(template["PORT"].source, Source::Literal);
    }

    #[test]
    fn test_parse_yaml_with_unknown_source() {
        let text = "TOKEN:\n  source: Vault\n  value: secret/token\n";
        let template = TemplateFormat::Yaml.parse(text, Path::new("t.yaml")).unwrap();
        assert_eq!(template["TOKEN"].source, Source::Unknown("Vault".to_string()));
    }

    #[test]
    fn test_empty_documents() {
        assert!(TemplateFormat::Yaml.parse("", Path::new("t.yaml")).unwrap().is_empty());
        assert!(TemplateFormat::Toml.parse("", Path::new("t.toml")).unwrap().is_empty());
        assert!(TemplateFormat::Json.parse("{}", Path::new("t.json")).unwrap().is_empty());
    }

    #[test]
    fn test_parse_errors_name_the_file() {
        let err = TemplateFormat::Json
            .parse("{not json", Path::new("broken.json"))
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("JSON"));
        assert!(message.contains("broken.json"));
    }
}
