//! Template model: variable names mapped to value-sourcing rules

use crate::constants::{SOURCE_ENVIRONMENT, SOURCE_LITERAL, SOURCE_REMOTE_SECRET};
use crate::types::environment::EnvironmentVariables;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Deref, DerefMut};

/// Where a variable's value comes from
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Source {
    /// The `value` field itself
    #[default]
    Literal,
    /// The process environment
    Environment,
    /// A key inside a remote secret bundle
    RemoteSecret,
    /// A source name this build does not know; rejected at resolution time
    Unknown(String),
}

impl Source {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Source::Literal => SOURCE_LITERAL,
            Source::Environment => SOURCE_ENVIRONMENT,
            Source::RemoteSecret => SOURCE_REMOTE_SECRET,
            Source::Unknown(name) => name,
        }
    }
}

impl From<&str> for Source {
    fn from(name: &str) -> Self {
        match name {
            SOURCE_LITERAL => Source::Literal,
            SOURCE_ENVIRONMENT => Source::Environment,
            SOURCE_REMOTE_SECRET => Source::RemoteSecret,
            other => Source::Unknown(other.to_string()),
        }
    }
}

impl From<String> for Source {
    fn from(name: String) -> Self {
        Source::from(name.as_str())
    }
}

impl From<Source> for String {
    fn from(source: Source) -> Self {
        match source {
            Source::Unknown(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolution rule for one variable
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableConfig {
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub source: Source,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "scalar::deserialize_option"
    )]
    pub value: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "scalar::deserialize_option"
    )]
    pub default: Option<String>,
}

impl VariableConfig {
    /// A literal constant
    #[must_use]
    pub fn literal(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::default()
        }
    }

    /// Read from the process environment, optionally under another name
    #[must_use]
    pub fn environment(name: Option<&str>) -> Self {
        Self {
            source: Source::Environment,
            value: name.map(str::to_string),
            ..Self::default()
        }
    }

    /// A `Bundle/Key` reference into the secret store
    #[must_use]
    pub fn remote_secret(reference: impl Into<String>) -> Self {
        Self {
            source: Source::RemoteSecret,
            value: Some(reference.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    #[must_use]
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }
}

/// Ordered mapping from variable name to its rule
///
/// Declaration order is preserved and determines output line order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Template(IndexMap<String, VariableConfig>);

impl Template {
    #[must_use]
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Derive a template from an existing environment mapping
    ///
    /// Every key becomes a literal; keys holding a non-empty value are
    /// marked required.
    #[must_use]
    pub fn from_environment(env: &EnvironmentVariables) -> Self {
        env.iter()
            .map(|(name, value)| {
                let config = VariableConfig::literal(value.clone()).required(!value.is_empty());
                (name.clone(), config)
            })
            .collect()
    }

    pub fn insert(&mut self, name: impl Into<String>, config: VariableConfig) -> Option<VariableConfig> {
        self.0.insert(name.into(), config)
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, VariableConfig> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> indexmap::map::IterMut<'_, String, VariableConfig> {
        self.0.iter_mut()
    }
}

impl Deref for Template {
    type Target = IndexMap<String, VariableConfig>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Template {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<K: Into<String>> FromIterator<(K, VariableConfig)> for Template {
    fn from_iter<I: IntoIterator<Item = (K, VariableConfig)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl IntoIterator for Template {
    type Item = (String, VariableConfig);
    type IntoIter = indexmap::map::IntoIter<String, VariableConfig>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Template documents may spell values as numbers or booleans
mod scalar {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Bool(bool),
        Int(i64),
        UInt(u64),
        // Printed in shortest form: `1.10` reads back as `1.1`
        Float(f64),
        Text(String),
    }

    impl Scalar {
        fn into_string(self) -> String {
            match self {
                Scalar::Bool(b) => b.to_string(),
                Scalar::Int(i) => i.to_string(),
                Scalar::UInt(u) => u.to_string(),
                Scalar::Float(f) => f.to_string(),
                Scalar::Text(s) => s,
            }
        }
    }

    pub fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<Scalar>::deserialize(deserializer)?.map(Scalar::into_string))
    }
}
