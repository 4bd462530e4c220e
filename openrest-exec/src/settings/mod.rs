//! Connector configuration: which specifications to load and how to name their operations.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use openrest_core::ErrorKind;
use serde::{Deserialize, Serialize};

use crate::openapi::{FileSystem, LocalFileSystem, SpecSource};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecificationSettings {
    /// Service name; the prefix of every generated operation name.
    pub name: String,
    pub base_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specification: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specification_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specification_file: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aliases: Option<BTreeMap<String, String>>,
}

impl SpecificationSettings {
    pub fn inline(
        name: impl Into<String>,
        base_url: impl Into<String>,
        specification: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            base_url: base_url.into(),
            specification: Some(specification.into()),
            ..Self::default()
        }
    }

    pub fn with_aliases(mut self, aliases: BTreeMap<String, String>) -> Self {
        self.aliases = Some(aliases);
        self
    }

    /// The single configured source. Zero or several sources is a configuration error.
    pub fn source(&self) -> Result<SpecSource, ErrorKind> {
        let mut sources = Vec::new();
        if let Some(text) = &self.specification {
            sources.push(SpecSource::Inline(text.clone()));
        }
        if let Some(url) = &self.specification_url {
            sources.push(SpecSource::Url(url.clone()));
        }
        if let Some(path) = &self.specification_file {
            sources.push(SpecSource::File(path.clone()));
        }
        match sources.len() {
            1 => Ok(sources.remove(0)),
            0 => Err(ErrorKind::InvalidSpecification(format!(
                "'{}': one of specification, specificationUrl or specificationFile is required",
                self.name
            ))),
            n => Err(ErrorKind::InvalidSpecification(format!(
                "'{}': {n} specification sources given, expected exactly one",
                self.name
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ConnectorSettings {
    pub specifications: Vec<SpecificationSettings>,
}

// A bare specification object is accepted in place of the list.
#[derive(Deserialize)]
#[serde(untagged)]
enum SettingsFile {
    Many { specifications: Vec<SpecificationSettings> },
    One(SpecificationSettings),
}

impl<'de> Deserialize<'de> for ConnectorSettings {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match SettingsFile::deserialize(deserializer)? {
            SettingsFile::Many { specifications } => Self { specifications },
            SettingsFile::One(spec) => Self {
                specifications: vec![spec],
            },
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse settings: {0}")]
    Parse(String),
}

impl ConnectorSettings {
    pub fn parse(text: &str) -> Result<Self, SettingsError> {
        if text.trim_start().starts_with('{') {
            serde_json::from_str(text).map_err(|e| SettingsError::Parse(e.to_string()))
        } else {
            serde_yaml::from_str(text).map_err(|e| SettingsError::Parse(e.to_string()))
        }
    }

    /// Reads and parses a settings file through `fs`.
    pub async fn load(path: &Path, fs: &dyn FileSystem) -> Result<Self, SettingsError> {
        let text = fs
            .read_to_string(path)
            .await
            .map_err(|source| SettingsError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        Self::parse(&text)
    }

    pub async fn from_file(path: &Path) -> Result<Self, SettingsError> {
        Self::load(path, &LocalFileSystem).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_object_is_accepted() {
        let settings = ConnectorSettings::parse(
            "name: Svc\nbaseUrl: http://x\nspecificationUrl: http://x/openapi.json\n",
        )
        .unwrap();
        assert_eq!(settings.specifications.len(), 1);
        assert_eq!(settings.specifications[0].name, "Svc");
    }

    #[test]
    fn list_form_reads_aliases() {
        let settings = ConnectorSettings::parse(
            r#"{"specifications":[{"name":"A","baseUrl":"http://a","specification":"{}","aliases":{"A_x":"X"}}]}"#,
        )
        .unwrap();
        let aliases = settings.specifications[0].aliases.as_ref().unwrap();
        assert_eq!(aliases.get("A_x").map(String::as_str), Some("X"));
    }

    #[test]
    fn exactly_one_source_is_required() {
        let none = SpecificationSettings {
            name: "Svc".into(),
            ..Default::default()
        };
        assert!(matches!(none.source(), Err(ErrorKind::InvalidSpecification(_))));

        let two = SpecificationSettings {
            specification_url: Some("http://x".into()),
            ..SpecificationSettings::inline("Svc", "http://x", "{}")
        };
        assert!(matches!(two.source(), Err(ErrorKind::InvalidSpecification(_))));
    }

    struct OneFile {
        path: PathBuf,
        text: &'static str,
    }

    #[async_trait::async_trait]
    impl FileSystem for OneFile {
        async fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
            if path == self.path.as_path() {
                Ok(self.text.to_string())
            } else {
                Err(std::io::Error::from(std::io::ErrorKind::NotFound))
            }
        }
    }

    #[tokio::test]
    async fn load_reads_through_the_file_system() {
        let fs = OneFile {
            path: PathBuf::from("/etc/openrest.yaml"),
            text: "name: Svc\nbaseUrl: http://x\nspecificationFile: /specs/svc.yaml\n",
        };
        let settings = ConnectorSettings::load(Path::new("/etc/openrest.yaml"), &fs)
            .await
            .unwrap();
        assert_eq!(
            settings.specifications[0].specification_file,
            Some(PathBuf::from("/specs/svc.yaml"))
        );

        let err = ConnectorSettings::load(Path::new("/elsewhere.yaml"), &fs)
            .await
            .unwrap_err();
        assert!(matches!(err, SettingsError::Read { .. }));
    }
}
