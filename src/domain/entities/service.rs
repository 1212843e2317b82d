//! Service identity - the key a version listing is scoped to

use std::fmt;

use serde::Deserialize;

/// Name of the App Engine service a deployment targets
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServiceIdentity(String);

/// The fields of app.yaml that name the service
#[derive(Debug, Default, Deserialize)]
struct AppDescriptor {
    #[serde(default)]
    service: Option<String>,
    /// Pre-2016 name for `service`
    #[serde(default)]
    module: Option<String>,
}

impl ServiceIdentity {
    /// App Engine's implicit service when app.yaml names none
    pub const DEFAULT: &'static str = "default";

    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Extract the service from app.yaml content.
    ///
    /// `service` wins; `module` is used when `service` is absent or empty.
    pub fn from_app_yaml(content: &str) -> Result<Self, serde_yaml_ng::Error> {
        let descriptor: AppDescriptor = if content.trim().is_empty() {
            AppDescriptor::default()
        } else {
            serde_yaml_ng::from_str(content)?
        };

        let name = [descriptor.service, descriptor.module]
            .into_iter()
            .flatten()
            .find(|name| !name.is_empty())
            .unwrap_or_else(|| Self::DEFAULT.to_string());

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServiceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
