use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Downloader, DownloaderCommon, downloader_map};
use crate::error::{Error, Result};
use crate::node::{ConfigNode, NodeCore, secret};

/// HTTP authorization scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Authorization {
    #[default]
    None,
    Basic,
    Bearer,
}

impl Authorization {
    pub fn as_str(self) -> &'static str {
        match self {
            Authorization::None => "NONE",
            Authorization::Basic => "BASIC",
            Authorization::Bearer => "BEARER",
        }
    }
}

impl FromStr for Authorization {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "NONE" => Ok(Authorization::None),
            "BASIC" => Ok(Authorization::Basic),
            "BEARER" => Ok(Authorization::Bearer),
            _ => Err(Error::UnknownAuthorization {
                value: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for Authorization {
    type Error = Error;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Authorization> for String {
    fn from(authorization: Authorization) -> Self {
        authorization.as_str().to_string()
    }
}

impl fmt::Display for Authorization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HttpDownloader {
    #[serde(flatten)]
    pub common: DownloaderCommon,
    pub username: Option<String>,
    pub password: Option<String>,
    pub authorization: Option<Authorization>,
    /// Merged additively, like extra properties
    pub headers: IndexMap<String, String>,
}

impl HttpDownloader {
    pub const TYPE: &'static str = "http";

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            common: DownloaderCommon::named(name),
            ..Self::default()
        }
    }

    pub fn effective_authorization(&self) -> Authorization {
        self.authorization.unwrap_or_default()
    }
}

impl ConfigNode for HttpDownloader {
    fn node_type(&self) -> &'static str {
        Self::TYPE
    }

    fn core(&self) -> &NodeCore {
        &self.common.core
    }

    fn core_mut(&mut self) -> &mut NodeCore {
        &mut self.common.core
    }

    fn set_all(&mut self, source: &Self) {
        self.common.merge_from(&source.common);
        if source.username.is_some() {
            self.username = source.username.clone();
        }
        if source.password.is_some() {
            self.password = source.password.clone();
        }
        if source.authorization.is_some() {
            self.authorization = source.authorization;
        }
        for (key, value) in &source.headers {
            self.headers.insert(key.clone(), value.clone());
        }
    }

    fn as_map(&self, full: bool) -> Result<Map<String, Value>> {
        downloader_map(self, full)
    }
}

impl Downloader for HttpDownloader {
    fn common(&self) -> &DownloaderCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut DownloaderCommon {
        &mut self.common
    }

    fn section(&self, _full: bool, props: &mut Map<String, Value>) {
        props.insert("username".into(), Value::from(self.username.clone()));
        props.insert("password".into(), secret(&self.password));
        props.insert(
            "authorization".into(),
            Value::from(self.effective_authorization().as_str()),
        );
        let headers: Map<String, Value> = self
            .headers
            .iter()
            .map(|(k, v)| (k.clone(), Value::from(v.as_str())))
            .collect();
        props.insert("headers".into(), Value::Object(headers));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::{Active, RunContext};
    use crate::node::UNSET;

    #[test]
    fn headers_merge_additively_in_order() {
        let mut target = HttpDownloader::named("cdn");
        target.headers.insert("Accept".into(), "*/*".into());
        target.headers.insert("X-Team".into(), "build".into());

        let mut source = HttpDownloader::named("cdn");
        source.headers.insert("X-Team".into(), "release".into());
        source.headers.insert("X-Trace".into(), "1".into());
        target.set_all(&source);

        let headers: Vec<_> = target
            .headers
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        assert_eq!(
            headers,
            vec![("Accept", "*/*"), ("X-Team", "release"), ("X-Trace", "1")]
        );
    }

    #[test]
    fn export_defaults_authorization_to_none() {
        let mut http = HttpDownloader::named("cdn");
        http.set_active(Active::Always);
        http.resolve_enabled(&RunContext::snapshot());

        let map = http.as_map(false).unwrap();
        assert_eq!(map["cdn"]["authorization"], "NONE");
        assert_eq!(map["cdn"]["password"], UNSET);
    }

    #[test]
    fn authorization_parses_case_insensitively() {
        assert_eq!(
            "bearer".parse::<Authorization>().unwrap(),
            Authorization::Bearer
        );
        assert!("digest".parse::<Authorization>().is_err());
    }
}
