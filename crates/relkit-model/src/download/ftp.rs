use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Downloader, DownloaderCommon, downloader_map};
use crate::error::Result;
use crate::node::{ConfigNode, NodeCore, secret};

pub const DEFAULT_FTP_PORT: u16 = 21;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FtpDownloader {
    #[serde(flatten)]
    pub common: DownloaderCommon,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl FtpDownloader {
    pub const TYPE: &'static str = "ftp";

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            common: DownloaderCommon::named(name),
            ..Self::default()
        }
    }
}

impl ConfigNode for FtpDownloader {
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
        if source.host.is_some() {
            self.host = source.host.clone();
        }
        if source.port.is_some() {
            self.port = source.port;
        }
        if source.username.is_some() {
            self.username = source.username.clone();
        }
        if source.password.is_some() {
            self.password = source.password.clone();
        }
    }

    fn as_map(&self, full: bool) -> Result<Map<String, Value>> {
        downloader_map(self, full)
    }
}

impl Downloader for FtpDownloader {
    fn common(&self) -> &DownloaderCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut DownloaderCommon {
        &mut self.common
    }

    fn section(&self, _full: bool, props: &mut Map<String, Value>) {
        props.insert("host".into(), Value::from(self.host.clone()));
        props.insert(
            "port".into(),
            Value::from(self.port.unwrap_or(DEFAULT_FTP_PORT)),
        );
        props.insert("username".into(), Value::from(self.username.clone()));
        props.insert("password".into(), secret(&self.password));
    }
}
