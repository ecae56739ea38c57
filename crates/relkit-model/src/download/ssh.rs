//! SSH-based downloaders (`scp`, `sftp`)

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Downloader, DownloaderCommon, downloader_map};
use crate::error::Result;
use crate::node::{ConfigNode, NodeCore, secret};

pub const DEFAULT_SSH_PORT: u16 = 22;

/// Connection settings shared by the SSH downloaders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SshFields {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub known_hosts_file: Option<String>,
    pub public_key: Option<String>,
    pub private_key: Option<String>,
    pub passphrase: Option<String>,
    pub fingerprint: Option<String>,
}

impl SshFields {
    pub fn merge_from(&mut self, source: &SshFields) {
        fn take(target: &mut Option<String>, source: &Option<String>) {
            if source.is_some() {
                *target = source.clone();
            }
        }

        take(&mut self.host, &source.host);
        if source.port.is_some() {
            self.port = source.port;
        }
        take(&mut self.username, &source.username);
        take(&mut self.password, &source.password);
        take(&mut self.known_hosts_file, &source.known_hosts_file);
        take(&mut self.public_key, &source.public_key);
        take(&mut self.private_key, &source.private_key);
        take(&mut self.passphrase, &source.passphrase);
        take(&mut self.fingerprint, &source.fingerprint);
    }

    fn export(&self, props: &mut Map<String, Value>) {
        props.insert("host".into(), Value::from(self.host.clone()));
        props.insert(
            "port".into(),
            Value::from(self.port.unwrap_or(DEFAULT_SSH_PORT)),
        );
        props.insert("username".into(), Value::from(self.username.clone()));
        props.insert("password".into(), secret(&self.password));
        props.insert(
            "knownHostsFile".into(),
            Value::from(self.known_hosts_file.clone()),
        );
        props.insert("publicKey".into(), secret(&self.public_key));
        props.insert("privateKey".into(), secret(&self.private_key));
        props.insert("passphrase".into(), secret(&self.passphrase));
        props.insert("fingerprint".into(), secret(&self.fingerprint));
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScpDownloader {
    #[serde(flatten)]
    pub common: DownloaderCommon,
    #[serde(flatten)]
    pub ssh: SshFields,
}

impl ScpDownloader {
    pub const TYPE: &'static str = "scp";

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            common: DownloaderCommon::named(name),
            ..Self::default()
        }
    }
}

impl ConfigNode for ScpDownloader {
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
        self.ssh.merge_from(&source.ssh);
    }

    fn as_map(&self, full: bool) -> Result<Map<String, Value>> {
        downloader_map(self, full)
    }
}

impl Downloader for ScpDownloader {
    fn common(&self) -> &DownloaderCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut DownloaderCommon {
        &mut self.common
    }

    fn section(&self, _full: bool, props: &mut Map<String, Value>) {
        self.ssh.export(props);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SftpDownloader {
    #[serde(flatten)]
    pub common: DownloaderCommon,
    #[serde(flatten)]
    pub ssh: SshFields,
}

impl SftpDownloader {
    pub const TYPE: &'static str = "sftp";

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            common: DownloaderCommon::named(name),
            ..Self::default()
        }
    }
}

impl ConfigNode for SftpDownloader {
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
        self.ssh.merge_from(&source.ssh);
    }

    fn as_map(&self, full: bool) -> Result<Map<String, Value>> {
        downloader_map(self, full)
    }
}

impl Downloader for SftpDownloader {
    fn common(&self) -> &DownloaderCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut DownloaderCommon {
        &mut self.common
    }

    fn section(&self, _full: bool, props: &mut Map<String, Value>) {
        self.ssh.export(props);
    }
}
