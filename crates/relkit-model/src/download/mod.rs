//! Downloaders and the `download` section that groups them

mod ftp;
mod http;
mod ssh;

pub use ftp::FtpDownloader;
pub use http::{Authorization, HttpDownloader};
pub use ssh::{ScpDownloader, SftpDownloader, SshFields};

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::activation::ProjectContext;
use crate::aggregate;
use crate::artifact::Asset;
use crate::error::Result;
use crate::node::{ConfigNode, NodeCore};

pub const DEFAULT_CONNECT_TIMEOUT: u32 = 20;
pub const DEFAULT_READ_TIMEOUT: u32 = 60;

/// Fields every downloader carries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DownloaderCommon {
    #[serde(flatten)]
    pub core: NodeCore,
    /// Seconds
    pub connect_timeout: Option<u32>,
    /// Seconds
    pub read_timeout: Option<u32>,
    pub assets: IndexSet<Asset>,
}

impl DownloaderCommon {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            core: NodeCore::named(name),
            ..Self::default()
        }
    }

    pub fn merge_from(&mut self, source: &DownloaderCommon) {
        self.core.merge_from(&source.core);
        if source.connect_timeout.is_some() {
            self.connect_timeout = source.connect_timeout;
        }
        if source.read_timeout.is_some() {
            self.read_timeout = source.read_timeout;
        }
        self.assets.clear();
        self.assets.extend(source.assets.iter().cloned());
    }

    pub fn effective_connect_timeout(&self) -> u32 {
        self.connect_timeout.unwrap_or(DEFAULT_CONNECT_TIMEOUT)
    }

    pub fn effective_read_timeout(&self) -> u32 {
        self.read_timeout.unwrap_or(DEFAULT_READ_TIMEOUT)
    }
}

/// A downloader: a node fetching remote assets before assembly.
pub trait Downloader: ConfigNode {
    fn common(&self) -> &DownloaderCommon;

    fn common_mut(&mut self) -> &mut DownloaderCommon;

    fn section(&self, full: bool, props: &mut Map<String, Value>);

    fn assets(&self) -> &IndexSet<Asset> {
        &self.common().assets
    }

    fn add_asset(&mut self, asset: Asset) -> bool {
        self.common_mut().assets.insert(asset)
    }
}

pub(crate) fn downloader_map<D: Downloader>(
    downloader: &D,
    full: bool,
) -> Result<Map<String, Value>> {
    let common = downloader.common();
    if !full && !common.core.is_enabled() {
        return Ok(Map::new());
    }

    let mut props = Map::new();
    common.core.export_activation(&mut props);
    props.insert(
        "connectTimeout".into(),
        Value::from(common.effective_connect_timeout()),
    );
    props.insert(
        "readTimeout".into(),
        Value::from(common.effective_read_timeout()),
    );
    props.insert(
        "assets".into(),
        Value::Array(common.assets.iter().map(Asset::as_value).collect()),
    );
    downloader.section(full, &mut props);
    props.insert(
        "extraProperties".into(),
        common.core.extra_properties.resolved_value(downloader.prefix()),
    );

    common.core.wrap(downloader.node_type(), props)
}

/// The `download` section.
///
/// `enabled` is its own tri-state and does not follow the downloaders'
/// activation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Download {
    pub enabled: Option<bool>,
    pub ftp: IndexMap<String, FtpDownloader>,
    pub http: IndexMap<String, HttpDownloader>,
    pub scp: IndexMap<String, ScpDownloader>,
    pub sftp: IndexMap<String, SftpDownloader>,
    /// The section appeared in a parsed document, possibly empty.
    #[serde(skip)]
    declared: bool,
}

impl Download {
    /// Copy the flag and replace every sub-map wholesale.
    pub fn set_all(&mut self, source: &Download) {
        self.enabled = source.enabled;
        self.declared |= source.declared;
        self.set_ftp(&source.ftp);
        self.set_http(&source.http);
        self.set_scp(&source.scp);
        self.set_sftp(&source.sftp);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(false)
    }

    pub fn is_enabled_set(&self) -> bool {
        self.enabled.is_some()
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = Some(enabled);
    }

    pub fn is_empty(&self) -> bool {
        self.ftp.is_empty() && self.http.is_empty() && self.scp.is_empty() && self.sftp.is_empty()
    }

    /// Nothing declared at all: not present in a document, no flag and no
    /// entries.
    pub fn is_unset(&self) -> bool {
        !self.declared && !self.is_enabled_set() && self.is_empty()
    }

    pub fn is_declared(&self) -> bool {
        self.declared
    }

    /// Mark the section as present in a document even when it is empty,
    /// so that it still replaces the sub-maps it overlays.
    pub fn mark_declared(&mut self) {
        self.declared = true;
    }

    pub fn set_ftp(&mut self, ftp: &IndexMap<String, FtpDownloader>) {
        aggregate::replace_all(&mut self.ftp, ftp);
    }

    pub fn set_http(&mut self, http: &IndexMap<String, HttpDownloader>) {
        aggregate::replace_all(&mut self.http, http);
    }

    pub fn set_scp(&mut self, scp: &IndexMap<String, ScpDownloader>) {
        aggregate::replace_all(&mut self.scp, scp);
    }

    pub fn set_sftp(&mut self, sftp: &IndexMap<String, SftpDownloader>) {
        aggregate::replace_all(&mut self.sftp, sftp);
    }

    pub fn add_ftp(&mut self, downloader: FtpDownloader) -> Result<()> {
        aggregate::insert_unique("ftp", &mut self.ftp, downloader)
    }

    pub fn add_http(&mut self, downloader: HttpDownloader) -> Result<()> {
        aggregate::insert_unique("http", &mut self.http, downloader)
    }

    pub fn add_scp(&mut self, downloader: ScpDownloader) -> Result<()> {
        aggregate::insert_unique("scp", &mut self.scp, downloader)
    }

    pub fn add_sftp(&mut self, downloader: SftpDownloader) -> Result<()> {
        aggregate::insert_unique("sftp", &mut self.sftp, downloader)
    }

    pub fn normalize_names(&mut self) {
        aggregate::normalize_names(&mut self.ftp);
        aggregate::normalize_names(&mut self.http);
        aggregate::normalize_names(&mut self.scp);
        aggregate::normalize_names(&mut self.sftp);
    }

    pub fn check_names(&self) -> Result<()> {
        aggregate::check_unique_names("ftp", &self.ftp)?;
        aggregate::check_unique_names("http", &self.http)?;
        aggregate::check_unique_names("scp", &self.scp)?;
        aggregate::check_unique_names("sftp", &self.sftp)
    }

    pub fn resolve_enabled(&mut self, context: &dyn ProjectContext) -> usize {
        aggregate::resolve_all(&mut self.ftp, context)
            + aggregate::resolve_all(&mut self.http, context)
            + aggregate::resolve_all(&mut self.scp, context)
            + aggregate::resolve_all(&mut self.sftp, context)
    }

    pub fn settle_enabled(&mut self) -> bool {
        let has_entries = !self.is_empty();
        *self.enabled.get_or_insert(has_entries)
    }

    pub fn as_map(&self, full: bool) -> Result<Map<String, Value>> {
        if !full && !self.is_enabled() {
            return Ok(Map::new());
        }

        let mut props = Map::new();
        props.insert("enabled".into(), Value::Bool(self.is_enabled()));
        aggregate::put_section(&mut props, "ftp", &self.ftp, full)?;
        aggregate::put_section(&mut props, "http", &self.http, full)?;
        aggregate::put_section(&mut props, "scp", &self.scp, full)?;
        aggregate::put_section(&mut props, "sftp", &self.sftp, full)?;

        let mut map = Map::new();
        map.insert("download".into(), Value::Object(props));
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::{Active, RunContext};

    fn ftp(name: &str) -> FtpDownloader {
        let mut downloader = FtpDownloader::named(name);
        downloader.set_active(Active::Always);
        downloader
    }

    fn http(name: &str) -> HttpDownloader {
        let mut downloader = HttpDownloader::named(name);
        downloader.set_active(Active::Always);
        downloader
    }

    #[test]
    fn set_all_replaces_instead_of_merging() {
        let mut target = Download::default();
        target.add_ftp(ftp("a")).unwrap();
        target.add_http(http("b")).unwrap();

        let mut source = Download::default();
        source.add_ftp(ftp("c")).unwrap();

        target.set_all(&source);

        assert_eq!(target.ftp.keys().collect::<Vec<_>>(), vec!["c"]);
        assert!(target.http.is_empty());
    }

    #[test]
    fn set_all_copies_flag_unconditionally() {
        let mut target = Download::default();
        target.set_enabled(true);

        target.set_all(&Download::default());

        assert!(!target.is_enabled_set());
    }

    #[test]
    fn set_all_does_not_alias_source() {
        let mut source = Download::default();
        source.add_ftp(ftp("a")).unwrap();

        let mut target = Download::default();
        target.set_all(&source);
        source.ftp.clear();

        assert!(target.ftp.contains_key("a"));
    }

    #[test]
    fn section_flag_ignores_children() {
        let mut download = Download::default();
        download.add_ftp(ftp("a")).unwrap();
        download.set_enabled(false);

        assert_eq!(download.resolve_enabled(&RunContext::release()), 1);
        assert!(!download.is_enabled());
        assert!(download.as_map(false).unwrap().is_empty());
    }

    #[test]
    fn export_skips_empty_sub_sections() {
        let mut download = Download::default();
        download.add_ftp(ftp("a")).unwrap();
        download.add_http(HttpDownloader::named("never")).unwrap();
        download.set_enabled(true);
        download.resolve_enabled(&RunContext::release());

        let map = download.as_map(false).unwrap();
        let section = map["download"].as_object().unwrap();

        assert_eq!(
            section.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["enabled", "ftp"]
        );
    }

    #[test]
    fn timeouts_fall_back_to_defaults() {
        let common = DownloaderCommon::named("a");
        assert_eq!(common.effective_connect_timeout(), DEFAULT_CONNECT_TIMEOUT);
        assert_eq!(common.effective_read_timeout(), DEFAULT_READ_TIMEOUT);
    }
}
