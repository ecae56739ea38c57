//! `archive` assembler: plain archives of a distribution

use std::fmt;
use std::str::FromStr;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Assembler, AssemblerCommon, assembler_map};
use crate::error::{Error, Result};
use crate::node::{ConfigNode, NodeCore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ArchiveFormat {
    Zip,
    Tar,
    TarGz,
    TarXz,
    Tgz,
    Txz,
}

impl ArchiveFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            ArchiveFormat::Zip => "ZIP",
            ArchiveFormat::Tar => "TAR",
            ArchiveFormat::TarGz => "TAR_GZ",
            ArchiveFormat::TarXz => "TAR_XZ",
            ArchiveFormat::Tgz => "TGZ",
            ArchiveFormat::Txz => "TXZ",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ArchiveFormat::Zip => "zip",
            ArchiveFormat::Tar => "tar",
            ArchiveFormat::TarGz => "tar.gz",
            ArchiveFormat::TarXz => "tar.xz",
            ArchiveFormat::Tgz => "tgz",
            ArchiveFormat::Txz => "txz",
        }
    }
}

impl FromStr for ArchiveFormat {
    type Err = Error;

    /// Accepts both names (`TAR_GZ`) and extensions (`tar.gz`).
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_uppercase().replace(['.', '-'], "_").as_str() {
            "ZIP" => Ok(ArchiveFormat::Zip),
            "TAR" => Ok(ArchiveFormat::Tar),
            "TAR_GZ" => Ok(ArchiveFormat::TarGz),
            "TAR_XZ" => Ok(ArchiveFormat::TarXz),
            "TGZ" => Ok(ArchiveFormat::Tgz),
            "TXZ" => Ok(ArchiveFormat::Txz),
            _ => Err(Error::UnknownArchiveFormat {
                value: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for ArchiveFormat {
    type Error = Error;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ArchiveFormat> for String {
    fn from(format: ArchiveFormat) -> Self {
        format.as_str().to_string()
    }
}

impl fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ArchiveAssembler {
    #[serde(flatten)]
    pub common: AssemblerCommon,
    pub archive_name: Option<String>,
    pub distribution_type: Option<String>,
    pub attach_platform: Option<bool>,
    pub formats: IndexSet<ArchiveFormat>,
}

impl ArchiveAssembler {
    pub const TYPE: &'static str = "archive";

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            common: AssemblerCommon::named(name),
            ..Self::default()
        }
    }
}

impl ConfigNode for ArchiveAssembler {
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
        if source.archive_name.is_some() {
            self.archive_name = source.archive_name.clone();
        }
        if source.distribution_type.is_some() {
            self.distribution_type = source.distribution_type.clone();
        }
        if source.attach_platform.is_some() {
            self.attach_platform = source.attach_platform;
        }
        self.formats = source.formats.clone();
    }

    fn as_map(&self, full: bool) -> Result<Map<String, Value>> {
        assembler_map(self, full)
    }
}

impl Assembler for ArchiveAssembler {
    fn common(&self) -> &AssemblerCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut AssemblerCommon {
        &mut self.common
    }

    fn section(&self, _full: bool, props: &mut Map<String, Value>) {
        props.insert("archiveName".into(), Value::from(self.archive_name.clone()));
        props.insert(
            "distributionType".into(),
            Value::from(self.distribution_type.clone()),
        );
        props.insert(
            "attachPlatform".into(),
            Value::from(self.attach_platform.unwrap_or(false)),
        );
        props.insert(
            "formats".into(),
            Value::Array(
                self.formats
                    .iter()
                    .map(|f| Value::from(f.as_str()))
                    .collect(),
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("zip", ArchiveFormat::Zip)]
    #[case("tar.gz", ArchiveFormat::TarGz)]
    #[case("TAR_XZ", ArchiveFormat::TarXz)]
    #[case("tgz", ArchiveFormat::Tgz)]
    fn parses_names_and_extensions(#[case] input: &str, #[case] expected: ArchiveFormat) {
        assert_eq!(input.parse::<ArchiveFormat>().unwrap(), expected);
    }

    #[test]
    fn rejects_unknown_format() {
        assert!(matches!(
            "rar".parse::<ArchiveFormat>(),
            Err(Error::UnknownArchiveFormat { .. })
        ));
    }

    #[test]
    fn full_export_of_unresolved_archive() {
        let mut assembler = ArchiveAssembler::named("dist");
        assembler.formats.insert(ArchiveFormat::Zip);
        assembler.formats.insert(ArchiveFormat::TarGz);

        assert!(assembler.as_map(false).unwrap().is_empty());

        let map = assembler.as_map(true).unwrap();
        assert_eq!(map["dist"]["enabled"], false);
        assert_eq!(map["dist"]["formats"], serde_json::json!(["ZIP", "TAR_GZ"]));
    }
}
