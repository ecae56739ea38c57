//! Activation modes and the project context they are evaluated against

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Declared activation policy of a configuration node.
///
/// A node without a declared mode is treated as [`Active::Never`] when
/// its enabled state is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Active {
    Always,
    Never,
    /// Enabled for non-snapshot runs
    Release,
    Prerelease,
    ReleasePrerelease,
    Snapshot,
}

impl Active {
    pub const ALL: [Active; 6] = [
        Active::Always,
        Active::Never,
        Active::Release,
        Active::Prerelease,
        Active::ReleasePrerelease,
        Active::Snapshot,
    ];

    /// Evaluate this mode against a project context.
    pub fn check(self, context: &dyn ProjectContext) -> bool {
        match self {
            Active::Always => true,
            Active::Never => false,
            Active::Release => context.is_release(),
            Active::Prerelease => context.is_prerelease(),
            Active::ReleasePrerelease => context.is_release() || context.is_prerelease(),
            Active::Snapshot => context.is_snapshot(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Active::Always => "ALWAYS",
            Active::Never => "NEVER",
            Active::Release => "RELEASE",
            Active::Prerelease => "PRERELEASE",
            Active::ReleasePrerelease => "RELEASE_PRERELEASE",
            Active::Snapshot => "SNAPSHOT",
        }
    }
}

impl FromStr for Active {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_uppercase().replace('-', "_").as_str() {
            "ALWAYS" => Ok(Active::Always),
            "NEVER" => Ok(Active::Never),
            "RELEASE" => Ok(Active::Release),
            "PRERELEASE" => Ok(Active::Prerelease),
            "RELEASE_PRERELEASE" => Ok(Active::ReleasePrerelease),
            "SNAPSHOT" => Ok(Active::Snapshot),
            _ => Err(Error::InvalidActivation {
                value: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for Active {
    type Error = Error;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Active> for String {
    fn from(active: Active) -> Self {
        active.as_str().to_string()
    }
}

impl fmt::Display for Active {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Run-time facts activation modes are evaluated against.
///
/// Supplied by whoever drives the engine; the model never builds one on
/// its own except from its [`Project`](crate::Project) section.
pub trait ProjectContext {
    fn is_snapshot(&self) -> bool;

    fn is_prerelease(&self) -> bool;

    fn is_release(&self) -> bool {
        !self.is_snapshot()
    }
}

/// Plain project context with explicit flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunContext {
    pub snapshot: bool,
    pub prerelease: bool,
}

impl RunContext {
    /// A regular (non-snapshot, non-prerelease) release run.
    pub fn release() -> Self {
        Self {
            snapshot: false,
            prerelease: false,
        }
    }

    pub fn snapshot() -> Self {
        Self {
            snapshot: true,
            prerelease: false,
        }
    }

    pub fn prerelease() -> Self {
        Self {
            snapshot: false,
            prerelease: true,
        }
    }
}

impl ProjectContext for RunContext {
    fn is_snapshot(&self) -> bool {
        self.snapshot
    }

    fn is_prerelease(&self) -> bool {
        self.prerelease
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Active::Always, RunContext::snapshot(), true)]
    #[case(Active::Always, RunContext::release(), true)]
    #[case(Active::Never, RunContext::release(), false)]
    #[case(Active::Release, RunContext::snapshot(), false)]
    #[case(Active::Release, RunContext::release(), true)]
    #[case(Active::Release, RunContext::prerelease(), true)]
    #[case(Active::Prerelease, RunContext::release(), false)]
    #[case(Active::Prerelease, RunContext::prerelease(), true)]
    #[case(Active::ReleasePrerelease, RunContext::snapshot(), false)]
    #[case(Active::ReleasePrerelease, RunContext::prerelease(), true)]
    #[case(Active::Snapshot, RunContext::snapshot(), true)]
    #[case(Active::Snapshot, RunContext::release(), false)]
    fn check_matches_context(
        #[case] active: Active,
        #[case] context: RunContext,
        #[case] expected: bool,
    ) {
        assert_eq!(active.check(&context), expected);
    }

    #[test]
    fn from_str_is_lenient_about_case_and_separator() {
        assert_eq!("always".parse::<Active>().unwrap(), Active::Always);
        assert_eq!(
            "release-prerelease".parse::<Active>().unwrap(),
            Active::ReleasePrerelease
        );
        assert_eq!(
            "Release_Prerelease".parse::<Active>().unwrap(),
            Active::ReleasePrerelease
        );
    }

    #[test]
    fn from_str_rejects_unknown_modes() {
        let err = "sometimes".parse::<Active>().unwrap_err();
        assert!(err.to_string().contains("sometimes"));
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for active in Active::ALL {
            assert_eq!(active.to_string().parse::<Active>().unwrap(), active);
        }
    }
}
