//! Entity kinds that ownership can be resolved for.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The graph entities an author can own.
///
/// Only [`EntityKind::Adventure`] stores its author directly; scenes and
/// choices reach it through their parent chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntityKind {
    Adventure,
    Scene,
    Choice,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Adventure => "Adventure",
            Self::Scene => "Scene",
            Self::Choice => "Choice",
        }
    }

    /// Number of lookups needed to reach the owning adventure.
    pub fn chain_depth(self) -> usize {
        match self {
            Self::Adventure => 1,
            Self::Scene => 2,
            Self::Choice => 3,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
