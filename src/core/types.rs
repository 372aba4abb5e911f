use serde::{Deserialize, Serialize};

/// A normalized species label (e.g. "human", "mouse")
///
/// Raw, user-supplied labels travel as plain strings on the request; only a
/// [`SpeciesResolver`](crate::species::SpeciesResolver) produces `Species`
/// values, so holding one means normalization already happened.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Species(pub String);

impl Species {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// The default output species for reconciliation
    #[must_use]
    pub fn human() -> Self {
        Self("human".to_string())
    }

    #[must_use]
    pub fn mouse() -> Self {
        Self("mouse".to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_human(&self) -> bool {
        self.0 == "human"
    }
}

impl std::fmt::Display for Species {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Named method used to project gene symbols between species
///
/// The reconciler passes the method through to the
/// [`OrthologMapper`](crate::mapping::OrthologMapper); backends that only
/// support one method may ignore it or reject unsupported values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MappingMethod {
    /// NCBI HomoloGene groups
    #[default]
    Homologene,
    /// g:Profiler g:Orth
    Gprofiler,
    /// Babelgene ortholog tables
    Babelgene,
}

impl std::fmt::Display for MappingMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Homologene => write!(f, "homologene"),
            Self::Gprofiler => write!(f, "gprofiler"),
            Self::Babelgene => write!(f, "babelgene"),
        }
    }
}
