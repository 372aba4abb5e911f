//! Species label resolution.
//!
//! The reconciler never interprets raw species strings itself; it hands them
//! to a [`SpeciesResolver`] and adopts the normalized result. The bundled
//! [`AliasSpeciesResolver`] resolves common aliases ("Homo sapiens",
//! "hsapiens", taxon ids) and applies configurable defaults for missing
//! labels.

use std::collections::HashMap;

use crate::core::types::Species;
use crate::reconcile::error::CollaboratorError;

/// The normalized species pair for one reconciliation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSpecies {
    /// Species of the hit list
    pub genelist_species: Species,
    /// Species of the reference dataset
    pub sct_species: Species,
}

/// Normalizes and validates the two species labels of a reconciliation run
pub trait SpeciesResolver {
    /// Resolve possibly-aliased, possibly-missing labels into normalized
    /// species names
    ///
    /// # Errors
    ///
    /// Returns a [`CollaboratorError`] when a label cannot be resolved.
    fn resolve(
        &self,
        genelist_species: Option<&str>,
        sct_species: Option<&str>,
    ) -> Result<ResolvedSpecies, CollaboratorError>;
}

/// Alias-table species resolver with configurable defaults
///
/// Labels are trimmed and lowercased, then looked up in the alias table;
/// labels the table does not know pass through normalized, since the mapping
/// tables downstream are the authority on which species are supported.
/// Missing labels fall back to the configured defaults (human hit lists
/// against a mouse reference dataset, the common case).
pub struct AliasSpeciesResolver {
    aliases: HashMap<String, String>,
    default_genelist: Species,
    default_sct: Species,
}

impl Default for AliasSpeciesResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl AliasSpeciesResolver {
    #[must_use]
    pub fn new() -> Self {
        let mut aliases = HashMap::new();
        for (alias, canonical) in BUILTIN_ALIASES {
            aliases.insert((*alias).to_string(), (*canonical).to_string());
        }
        Self {
            aliases,
            default_genelist: Species::human(),
            default_sct: Species::mouse(),
        }
    }

    #[must_use]
    pub fn with_default_genelist_species(mut self, species: Species) -> Self {
        self.default_genelist = species;
        self
    }

    #[must_use]
    pub fn with_default_sct_species(mut self, species: Species) -> Self {
        self.default_sct = species;
        self
    }

    /// Register an extra alias (stored lowercased)
    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>, canonical: impl Into<String>) -> Self {
        self.aliases
            .insert(alias.into().to_lowercase(), canonical.into());
        self
    }

    fn normalize(&self, raw: &str) -> Result<Species, CollaboratorError> {
        let label = raw.trim().to_lowercase();
        if label.is_empty() {
            return Err(CollaboratorError::new("species label is empty"));
        }
        match self.aliases.get(&label) {
            Some(canonical) => Ok(Species::new(canonical.clone())),
            None => Ok(Species::new(label)),
        }
    }
}

impl SpeciesResolver for AliasSpeciesResolver {
    fn resolve(
        &self,
        genelist_species: Option<&str>,
        sct_species: Option<&str>,
    ) -> Result<ResolvedSpecies, CollaboratorError> {
        let genelist_species = match genelist_species {
            Some(raw) => self.normalize(raw)?,
            None => self.default_genelist.clone(),
        };
        let sct_species = match sct_species {
            Some(raw) => self.normalize(raw)?,
            None => self.default_sct.clone(),
        };
        Ok(ResolvedSpecies {
            genelist_species,
            sct_species,
        })
    }
}

const BUILTIN_ALIASES: &[(&str, &str)] = &[
    ("homo sapiens", "human"),
    ("h sapiens", "human"),
    ("hsapiens", "human"),
    ("hs", "human"),
    ("9606", "human"),
    ("mus musculus", "mouse"),
    ("m musculus", "mouse"),
    ("mmusculus", "mouse"),
    ("mm", "mouse"),
    ("10090", "mouse"),
    ("rattus norvegicus", "rat"),
    ("rnorvegicus", "rat"),
    ("10116", "rat"),
    ("danio rerio", "zebrafish"),
    ("drerio", "zebrafish"),
    ("7955", "zebrafish"),
    ("drosophila melanogaster", "fly"),
    ("dmelanogaster", "fly"),
    ("7227", "fly"),
    ("caenorhabditis elegans", "worm"),
    ("celegans", "worm"),
    ("6239", "worm"),
];
