//! Gene identifier mapping services.
//!
//! Three traits cover the identifier translation a reconciliation can need:
//!
//! - [`OrthologMapper`]: project gene symbols from one species to orthologous
//!   symbols in another; cardinality between input and output may differ
//! - [`GeneStandardizer`]: canonicalize symbols within one species, dropping
//!   unmappable entries
//! - [`DatasetStandardizer`]: convert a reference dataset's gene rows across
//!   species
//!
//! The bundled implementations in [`table`] are lookup tables over
//! caller-supplied pairs; they compute no orthology themselves.

pub mod table;

use serde::{Deserialize, Serialize};

use crate::core::dataset::CellTypeDataset;
use crate::core::types::{MappingMethod, Species};
use crate::reconcile::error::CollaboratorError;

pub use table::{OrthologTable, SynonymTable, TableDatasetStandardizer};

/// One input-to-ortholog pair produced by an [`OrthologMapper`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrthologRecord {
    /// Symbol in the source species' namespace
    pub input: String,
    /// Orthologous symbol in the target species' namespace
    pub ortholog: String,
}

/// One input-to-canonical pair produced by a [`GeneStandardizer`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardizedGene {
    /// Symbol as supplied
    pub input: String,
    /// Canonical symbol for the species
    pub name: String,
}

/// Projects gene symbols from one species to orthologous symbols in another
pub trait OrthologMapper {
    /// Map each input symbol to its orthologs in the target species
    ///
    /// Output cardinality may differ from the input: a symbol can fan out to
    /// several orthologs, collapse onto one shared with another input, or
    /// drop entirely. Same-species calls are expected to behave as an
    /// identity-like pass.
    ///
    /// # Errors
    ///
    /// Returns a [`CollaboratorError`] when the species pair or method is
    /// unsupported.
    fn map_orthologs(
        &self,
        genes: &[String],
        from: &Species,
        to: &Species,
        method: MappingMethod,
    ) -> Result<Vec<OrthologRecord>, CollaboratorError>;
}

/// Canonicalizes gene symbols within one species
pub trait GeneStandardizer {
    /// Map each symbol to its canonical name, dropping symbols with none
    ///
    /// # Errors
    ///
    /// Returns a [`CollaboratorError`] when the species is unsupported.
    fn standardize_genes(
        &self,
        genes: &[String],
        species: &Species,
    ) -> Result<Vec<StandardizedGene>, CollaboratorError>;
}

/// Converts a reference dataset's gene identifiers across species
pub trait DatasetStandardizer {
    /// Return a copy of `dataset` with gene rows expressed in `to`'s
    /// namespace; the input dataset is never modified
    ///
    /// # Errors
    ///
    /// Returns a [`CollaboratorError`] when the species pair is unsupported.
    fn standardize_dataset(
        &self,
        dataset: &CellTypeDataset,
        from: &Species,
        to: &Species,
    ) -> Result<CellTypeDataset, CollaboratorError>;
}
