use serde::{Deserialize, Serialize};

use crate::core::dataset::CellTypeDataset;
use crate::core::geneset::GeneSet;
use crate::core::types::Species;

fn default_output_species() -> Species {
    Species::human()
}

/// Inputs to one reconciliation run
///
/// `genelist_species` and `sct_species` carry raw, possibly-aliased labels;
/// they are normalized by the species resolver during reconciliation. The
/// output species defaults to human as an explicit field default, not as any
/// process-wide setting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationRequest {
    /// Reference cell-type expression dataset
    pub dataset: CellTypeDataset,

    /// Candidate gene list being tested for enrichment
    pub hits: GeneSet,

    /// User-supplied background; when absent the background builder
    /// constructs a default one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<GeneSet>,

    /// Raw species label of the hit list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genelist_species: Option<String>,

    /// Raw species label of the reference dataset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sct_species: Option<String>,

    /// Namespace every output gene list is expressed in
    #[serde(default = "default_output_species")]
    pub output_species: Species,

    /// Exempt hits/background from restriction to the dataset's measured
    /// genes; only valid for human gene lists
    #[serde(default)]
    pub gene_size_control: bool,

    /// Canonicalize same-species hits instead of routing them through the
    /// ortholog mapper
    #[serde(default)]
    pub standardise: bool,
}

impl ReconciliationRequest {
    /// New request with defaults: no background, unresolved species labels,
    /// human output, both flags off
    #[must_use]
    pub fn new(dataset: CellTypeDataset, hits: GeneSet) -> Self {
        Self {
            dataset,
            hits,
            background: None,
            genelist_species: None,
            sct_species: None,
            output_species: default_output_species(),
            gene_size_control: false,
            standardise: false,
        }
    }

    #[must_use]
    pub fn with_background(mut self, background: GeneSet) -> Self {
        self.background = Some(background);
        self
    }

    #[must_use]
    pub fn with_genelist_species(mut self, species: impl Into<String>) -> Self {
        self.genelist_species = Some(species.into());
        self
    }

    #[must_use]
    pub fn with_sct_species(mut self, species: impl Into<String>) -> Self {
        self.sct_species = Some(species.into());
        self
    }

    #[must_use]
    pub fn with_output_species(mut self, species: Species) -> Self {
        self.output_species = species;
        self
    }

    #[must_use]
    pub fn with_gene_size_control(mut self, enabled: bool) -> Self {
        self.gene_size_control = enabled;
        self
    }

    #[must_use]
    pub fn with_standardise(mut self, enabled: bool) -> Self {
        self.standardise = enabled;
        self
    }
}

/// Output of a successful reconciliation
///
/// On success the following hold: `hits` has at least four members and shares
/// none with `background`; all three gene lists are expressed in
/// `output_species`; and unless gene-size control was requested, `hits` and
/// `background` are confined to the genes measured by `dataset`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationResult {
    /// Reconciled hit list
    pub hits: GeneSet,

    /// Gene universe of the (possibly species-converted) dataset, restricted
    /// to the background
    pub sct_genes: GeneSet,

    /// The reference dataset, converted to the output species when the input
    /// dataset was tagged with a different one
    pub dataset: CellTypeDataset,

    /// Reconciled background, disjoint from `hits`
    pub background: GeneSet,

    /// Normalized species of the input hit list
    pub genelist_species: Species,

    /// Normalized species of the input dataset
    pub sct_species: Species,

    /// Namespace of every gene list above
    pub output_species: Species,
}
