//! # enrichprep
//!
//! A library for reconciling gene lists with a reference cell-type expression
//! dataset ahead of statistical enrichment testing.
//!
//! Cell-type enrichment tests assume a consistent gene universe: the candidate
//! "hit" list, the background it is compared against, and the genes actually
//! measured by the reference dataset must all live in one species' namespace,
//! with hits inside the background and the background free of hits. Real
//! inputs rarely arrive that way: hit lists often come from another species
//! and carry duplicate or outdated symbols, and a suitable background may be
//! missing entirely.
//!
//! `enrichprep` solves this by running an order-sensitive pipeline of species
//! resolution, cross-species projection, and multi-stage set filtering that
//! either yields a validated `{hits, background, reference-genes}` triple or
//! fails the whole call.
//!
//! ## Features
//!
//! - **Ordered reconciliation pipeline**: species resolution, background
//!   construction, dataset conversion, hit projection, then filtering, with
//!   each invariant checked where it is established
//! - **Cross-species projection**: hit lists and datasets are translated into
//!   the output species through pluggable mapping services
//! - **Pluggable collaborators**: species resolution, background
//!   construction, and all mapping behind small traits, with table-backed
//!   implementations bundled
//! - **Fail-fast validation**: too few hits, inconsistent flags, or a failed
//!   collaborator abort the call; no partial result ever escapes
//!
//! ## Example
//!
//! ```rust,no_run
//! use enrichprep::background::GeneCatalogBackground;
//! use enrichprep::mapping::{OrthologTable, SynonymTable, TableDatasetStandardizer};
//! use enrichprep::species::AliasSpeciesResolver;
//! use enrichprep::{
//!     AnnotationLevel, CellTypeDataset, Collaborators, GeneListReconciler, GeneSet,
//!     ReconciliationRequest, Species,
//! };
//!
//! // A small human reference dataset: five gene rows, two cell-type columns.
//! let genes: Vec<String> = ["SNAP25", "GFAP", "AIF1", "MBP", "SLC17A7"]
//!     .iter()
//!     .map(|g| g.to_string())
//!     .collect();
//! let level = AnnotationLevel::new(
//!     "level1",
//!     genes.clone(),
//!     vec!["neuron".to_string(), "astrocyte".to_string()],
//!     vec![vec![2.0, 0.1]; 5],
//! );
//! let dataset = CellTypeDataset::new(vec![level]);
//!
//! // Collaborator services: alias-based species resolution, a catalog-backed
//! // default background, and table-backed mapping.
//! let resolver = AliasSpeciesResolver::new();
//! let backgrounds = GeneCatalogBackground::new().with_catalog(Species::human(), genes);
//! let orthologs = OrthologTable::new(Species::human(), Species::human());
//! let synonyms = SynonymTable::new(Species::human());
//! let datasets =
//!     TableDatasetStandardizer::new(OrthologTable::new(Species::mouse(), Species::human()));
//!
//! let reconciler = GeneListReconciler::new(Collaborators {
//!     species: &resolver,
//!     background: &backgrounds,
//!     datasets: &datasets,
//!     genes: &synonyms,
//!     orthologs: &orthologs,
//! });
//!
//! let request = ReconciliationRequest::new(
//!     dataset,
//!     GeneSet::from_symbols(&["SNAP25", "GFAP", "AIF1", "MBP"]),
//! )
//! .with_genelist_species("human")
//! .with_sct_species("human");
//!
//! let result = reconciler.reconcile(&request).unwrap();
//! assert!(result.hits.is_disjoint_from(&result.background));
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Core data types for gene sets, datasets, and the engine boundary
//! - [`reconcile`]: The reconciliation engine and error taxonomy
//! - [`species`]: Species label resolution
//! - [`background`]: Background gene-set construction
//! - [`mapping`]: Ortholog, symbol, and dataset mapping services

pub mod background;
pub mod core;
pub mod mapping;
pub mod reconcile;
pub mod species;

// Re-export commonly used types for convenience
pub use crate::core::dataset::{AnnotationLevel, CellTypeDataset, DatasetShapeError};
pub use crate::core::geneset::GeneSet;
pub use crate::core::request::{ReconciliationRequest, ReconciliationResult};
pub use crate::core::types::{MappingMethod, Species};
pub use crate::reconcile::engine::{
    Collaborators, GeneListReconciler, ReconcilerConfig, MIN_HIT_GENES,
};
pub use crate::reconcile::error::{CollaboratorError, ReconcileError};
