//! Core data types for gene-list reconciliation.
//!
//! This module provides the fundamental types used throughout the library:
//!
//! - [`GeneSet`]: An ordered list of gene symbols with membership filtering
//! - [`CellTypeDataset`], [`AnnotationLevel`]: Reference cell-type expression data
//! - [`ReconciliationRequest`], [`ReconciliationResult`]: The engine's boundary types
//! - [`Species`], [`MappingMethod`]: Species and ortholog-mapping identifiers
//!
//! ## Gene symbols
//!
//! A gene symbol is an opaque string in one species' namespace; equality is
//! exact string match. Symbols only become comparable across lists after the
//! collaborator services have normalized them into a common namespace, which
//! is what the reconciler orchestrates.

pub mod dataset;
pub mod geneset;
pub mod request;
pub mod types;

pub use dataset::{AnnotationLevel, CellTypeDataset, DatasetShapeError};
pub use geneset::GeneSet;
pub use request::{ReconciliationRequest, ReconciliationResult};
pub use types::{MappingMethod, Species};
