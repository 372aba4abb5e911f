//! The gene-list reconciliation engine.
//!
//! This module provides the core pipeline:
//!
//! - [`GeneListReconciler`]: Main entry point; runs the ordered pipeline
//! - [`Collaborators`]: The five external services the engine orchestrates
//! - [`ReconcileError`]: The fatal error taxonomy
//!
//! ## Pipeline
//!
//! A reconciliation is a fixed sequence of fallible steps, each consuming the
//! previous step's output:
//!
//! 1. **Species resolution**: normalize the two species labels, then reject
//!    gene-size control for non-human hit lists
//! 2. **Background construction**: build or validate the background universe
//! 3. **Dataset standardization**: convert the reference dataset's gene rows
//!    to the output species when needed, and read off its gene universe
//! 4. **Hit projection**: de-duplicate, then either canonicalize
//!    (same species + `standardise`) or map orthologs
//! 5. **Restriction to background**: hits, then reference genes, each with a
//!    co-located subset assertion
//! 6. **Minimum-hits gate**: at least [`MIN_HIT_GENES`] hits must remain
//! 7. **Restriction to the reference universe**: skipped under gene-size
//!    control
//! 8. **Disjointness**: every hit is removed from the background
//!
//! The order is deliberate and observable: moving a filter changes which
//! genes survive. Each invariant check lives next to the step that
//! establishes it.

pub mod engine;
pub mod error;

pub use engine::{Collaborators, GeneListReconciler, ReconcilerConfig, MIN_HIT_GENES};
pub use error::{CollaboratorError, ReconcileError};
