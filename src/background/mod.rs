//! Background gene-set construction.
//!
//! The background is the universe of genes hits are compared against. A
//! [`BackgroundBuilder`] either validates a user-supplied background or
//! constructs a default one for the species pair. The bundled
//! [`GeneCatalogBackground`] builds the default as the union of per-species
//! gene catalogs supplied by the caller; the crate itself knows no annotation
//! catalogs.

use std::collections::HashMap;

use tracing::debug;

use crate::core::geneset::GeneSet;
use crate::core::types::Species;
use crate::reconcile::error::CollaboratorError;

/// Constructs or validates the background gene set for one run
pub trait BackgroundBuilder {
    /// Build the working background
    ///
    /// Called with the resolved dataset and hit-list species plus the output
    /// species; when `user_background` is given it takes precedence over any
    /// constructed default. The returned symbols must be expressed in
    /// `output_species`' namespace.
    ///
    /// # Errors
    ///
    /// Returns a [`CollaboratorError`] when no background can be produced for
    /// the species pair.
    fn build(
        &self,
        sct_species: &Species,
        genelist_species: &Species,
        output_species: &Species,
        user_background: Option<&GeneSet>,
    ) -> Result<GeneSet, CollaboratorError>;
}

/// Union-of-catalogs background builder
///
/// Holds one gene catalog per species, each already expressed in the output
/// species' namespace (projecting a catalog across species is the caller's
/// concern when registering it). With a user background the builder only
/// de-duplicates and validates it; otherwise it returns the de-duplicated
/// union of the dataset species' and hit-list species' catalogs, dataset
/// catalog first.
#[derive(Debug, Clone, Default)]
pub struct GeneCatalogBackground {
    catalogs: HashMap<Species, Vec<String>>,
}

impl GeneCatalogBackground {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the catalog for one species
    #[must_use]
    pub fn with_catalog(mut self, species: Species, genes: Vec<String>) -> Self {
        self.catalogs.insert(species, genes);
        self
    }

    fn catalog_for(&self, species: &Species) -> Result<&[String], CollaboratorError> {
        self.catalogs
            .get(species)
            .map(Vec::as_slice)
            .ok_or_else(|| CollaboratorError::new(format!("no gene catalog registered for {species}")))
    }
}

impl BackgroundBuilder for GeneCatalogBackground {
    fn build(
        &self,
        sct_species: &Species,
        genelist_species: &Species,
        output_species: &Species,
        user_background: Option<&GeneSet>,
    ) -> Result<GeneSet, CollaboratorError> {
        if let Some(user) = user_background {
            let background = user.deduplicated();
            if background.is_empty() {
                return Err(CollaboratorError::new("user-supplied background is empty"));
            }
            debug!(n_genes = background.len(), "using user-supplied background");
            return Ok(background);
        }

        let mut union: Vec<String> = self.catalog_for(sct_species)?.to_vec();
        if genelist_species != sct_species {
            union.extend_from_slice(self.catalog_for(genelist_species)?);
        }
        let background = GeneSet::new(union).deduplicated();
        if background.is_empty() {
            return Err(CollaboratorError::new(format!(
                "default background for {sct_species}/{genelist_species} in {output_species} is empty"
            )));
        }
        debug!(n_genes = background.len(), "default background constructed");
        Ok(background)
    }
}
