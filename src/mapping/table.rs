//! Lookup-table implementations of the mapping traits.
//!
//! Each table is built from caller-supplied pairs (e.g. exported from an
//! orthology resource) and performs pure lookups; no orthology is computed
//! here.

use std::collections::{HashMap, HashSet};

use tracing::warn;

use crate::core::dataset::{AnnotationLevel, CellTypeDataset};
use crate::core::types::{MappingMethod, Species};
use crate::mapping::{
    DatasetStandardizer, GeneStandardizer, OrthologMapper, OrthologRecord, StandardizedGene,
};
use crate::reconcile::error::CollaboratorError;

/// Ortholog lookup table for one ordered species pair
///
/// Pairs keep their insertion order, so one-to-many fan-out is deterministic.
/// A same-species call is answered as an identity pass without consulting the
/// table; any other species pair than the one the table was built for is
/// rejected. The mapping method is accepted for interface compatibility but
/// not checked: a table is typically the exported output of one method.
#[derive(Debug, Clone)]
pub struct OrthologTable {
    from: Species,
    to: Species,
    pairs: Vec<(String, String)>,
    by_input: HashMap<String, Vec<usize>>,
}

impl OrthologTable {
    #[must_use]
    pub fn new(from: Species, to: Species) -> Self {
        Self {
            from,
            to,
            pairs: Vec::new(),
            by_input: HashMap::new(),
        }
    }

    /// Add one input-to-ortholog pair
    #[must_use]
    pub fn with_pair(mut self, input: impl Into<String>, ortholog: impl Into<String>) -> Self {
        let input = input.into();
        let idx = self.pairs.len();
        self.pairs.push((input.clone(), ortholog.into()));
        self.by_input.entry(input).or_default().push(idx);
        self
    }

    /// Build a table from a pair slice; convenient for fixtures and tests
    #[must_use]
    pub fn from_pairs(from: Species, to: Species, pairs: &[(&str, &str)]) -> Self {
        pairs
            .iter()
            .fold(Self::new(from, to), |table, (input, ortholog)| {
                table.with_pair(*input, *ortholog)
            })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Orthologs of one symbol, in insertion order
    #[must_use]
    pub fn orthologs_of(&self, symbol: &str) -> Vec<&str> {
        self.by_input
            .get(symbol)
            .map(|indices| indices.iter().map(|&i| self.pairs[i].1.as_str()).collect())
            .unwrap_or_default()
    }

    /// The single ortholog of a symbol, `None` when unmapped or ambiguous
    #[must_use]
    pub fn unique_ortholog(&self, symbol: &str) -> Option<&str> {
        let orthologs = self.orthologs_of(symbol);
        if orthologs.len() == 1 {
            Some(orthologs[0])
        } else {
            None
        }
    }

    fn check_pair(&self, from: &Species, to: &Species) -> Result<(), CollaboratorError> {
        if from == &self.from && to == &self.to {
            Ok(())
        } else {
            Err(CollaboratorError::new(format!(
                "ortholog table covers {} -> {}, not {} -> {}",
                self.from, self.to, from, to
            )))
        }
    }
}

impl OrthologMapper for OrthologTable {
    fn map_orthologs(
        &self,
        genes: &[String],
        from: &Species,
        to: &Species,
        _method: MappingMethod,
    ) -> Result<Vec<OrthologRecord>, CollaboratorError> {
        if from == to {
            return Ok(genes
                .iter()
                .map(|g| OrthologRecord {
                    input: g.clone(),
                    ortholog: g.clone(),
                })
                .collect());
        }
        self.check_pair(from, to)?;

        let mut records = Vec::with_capacity(genes.len());
        let mut unmapped = 0usize;
        for gene in genes {
            let orthologs = self.orthologs_of(gene);
            if orthologs.is_empty() {
                unmapped += 1;
                continue;
            }
            for ortholog in orthologs {
                records.push(OrthologRecord {
                    input: gene.clone(),
                    ortholog: ortholog.to_string(),
                });
            }
        }
        if unmapped > 0 {
            warn!(unmapped, from = %from, to = %to, "genes without orthologs dropped");
        }
        Ok(records)
    }
}

/// Synonym lookup table canonicalizing symbols within one species
#[derive(Debug, Clone)]
pub struct SynonymTable {
    species: Species,
    canonical: HashSet<String>,
    synonyms: HashMap<String, String>,
}

impl SynonymTable {
    #[must_use]
    pub fn new(species: Species) -> Self {
        Self {
            species,
            canonical: HashSet::new(),
            synonyms: HashMap::new(),
        }
    }

    /// Register a canonical symbol; it standardizes to itself
    #[must_use]
    pub fn with_canonical(mut self, symbol: impl Into<String>) -> Self {
        self.canonical.insert(symbol.into());
        self
    }

    /// Register a synonym for a canonical symbol
    #[must_use]
    pub fn with_synonym(mut self, synonym: impl Into<String>, canonical: impl Into<String>) -> Self {
        let canonical = canonical.into();
        self.canonical.insert(canonical.clone());
        self.synonyms.insert(synonym.into(), canonical);
        self
    }
}

impl GeneStandardizer for SynonymTable {
    fn standardize_genes(
        &self,
        genes: &[String],
        species: &Species,
    ) -> Result<Vec<StandardizedGene>, CollaboratorError> {
        if species != &self.species {
            return Err(CollaboratorError::new(format!(
                "synonym table covers {}, not {}",
                self.species, species
            )));
        }

        let mut out = Vec::with_capacity(genes.len());
        let mut dropped = 0usize;
        for gene in genes {
            if self.canonical.contains(gene) {
                out.push(StandardizedGene {
                    input: gene.clone(),
                    name: gene.clone(),
                });
            } else if let Some(canonical) = self.synonyms.get(gene) {
                out.push(StandardizedGene {
                    input: gene.clone(),
                    name: canonical.clone(),
                });
            } else {
                dropped += 1;
            }
        }
        if dropped > 0 {
            warn!(dropped, species = %species, "symbols without a canonical name dropped");
        }
        Ok(out)
    }
}

/// Dataset standardizer renaming gene rows through an [`OrthologTable`]
///
/// A row survives only when its symbol has exactly one ortholog and that
/// target symbol has not already been claimed by an earlier row; everything
/// else is dropped. Cell-type columns and expression values are untouched.
#[derive(Debug, Clone)]
pub struct TableDatasetStandardizer {
    table: OrthologTable,
}

impl TableDatasetStandardizer {
    #[must_use]
    pub fn new(table: OrthologTable) -> Self {
        Self { table }
    }
}

impl DatasetStandardizer for TableDatasetStandardizer {
    fn standardize_dataset(
        &self,
        dataset: &CellTypeDataset,
        from: &Species,
        to: &Species,
    ) -> Result<CellTypeDataset, CollaboratorError> {
        if from == to {
            return Ok(dataset.clone());
        }
        self.table.check_pair(from, to)?;

        let mut levels = Vec::with_capacity(dataset.levels.len());
        for level in &dataset.levels {
            let mut genes = Vec::with_capacity(level.genes.len());
            let mut mean_exp = Vec::with_capacity(level.mean_exp.len());
            let mut taken: HashSet<&str> = HashSet::with_capacity(level.genes.len());
            let mut dropped = 0usize;

            for (row, gene) in level.genes.iter().enumerate() {
                match self.table.unique_ortholog(gene) {
                    Some(target) if !taken.contains(target) => {
                        taken.insert(target);
                        genes.push(target.to_string());
                        mean_exp.push(level.mean_exp[row].clone());
                    }
                    _ => dropped += 1,
                }
            }
            if dropped > 0 {
                warn!(
                    level = %level.name,
                    dropped,
                    kept = genes.len(),
                    "rows without a unique unclaimed ortholog dropped"
                );
            }
            levels.push(AnnotationLevel::new(
                level.name.clone(),
                genes,
                level.cell_types.clone(),
                mean_exp,
            ));
        }
        Ok(CellTypeDataset::new(levels))
    }
}
