use serde::{Deserialize, Serialize};

use crate::core::geneset::GeneSet;

/// Shape problems detected in a cell-type dataset
#[derive(Debug, thiserror::Error)]
pub enum DatasetShapeError {
    #[error("dataset contains no annotation levels")]
    NoLevels,
    #[error("level {level}: {genes} gene rows but {rows} matrix rows")]
    RowCountMismatch {
        level: String,
        genes: usize,
        rows: usize,
    },
    #[error("level {level}, row {row}: {cell_types} cell-type columns but {columns} matrix columns")]
    ColumnCountMismatch {
        level: String,
        row: usize,
        cell_types: usize,
        columns: usize,
    },
}

/// One annotation level of a cell-type dataset
///
/// Holds a matrix of mean expression values with gene rows and cell-type
/// columns. Datasets commonly carry several levels at different annotation
/// granularities (e.g. broad classes, then subtypes); each level shares the
/// same gene rows in practice, which is why the reconciler reads the gene
/// universe from the first level only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationLevel {
    /// Level name (e.g. "level1")
    pub name: String,

    /// Gene symbols identifying the matrix rows
    pub genes: Vec<String>,

    /// Cell-type names identifying the matrix columns
    pub cell_types: Vec<String>,

    /// Row-major mean expression: `mean_exp[row][column]` is the mean
    /// expression of `genes[row]` in `cell_types[column]`
    pub mean_exp: Vec<Vec<f64>>,
}

impl AnnotationLevel {
    pub fn new(
        name: impl Into<String>,
        genes: Vec<String>,
        cell_types: Vec<String>,
        mean_exp: Vec<Vec<f64>>,
    ) -> Self {
        Self {
            name: name.into(),
            genes,
            cell_types,
            mean_exp,
        }
    }

    /// Check that the matrix dimensions agree with the row/column labels
    pub fn validate(&self) -> Result<(), DatasetShapeError> {
        if self.genes.len() != self.mean_exp.len() {
            return Err(DatasetShapeError::RowCountMismatch {
                level: self.name.clone(),
                genes: self.genes.len(),
                rows: self.mean_exp.len(),
            });
        }
        for (row, values) in self.mean_exp.iter().enumerate() {
            if values.len() != self.cell_types.len() {
                return Err(DatasetShapeError::ColumnCountMismatch {
                    level: self.name.clone(),
                    row,
                    cell_types: self.cell_types.len(),
                    columns: values.len(),
                });
            }
        }
        Ok(())
    }
}

/// A reference cell-type expression dataset
///
/// A collection of [`AnnotationLevel`] records, implicitly tagged with the
/// species its gene rows are expressed in. The reconciler either passes a
/// dataset through unchanged or replaces it with a species-converted copy; it
/// never mutates one in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellTypeDataset {
    pub levels: Vec<AnnotationLevel>,
}

impl CellTypeDataset {
    #[must_use]
    pub fn new(levels: Vec<AnnotationLevel>) -> Self {
        Self { levels }
    }

    #[must_use]
    pub fn n_levels(&self) -> usize {
        self.levels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// The gene universe measured by this dataset: the ordered row identifiers
    /// of the first annotation level. `None` when the dataset has no levels.
    #[must_use]
    pub fn gene_universe(&self) -> Option<GeneSet> {
        self.levels
            .first()
            .map(|level| GeneSet::new(level.genes.clone()))
    }

    /// Validate every level's matrix shape
    pub fn validate(&self) -> Result<(), DatasetShapeError> {
        if self.levels.is_empty() {
            return Err(DatasetShapeError::NoLevels);
        }
        for level in &self.levels {
            level.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_level(name: &str, genes: &[&str]) -> AnnotationLevel {
        AnnotationLevel::new(
            name,
            genes.iter().map(|g| (*g).to_string()).collect(),
            vec!["neuron".to_string(), "astrocyte".to_string()],
            vec![vec![1.0, 0.5]; genes.len()],
        )
    }

    #[test]
    fn test_gene_universe_uses_first_level() {
        let dataset = CellTypeDataset::new(vec![
            small_level("level1", &["A", "B", "C"]),
            small_level("level2", &["X", "Y"]),
        ]);
        assert_eq!(
            dataset.gene_universe().unwrap(),
            GeneSet::from_symbols(&["A", "B", "C"])
        );
    }

    #[test]
    fn test_gene_universe_empty_dataset() {
        let dataset = CellTypeDataset::new(vec![]);
        assert!(dataset.gene_universe().is_none());
        assert!(dataset.is_empty());
    }

    #[test]
    fn test_validate_ok() {
        let dataset = CellTypeDataset::new(vec![small_level("level1", &["A", "B"])]);
        assert!(dataset.validate().is_ok());
    }

    #[test]
    fn test_validate_no_levels() {
        let err = CellTypeDataset::new(vec![]).validate().unwrap_err();
        assert!(matches!(err, DatasetShapeError::NoLevels));
    }

    #[test]
    fn test_validate_row_mismatch() {
        let mut level = small_level("level1", &["A", "B"]);
        level.mean_exp.pop();
        let err = CellTypeDataset::new(vec![level]).validate().unwrap_err();
        assert!(matches!(err, DatasetShapeError::RowCountMismatch { .. }));
    }

    #[test]
    fn test_validate_column_mismatch() {
        let mut level = small_level("level1", &["A", "B"]);
        level.mean_exp[1].push(0.9);
        let err = CellTypeDataset::new(vec![level]).validate().unwrap_err();
        assert!(matches!(
            err,
            DatasetShapeError::ColumnCountMismatch { row: 1, .. }
        ));
    }

    #[test]
    fn test_serde_round_trip() {
        let dataset = CellTypeDataset::new(vec![small_level("level1", &["A"])]);
        let json = serde_json::to_string(&dataset).unwrap();
        let back: CellTypeDataset = serde_json::from_str(&json).unwrap();
        assert_eq!(back, dataset);
    }
}
