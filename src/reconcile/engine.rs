use tracing::{debug, warn};

use crate::background::BackgroundBuilder;
use crate::core::geneset::GeneSet;
use crate::core::request::{ReconciliationRequest, ReconciliationResult};
use crate::core::types::MappingMethod;
use crate::mapping::{DatasetStandardizer, GeneStandardizer, OrthologMapper};
use crate::reconcile::error::{CollaboratorError, ReconcileError};
use crate::species::SpeciesResolver;

/// Minimum number of hit genes that must survive filtering
///
/// Below this, downstream enrichment statistics are unreliable, so the
/// pipeline fails rather than returning a small list.
pub const MIN_HIT_GENES: usize = 4;

/// The five external services the reconciler orchestrates
///
/// All of them are treated as blocking calls; every pipeline step consumes the
/// previous step's output, so there is nothing to run concurrently.
pub struct Collaborators<'a> {
    pub species: &'a dyn SpeciesResolver,
    pub background: &'a dyn BackgroundBuilder,
    pub datasets: &'a dyn DatasetStandardizer,
    pub genes: &'a dyn GeneStandardizer,
    pub orthologs: &'a dyn OrthologMapper,
}

/// Configuration for the reconciler
#[derive(Debug, Clone, Default)]
pub struct ReconcilerConfig {
    /// Method handed to the ortholog mapper for hit-list projection
    pub mapping_method: MappingMethod,
}

/// Reconciles a hit list, a background, and a reference dataset into a
/// consistent gene universe
///
/// The pipeline is strictly sequential: resolve species, build the
/// background, standardize the dataset when its species differs from the
/// output species, project the hit list, then apply four ordered filtering
/// stages. The step order is load-bearing: reordering changes which genes
/// survive, so each invariant is checked right where the step that
/// establishes it runs.
pub struct GeneListReconciler<'a> {
    collaborators: Collaborators<'a>,
    config: ReconcilerConfig,
}

impl<'a> GeneListReconciler<'a> {
    /// Create a reconciler with default configuration
    pub fn new(collaborators: Collaborators<'a>) -> Self {
        Self {
            collaborators,
            config: ReconcilerConfig::default(),
        }
    }

    /// Create a reconciler with custom configuration
    pub fn with_config(collaborators: Collaborators<'a>, config: ReconcilerConfig) -> Self {
        Self {
            collaborators,
            config,
        }
    }

    /// Run the full reconciliation pipeline
    ///
    /// The request is only read; all returned collections are fresh.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError::Configuration`] for mutually inconsistent
    /// parameters, [`ReconcileError::InsufficientData`] when fewer than
    /// [`MIN_HIT_GENES`] hits survive, [`ReconcileError::Collaborator`] when
    /// an external service fails, and [`ReconcileError::InvariantViolation`]
    /// if a post-filter assertion is ever broken.
    pub fn reconcile(
        &self,
        request: &ReconciliationRequest,
    ) -> Result<ReconciliationResult, ReconcileError> {
        // Species resolution comes first: everything downstream, the
        // background builder included, needs normalized labels.
        let resolved = self
            .collaborators
            .species
            .resolve(
                request.genelist_species.as_deref(),
                request.sct_species.as_deref(),
            )
            .map_err(|source| collaborator("species resolution", source))?;
        debug!(
            genelist_species = %resolved.genelist_species,
            sct_species = %resolved.sct_species,
            "species resolved"
        );

        // Gene-size-control statistics are calibrated on human genetics and
        // are invalid for other species' hit lists.
        if request.gene_size_control && !resolved.genelist_species.is_human() {
            return Err(ReconcileError::Configuration(
                "geneSizeControl requires genelistSpecies=human".to_string(),
            ));
        }

        let background = self
            .collaborators
            .background
            .build(
                &resolved.sct_species,
                &resolved.genelist_species,
                &request.output_species,
                request.background.as_ref(),
            )
            .map_err(|source| collaborator("background construction", source))?;
        debug!(n_genes = background.len(), "background constructed");

        // The dataset is passed through unchanged when its species already
        // matches the output namespace.
        let dataset = if resolved.sct_species != request.output_species {
            self.collaborators
                .datasets
                .standardize_dataset(&request.dataset, &resolved.sct_species, &request.output_species)
                .map_err(|source| collaborator("dataset standardization", source))?
        } else {
            request.dataset.clone()
        };
        let sct_genes = dataset.gene_universe().ok_or_else(|| {
            ReconcileError::Configuration("reference dataset contains no annotation levels".to_string())
        })?;
        debug!(n_genes = sct_genes.len(), "reference gene universe extracted");

        let hits = self.project_hits(request, &resolved)?;
        debug!(n_genes = hits.len(), "hits projected to output species");

        // Confine hits to the background, then re-check the subset relation.
        // The filter just established it, so the check should be unreachable;
        // it stays so a future reordering of the pipeline fails loudly
        // instead of silently biasing the downstream test.
        let hits = restrict(&hits, &background, "hits", "background");
        check_subset(&hits, &background, "hit/background restriction")?;

        let sct_genes = restrict(&sct_genes, &background, "reference genes", "background");
        check_subset(&sct_genes, &background, "reference/background restriction")?;

        if hits.len() < MIN_HIT_GENES {
            return Err(ReconcileError::InsufficientData(
                "at least four genes present in both the reference dataset and background are required"
                    .to_string(),
            ));
        }

        // Under gene-size control the hit list and background deliberately
        // range beyond the genes measured in the dataset: the statistic needs
        // the full human-genetics background distribution.
        let (hits, background) = if request.gene_size_control {
            (hits, background)
        } else {
            (
                restrict(&hits, &sct_genes, "hits", "reference genes"),
                restrict(&background, &sct_genes, "background", "reference genes"),
            )
        };

        // A background that could redraw a true hit would bias any
        // null-distribution sampling toward the null.
        let background = background.minus(&hits);

        Ok(ReconciliationResult {
            hits,
            sct_genes,
            dataset,
            background,
            genelist_species: resolved.genelist_species,
            sct_species: resolved.sct_species,
            output_species: request.output_species.clone(),
        })
    }

    /// Project the de-duplicated hit list into the output species' namespace
    ///
    /// Same-species hits are canonicalized only when `standardise` is set;
    /// otherwise they go through the ortholog mapper even though the species
    /// already match, relying on the mapper's identity-like behavior for
    /// same-species input. The two paths invoke different services with
    /// different mapping semantics, so the condition must stay exactly this.
    fn project_hits(
        &self,
        request: &ReconciliationRequest,
        resolved: &crate::species::ResolvedSpecies,
    ) -> Result<GeneSet, ReconcileError> {
        let hits = request.hits.deduplicated();
        if hits.len() < request.hits.len() {
            debug!(
                n_duplicates = request.hits.len() - hits.len(),
                "duplicate hit symbols removed"
            );
        }

        if resolved.genelist_species == request.output_species && request.standardise {
            let standardized = self
                .collaborators
                .genes
                .standardize_genes(hits.as_slice(), &resolved.genelist_species)
                .map_err(|source| collaborator("gene standardization", source))?;
            Ok(standardized.into_iter().map(|g| g.name).collect())
        } else {
            let mapped = self
                .collaborators
                .orthologs
                .map_orthologs(
                    hits.as_slice(),
                    &resolved.genelist_species,
                    &request.output_species,
                    self.config.mapping_method,
                )
                .map_err(|source| collaborator("ortholog mapping", source))?;
            Ok(mapped.into_iter().map(|r| r.ortholog).collect())
        }
    }
}

fn collaborator(stage: &'static str, source: CollaboratorError) -> ReconcileError {
    ReconcileError::Collaborator { stage, source }
}

/// Filter `set` down to members of `universe`, logging what was dropped
fn restrict(set: &GeneSet, universe: &GeneSet, what: &str, within: &str) -> GeneSet {
    let kept = set.retained_in(universe);
    let dropped = set.len() - kept.len();
    if dropped > 0 {
        warn!(what, within, dropped, kept = kept.len(), "genes dropped by restriction");
    }
    kept
}

/// Assert the subset relation the preceding filter established
fn check_subset(
    subset: &GeneSet,
    superset: &GeneSet,
    stage: &'static str,
) -> Result<(), ReconcileError> {
    if subset.is_subset_of(superset) {
        return Ok(());
    }
    let outside = subset.minus(superset).len();
    Err(ReconcileError::InvariantViolation {
        stage,
        detail: format!("{outside} genes remain outside the filtered universe"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::background::GeneCatalogBackground;
    use crate::core::dataset::{AnnotationLevel, CellTypeDataset};
    use crate::core::types::Species;
    use crate::mapping::{OrthologTable, SynonymTable, TableDatasetStandardizer};
    use crate::species::AliasSpeciesResolver;

    const HUMAN_GENES: [&str; 6] = ["SNAP25", "GFAP", "AIF1", "MBP", "SLC17A7", "GAD1"];

    fn human_dataset(genes: &[&str]) -> CellTypeDataset {
        CellTypeDataset::new(vec![AnnotationLevel::new(
            "level1",
            genes.iter().map(|g| (*g).to_string()).collect(),
            vec!["neuron".to_string(), "astrocyte".to_string()],
            vec![vec![2.0, 0.1]; genes.len()],
        )])
    }

    struct Fixture {
        resolver: AliasSpeciesResolver,
        background: GeneCatalogBackground,
        identity: OrthologTable,
        synonyms: SynonymTable,
        datasets: TableDatasetStandardizer,
    }

    impl Fixture {
        fn human() -> Self {
            let catalog: Vec<String> = HUMAN_GENES.iter().map(|g| (*g).to_string()).collect();
            Self {
                resolver: AliasSpeciesResolver::new(),
                background: GeneCatalogBackground::new()
                    .with_catalog(Species::human(), catalog),
                identity: OrthologTable::new(Species::human(), Species::human()),
                synonyms: SynonymTable::new(Species::human()),
                datasets: TableDatasetStandardizer::new(OrthologTable::new(
                    Species::mouse(),
                    Species::human(),
                )),
            }
        }

        fn collaborators(&self) -> Collaborators<'_> {
            Collaborators {
                species: &self.resolver,
                background: &self.background,
                datasets: &self.datasets,
                genes: &self.synonyms,
                orthologs: &self.identity,
            }
        }
    }

    fn human_request(hits: &[&str]) -> ReconciliationRequest {
        ReconciliationRequest::new(human_dataset(&HUMAN_GENES), GeneSet::from_symbols(hits))
            .with_genelist_species("human")
            .with_sct_species("human")
    }

    #[test]
    fn test_same_species_identity_flow() {
        let fixture = Fixture::human();
        let reconciler = GeneListReconciler::new(fixture.collaborators());

        let result = reconciler
            .reconcile(&human_request(&["SNAP25", "GFAP", "AIF1", "MBP", "SLC17A7"]))
            .unwrap();

        assert_eq!(
            result.hits,
            GeneSet::from_symbols(&["SNAP25", "GFAP", "AIF1", "MBP", "SLC17A7"])
        );
        assert_eq!(result.background, GeneSet::from_symbols(&["GAD1"]));
        assert!(result.hits.is_disjoint_from(&result.background));
        assert_eq!(result.genelist_species, Species::human());
        assert_eq!(result.output_species, Species::human());
    }

    #[test]
    fn test_min_hits_gate_message() {
        let fixture = Fixture::human();
        let reconciler = GeneListReconciler::new(fixture.collaborators());

        let err = reconciler
            .reconcile(&human_request(&["SNAP25", "GFAP", "AIF1"]))
            .unwrap_err();

        match err {
            ReconcileError::InsufficientData(reason) => {
                assert_eq!(
                    reason,
                    "at least four genes present in both the reference dataset and background are required"
                );
            }
            other => panic!("expected InsufficientData, got {other:?}"),
        }
    }

    #[test]
    fn test_gene_size_control_rejected_for_mouse_list() {
        let fixture = Fixture::human();
        let reconciler = GeneListReconciler::new(fixture.collaborators());

        let request = human_request(&["SNAP25", "GFAP", "AIF1", "MBP"])
            .with_genelist_species("mouse")
            .with_gene_size_control(true);
        let err = reconciler.reconcile(&request).unwrap_err();
        assert!(matches!(err, ReconcileError::Configuration(_)));
    }

    #[test]
    fn test_gene_size_control_skips_reference_restriction() {
        // OR4F5 is in the background catalog but not measured by the dataset
        let mut fixture = Fixture::human();
        let mut catalog: Vec<String> = HUMAN_GENES.iter().map(|g| (*g).to_string()).collect();
        catalog.push("OR4F5".to_string());
        fixture.background =
            GeneCatalogBackground::new().with_catalog(Species::human(), catalog);
        let reconciler = GeneListReconciler::new(fixture.collaborators());

        let request = human_request(&["SNAP25", "GFAP", "AIF1", "MBP"]).with_gene_size_control(true);
        let result = reconciler.reconcile(&request).unwrap();
        assert!(result.background.contains("OR4F5"));

        let request = human_request(&["SNAP25", "GFAP", "AIF1", "MBP"]);
        let result = reconciler.reconcile(&request).unwrap();
        assert!(!result.background.contains("OR4F5"));
    }

    #[test]
    fn test_empty_dataset_is_configuration_error() {
        let fixture = Fixture::human();
        let reconciler = GeneListReconciler::new(fixture.collaborators());

        let request = ReconciliationRequest::new(
            CellTypeDataset::new(vec![]),
            GeneSet::from_symbols(&["SNAP25", "GFAP", "AIF1", "MBP"]),
        )
        .with_genelist_species("human")
        .with_sct_species("human");

        let err = reconciler.reconcile(&request).unwrap_err();
        match err {
            ReconcileError::Configuration(reason) => {
                assert!(reason.contains("no annotation levels"));
            }
            other => panic!("expected Configuration, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_hits_are_deduplicated() {
        let fixture = Fixture::human();
        let reconciler = GeneListReconciler::new(fixture.collaborators());

        let result = reconciler
            .reconcile(&human_request(&[
                "SNAP25", "GFAP", "SNAP25", "AIF1", "MBP", "GFAP",
            ]))
            .unwrap();
        assert_eq!(
            result.hits,
            GeneSet::from_symbols(&["SNAP25", "GFAP", "AIF1", "MBP"])
        );
    }

    #[test]
    fn test_user_background_restricts_universe() {
        let fixture = Fixture::human();
        let reconciler = GeneListReconciler::new(fixture.collaborators());

        // SLC17A7 is measured by the dataset but missing from the user
        // background, so it must not appear in sct_genes either.
        let request = human_request(&["SNAP25", "GFAP", "AIF1", "MBP"]).with_background(
            GeneSet::from_symbols(&["SNAP25", "GFAP", "AIF1", "MBP", "GAD1"]),
        );
        let result = reconciler.reconcile(&request).unwrap();
        assert!(!result.sct_genes.contains("SLC17A7"));
        assert_eq!(result.background, GeneSet::from_symbols(&["GAD1"]));
    }

    #[test]
    fn test_check_subset_reports_violation() {
        let subset = GeneSet::from_symbols(&["A", "B"]);
        let superset = GeneSet::from_symbols(&["A"]);
        let err = check_subset(&subset, &superset, "hit/background restriction").unwrap_err();
        match err {
            ReconcileError::InvariantViolation { stage, detail } => {
                assert_eq!(stage, "hit/background restriction");
                assert!(detail.contains('1'));
            }
            other => panic!("expected InvariantViolation, got {other:?}"),
        }
    }

    #[test]
    fn test_restrict_keeps_order() {
        let set = GeneSet::from_symbols(&["C", "A", "B"]);
        let universe = GeneSet::from_symbols(&["A", "C"]);
        assert_eq!(
            restrict(&set, &universe, "hits", "background"),
            GeneSet::from_symbols(&["C", "A"])
        );
    }
}
