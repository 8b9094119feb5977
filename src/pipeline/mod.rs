//! Pipeline orchestration
//!
//! Wires the five grouping stages together: parse the category catalog,
//! build the crosswalk index, classify the extract, aggregate into the
//! presence matrix, then apply the hierarchy rules. Any fatal error aborts
//! the run before output is produced.

use std::fs;
use std::time::Instant;

use log::info;

use crate::aggregate::CategoryAggregator;
use crate::classify::DiagnosisClassifier;
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::hierarchy::HierarchyEngine;
use crate::loader;
use crate::models::matrix::PresenceMatrix;
use crate::parse::{CrosswalkIndex, parse_hierarchy_rules, parse_label_catalog};
use crate::utils::logging::progress::create_rule_progress_bar;
use crate::utils::logging::{log_artifact_complete, log_artifact_start};

/// Artifact names used in parse-error reporting
const LABEL_ARTIFACT: &str = "category labels";
const CROSSWALK_ARTIFACT: &str = "crosswalk";
const HIERARCHY_ARTIFACT: &str = "hierarchy rules";

/// Run the full grouping pipeline and return the final category matrix.
///
/// # Errors
/// `Config` before the pipeline starts if the configuration is invalid,
/// `Parse`/`SchemaMismatch`/`Io` from the individual stages. All artifact
/// parsing is all-or-nothing; nothing is returned on any fatal error.
pub fn run(config: &PipelineConfig) -> Result<PresenceMatrix> {
    config.validate()?;
    let start = Instant::now();

    log_artifact_start(LABEL_ARTIFACT, &config.label_path);
    let label_text = fs::read_to_string(&config.label_path)?;
    let catalog = parse_label_catalog(&label_text, LABEL_ARTIFACT)?;
    log_artifact_complete(LABEL_ARTIFACT, catalog.len(), None);

    log_artifact_start(CROSSWALK_ARTIFACT, &config.crosswalk_path);
    let crosswalk_text = fs::read_to_string(&config.crosswalk_path)?;
    let crosswalk = CrosswalkIndex::parse(&crosswalk_text, CROSSWALK_ARTIFACT)?;
    log_artifact_complete(CROSSWALK_ARTIFACT, crosswalk.len(), None);

    log_artifact_start(HIERARCHY_ARTIFACT, &config.hierarchy_path);
    let hierarchy_text = fs::read_to_string(&config.hierarchy_path)?;
    let rules = parse_hierarchy_rules(&hierarchy_text, HIERARCHY_ARTIFACT)?;
    let engine = HierarchyEngine::new(rules, &catalog)?;
    log_artifact_complete(HIERARCHY_ARTIFACT, engine.rules().len(), None);

    let records = loader::load_extract(&config.extract_path)?;

    let mut classifier = DiagnosisClassifier::new(&crosswalk);
    let classified = classifier.classify_all(&records);

    let aggregator = CategoryAggregator::new(config.occurrence_threshold);
    let mut matrix = aggregator.aggregate(&classified, &catalog);
    info!(
        "presence matrix: {} patients x {} categories, {} cells set",
        matrix.num_patients(),
        matrix.num_categories(),
        matrix.ones()
    );

    let cleared = if config.show_progress {
        let bar = create_rule_progress_bar(engine.rules().len() as u64);
        let cleared = engine.apply_with_progress(&mut matrix, &bar);
        bar.finish_and_clear();
        cleared
    } else {
        engine.apply(&mut matrix)
    };
    info!(
        "hierarchy pass cleared {} cells; pipeline finished in {:?}",
        cleared,
        start.elapsed()
    );

    Ok(matrix)
}
