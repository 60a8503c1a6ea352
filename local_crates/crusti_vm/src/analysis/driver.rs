// crusti_vm
// Copyright (C) 2024  Univ. Artois & CNRS
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.
//
// Contributors:
//   *   CRIL - initial API and implementation

use super::edges::{self, ExcludesEdge, RequiresEdge};
use crate::{FeatureTable, VariabilityModel};
use anyhow::{anyhow, Context, Result};
use crusti_app_helper::info;
use crusti_backbone::{Backbone, BackboneComputation, BackboneDetector, BackboneSolver, Literal, VarId};
use std::ops::Range;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

/// The parallelism assumed when the platform cannot report its own.
const DEFAULT_HARDWARE_PARALLELISM: usize = 4;

const PROGRESS_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// The settings of a strong graph analysis.
///
/// # Examples
///
/// ```
/// use crusti_vm::{AnalysisSettings, BackboneDetector};
///
/// let defaults = AnalysisSettings::default();
/// assert_eq!(1, defaults.n_workers());
/// assert_eq!(BackboneDetector::OneByOne, defaults.detector());
/// ```
#[derive(Clone, Copy, Debug)]
pub struct AnalysisSettings {
    detector: BackboneDetector,
    n_workers: usize,
}

impl AnalysisSettings {
    /// Builds the settings from a backbone detector and a worker count.
    pub fn new(detector: BackboneDetector, n_workers: usize) -> Self {
        AnalysisSettings {
            detector,
            n_workers,
        }
    }

    /// Returns the backbone detection algorithm to use.
    pub fn detector(&self) -> BackboneDetector {
        self.detector
    }

    /// Returns the number of worker threads to use.
    pub fn n_workers(&self) -> usize {
        self.n_workers
    }
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        AnalysisSettings::new(BackboneDetector::default(), 1)
    }
}

/// The result of a strong graph analysis.
///
/// The edge lists are deterministic for a fixed input, worker count and SAT
/// solver: requires edges are sorted by source then target variable, and
/// each excludes pair appears once, smaller endpoint first.
pub struct StrongGraphAnalysis {
    global_backbone: Backbone,
    requires: Vec<RequiresEdge>,
    excludes: Vec<ExcludesEdge>,
}

impl StrongGraphAnalysis {
    /// Returns the backbone of the unconditioned formula.
    pub fn global_backbone(&self) -> &Backbone {
        &self.global_backbone
    }

    /// Returns the requires edges.
    pub fn requires(&self) -> &[RequiresEdge] {
        &self.requires
    }

    /// Returns the excludes edges.
    pub fn excludes(&self) -> &[ExcludesEdge] {
        &self.excludes
    }

    /// Returns the variables selected in every configuration.
    pub fn core_features(&self) -> Vec<VarId> {
        self.fixed_features(true)
    }

    /// Returns the variables selected in no configuration.
    pub fn dead_features(&self) -> Vec<VarId> {
        self.fixed_features(false)
    }

    fn fixed_features(&self, polarity: bool) -> Vec<VarId> {
        self.global_backbone
            .iter_fixed()
            .filter(|l| l.polarity() == polarity)
            .map(|l| l.var_id())
            .collect()
    }
}

/// Computes the strong transitive dependency and conflict graphs of a model.
///
/// The analysis first computes the global backbone of the formula, yielding
/// the core and dead features, then distills the requires and excludes edges
/// of every remaining non-auxiliary variable.
/// An unsatisfiable formula is rejected, as it describes no configuration at
/// all.
///
/// When several workers are requested, the candidate variables are split in
/// contiguous ranges processed by dedicated threads.
/// Each worker owns a solver of its own, loaded ahead of the spawns: SAT
/// solvers touch process-global state while they are brought up, so all of
/// them are built sequentially on the calling thread.
/// Requesting more workers than the hardware parallelism is an error.
pub fn analyze(
    model: &VariabilityModel,
    settings: &AnalysisSettings,
) -> Result<StrongGraphAnalysis> {
    let max_workers = thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(DEFAULT_HARDWARE_PARALLELISM);
    if settings.n_workers() < 1 {
        return Err(anyhow!("the number of workers must be at least 1"));
    }
    if settings.n_workers() > max_workers {
        return Err(anyhow!(
            "requested {} workers but only {} processing units are available",
            settings.n_workers(),
            max_workers
        ));
    }
    info!("computing the core and dead features");
    let mut global_solver = BackboneSolver::load(model.cnf(), settings.detector());
    let global_backbone = match global_solver
        .compute_backbone()
        .context("while computing the global backbone")?
    {
        BackboneComputation::Backbone(b) => b,
        BackboneComputation::Refuted => {
            return Err(anyhow!(
                "the input formula is unsatisfiable; it describes no configuration"
            ))
        }
    };
    let candidates = model.candidate_variables(&global_backbone);
    info!(
        "found {} core and {} dead features; {} candidate variables left",
        global_backbone
            .iter_fixed()
            .filter(|l| l.polarity())
            .count(),
        global_backbone
            .iter_fixed()
            .filter(|l| !l.polarity())
            .count(),
        candidates.len()
    );
    if candidates.is_empty() {
        return Ok(StrongGraphAnalysis {
            global_backbone,
            requires: Vec::new(),
            excludes: Vec::new(),
        });
    }
    let n_workers = usize::min(settings.n_workers(), candidates.len());
    if n_workers > 1 {
        info!("initializing {} backbone solver instances", n_workers);
    }
    let mut solvers = Vec::with_capacity(n_workers);
    for _ in 0..n_workers {
        solvers.push(BackboneSolver::load(model.cnf(), settings.detector()));
    }
    let progress = AtomicUsize::new(0);
    let partitions = partition_ranges(candidates.len(), n_workers);
    let features = model.features();
    let global_ref = &global_backbone;
    let progress_ref = &progress;
    let worker_results: Vec<thread::Result<Result<WorkerOutput>>> = thread::scope(|scope| {
        let handles: Vec<_> = solvers
            .into_iter()
            .zip(partitions.iter())
            .map(|(solver, range)| {
                let partition = &candidates[range.clone()];
                scope.spawn(move || {
                    process_partition(solver, partition, global_ref, features, progress_ref)
                })
            })
            .collect();
        monitor_progress(&handles, &progress, candidates.len());
        handles.into_iter().map(|h| h.join()).collect()
    });
    let mut requires = Vec::new();
    let mut excludes = Vec::new();
    let mut n_consistency_checks = global_solver.n_consistency_checks();
    for (worker_index, result) in worker_results.into_iter().enumerate() {
        match result {
            Err(_) => return Err(anyhow!("worker {} panicked", worker_index)),
            Ok(Err(e)) => {
                return Err(e).with_context(|| format!("in worker {}", worker_index))
            }
            Ok(Ok(output)) => {
                requires.extend(output.requires);
                excludes.extend(output.excludes);
                n_consistency_checks += output.n_consistency_checks;
            }
        }
    }
    info!(
        "found {} requires and {} excludes edges with {} solver calls",
        requires.len(),
        excludes.len(),
        n_consistency_checks
    );
    Ok(StrongGraphAnalysis {
        global_backbone,
        requires,
        excludes,
    })
}

/// Splits `n_candidates` indices in `n_workers` contiguous ranges, giving one
/// extra candidate to the first ranges when the split is uneven.
fn partition_ranges(n_candidates: usize, n_workers: usize) -> Vec<Range<usize>> {
    let base_len = n_candidates / n_workers;
    let n_extended = n_candidates % n_workers;
    let mut ranges = Vec::with_capacity(n_workers);
    let mut next_start = 0;
    for worker_index in 0..n_workers {
        let len = base_len + usize::from(worker_index < n_extended);
        ranges.push(next_start..next_start + len);
        next_start += len;
    }
    ranges
}

struct WorkerOutput {
    requires: Vec<RequiresEdge>,
    excludes: Vec<ExcludesEdge>,
    n_consistency_checks: usize,
}

fn process_partition(
    mut solver: BackboneSolver,
    candidates: &[VarId],
    global_backbone: &Backbone,
    features: &FeatureTable,
    progress: &AtomicUsize,
) -> Result<WorkerOutput> {
    let mut requires = Vec::new();
    let mut excludes = Vec::new();
    for &candidate in candidates {
        let assumption = [Literal::new(candidate, true)];
        let line = match solver.compute_backbone_under(&assumption).with_context(|| {
            format!(
                "while computing the backbone under variable {}",
                candidate.to_dimacs()
            )
        })? {
            BackboneComputation::Backbone(b) => b,
            BackboneComputation::Refuted => {
                return Err(anyhow!(
                    "assuming variable {} refuted a formula it is not dead in",
                    candidate.to_dimacs()
                ))
            }
        };
        edges::extract_edges(
            candidate,
            &line,
            global_backbone,
            features,
            &mut requires,
            &mut excludes,
        );
        progress.fetch_add(1, Ordering::Relaxed);
    }
    Ok(WorkerOutput {
        requires,
        excludes,
        n_consistency_checks: solver.n_consistency_checks(),
    })
}

/// Polls the shared counter and reports the advancement of the workers.
///
/// The poll ends when every worker has reached a terminal state, so that a
/// failing worker cannot leave the driver waiting for a count that will
/// never be reached.
fn monitor_progress<T>(
    handles: &[thread::ScopedJoinHandle<'_, T>],
    progress: &AtomicUsize,
    n_candidates: usize,
) {
    let mut last_reported_decile = 0;
    loop {
        if handles.iter().all(|h| h.is_finished()) {
            break;
        }
        let done = progress.load(Ordering::Relaxed);
        let decile = 10 * done / n_candidates;
        if decile > last_reported_decile {
            info!("progress: {} of {} variables", done, n_candidates);
            last_reported_decile = decile;
        }
        thread::sleep(PROGRESS_POLL_INTERVAL);
    }
    info!(
        "progress: {} of {} variables",
        progress.load(Ordering::Relaxed),
        n_candidates
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DimacsReader;
    use std::io::BufReader;

    fn read_model(content: &str) -> VariabilityModel {
        DimacsReader::default()
            .read(&mut BufReader::new(content.as_bytes()))
            .unwrap()
    }

    fn analyze_with(content: &str, settings: &AnalysisSettings) -> StrongGraphAnalysis {
        analyze(&read_model(content), settings).unwrap()
    }

    fn requires_as_dimacs(analysis: &StrongGraphAnalysis) -> Vec<(usize, usize)> {
        analysis
            .requires()
            .iter()
            .map(|e| (e.source().to_dimacs(), e.target().to_dimacs()))
            .collect()
    }

    fn excludes_as_dimacs(analysis: &StrongGraphAnalysis) -> Vec<(usize, usize)> {
        analysis
            .excludes()
            .iter()
            .map(|e| (e.first().to_dimacs(), e.second().to_dimacs()))
            .collect()
    }

    #[test]
    fn test_single_dependency() {
        // b requires a
        let analysis = analyze_with("p cnf 2 1\n1 -2 0\n", &AnalysisSettings::default());
        assert_eq!(0, analysis.global_backbone().n_fixed());
        assert_eq!(vec![(2, 1)], requires_as_dimacs(&analysis));
        assert!(analysis.excludes().is_empty());
    }

    #[test]
    fn test_mutual_exclusion() {
        let analysis = analyze_with("p cnf 2 1\n-1 -2 0\n", &AnalysisSettings::default());
        assert_eq!(0, analysis.global_backbone().n_fixed());
        assert!(analysis.requires().is_empty());
        assert_eq!(vec![(1, 2)], excludes_as_dimacs(&analysis));
    }

    #[test]
    fn test_core_feature_has_no_edges() {
        let analysis = analyze_with("p cnf 1 1\n1 0\n", &AnalysisSettings::default());
        assert_eq!(vec![VarId::from(0)], analysis.core_features());
        assert!(analysis.dead_features().is_empty());
        assert!(analysis.requires().is_empty());
        assert!(analysis.excludes().is_empty());
    }

    #[test]
    fn test_dead_feature_has_no_edges() {
        let analysis = analyze_with("p cnf 2 2\n1 0\n-1 -2 0\n", &AnalysisSettings::default());
        assert_eq!(vec![VarId::from(0)], analysis.core_features());
        assert_eq!(vec![VarId::from(1)], analysis.dead_features());
        assert!(analysis.requires().is_empty());
        assert!(analysis.excludes().is_empty());
    }

    #[test]
    fn test_transitive_requires() {
        // b requires a, c requires b: the strong edge (c, a) is found as well
        let analysis = analyze_with("p cnf 3 2\n1 -2 0\n2 -3 0\n", &AnalysisSettings::default());
        assert_eq!(vec![(2, 1), (3, 1), (3, 2)], requires_as_dimacs(&analysis));
        assert!(analysis.excludes().is_empty());
    }

    #[test]
    fn test_auxiliary_mediated_requires() {
        // b implies aux_1, aux_1 implies a: only (b, a) is reported
        let content = "c 1 a\nc 2 b\nc 3 aux_1\np cnf 3 2\n1 -3 0\n3 -2 0\n";
        let analysis = analyze_with(content, &AnalysisSettings::default());
        assert_eq!(vec![(2, 1)], requires_as_dimacs(&analysis));
        assert!(analysis.excludes().is_empty());
    }

    #[test]
    fn test_unsatisfiable_formula_is_rejected() {
        let model = read_model("p cnf 1 2\n1 0\n-1 0\n");
        let error = analyze(&model, &AnalysisSettings::default()).unwrap_err();
        assert_eq!(
            "the input formula is unsatisfiable; it describes no configuration",
            format!("{}", error)
        );
    }

    #[test]
    fn test_zero_workers_is_rejected() {
        let model = read_model("p cnf 1 0\n");
        let error = analyze(
            &model,
            &AnalysisSettings::new(BackboneDetector::default(), 0),
        )
        .unwrap_err();
        assert_eq!("the number of workers must be at least 1", format!("{}", error));
    }

    #[test]
    fn test_too_many_workers_is_rejected() {
        let model = read_model("p cnf 1 0\n");
        let max_workers = thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(DEFAULT_HARDWARE_PARALLELISM);
        let error = analyze(
            &model,
            &AnalysisSettings::new(BackboneDetector::default(), max_workers + 1),
        )
        .unwrap_err();
        assert!(format!("{}", error).starts_with(&format!(
            "requested {} workers",
            max_workers + 1
        )));
    }

    #[test]
    fn test_workers_capped_by_candidate_count() {
        let max_workers = thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(DEFAULT_HARDWARE_PARALLELISM);
        if max_workers < 2 {
            return;
        }
        // a single candidate variable, two requested workers
        let analysis = analyze_with(
            "p cnf 2 2\n1 0\n1 -2 0\n",
            &AnalysisSettings::new(BackboneDetector::default(), 2),
        );
        assert!(analysis.requires().is_empty());
    }

    #[test]
    fn test_worker_count_invariance() {
        let max_workers = thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(DEFAULT_HARDWARE_PARALLELISM);
        if max_workers < 2 {
            return;
        }
        let content = "p cnf 5 4\n1 -2 0\n2 -3 0\n-4 -5 0\n1 4 5 0\n";
        let sequential = analyze_with(content, &AnalysisSettings::default());
        let parallel = analyze_with(
            content,
            &AnalysisSettings::new(BackboneDetector::default(), 2),
        );
        assert_eq!(sequential.requires(), parallel.requires());
        assert_eq!(sequential.excludes(), parallel.excludes());
        assert_eq!(sequential.global_backbone(), parallel.global_backbone());
    }

    #[test]
    fn test_detector_invariance() {
        let content = "p cnf 4 3\n1 -2 0\n-1 -3 0\n2 -4 0\n";
        let with_attention = analyze_with(
            content,
            &AnalysisSettings::new(BackboneDetector::OneByOne, 1),
        );
        let without_attention = analyze_with(
            content,
            &AnalysisSettings::new(BackboneDetector::OneByOneWithoutAttention, 1),
        );
        assert_eq!(with_attention.requires(), without_attention.requires());
        assert_eq!(with_attention.excludes(), without_attention.excludes());
    }

    #[test]
    fn test_partition_ranges_even() {
        assert_eq!(vec![0..2, 2..4], partition_ranges(4, 2));
    }

    #[test]
    fn test_partition_ranges_remainder_goes_first() {
        assert_eq!(vec![0..3, 3..5], partition_ranges(5, 2));
        assert_eq!(vec![0..2, 2..4, 4..5], partition_ranges(5, 3));
    }

    #[test]
    fn test_partition_ranges_single_worker() {
        assert_eq!(vec![0..3], partition_ranges(3, 1));
    }
}
