// crusti_backbone
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

use super::detector;
use crate::{
    default_sat_solver, BackboneComputation, BackboneDetector, CnfFormula, Literal, SatSolver,
};
use anyhow::Result;

/// A SAT solver loaded with a formula, ready for backbone detection.
///
/// The formula is loaded once, at construction time, and never modified
/// afterwards: backbone queries only condition it with per-call assumption
/// literals.
/// Construction must happen on the thread that owns the underlying solver at
/// that point; a loaded `BackboneSolver` may then be handed over to another
/// thread, which becomes its only user.
///
/// # Examples
///
/// ```
/// use crusti_backbone::{BackboneDetector, BackboneSolver, Clause, CnfFormula};
///
/// let mut cnf = CnfFormula::new(2);
/// cnf.add_clause(Clause::new(vec![(0, true)].into()).unwrap());
/// cnf.add_clause(Clause::new(vec![(0, false), (1, true)].into()).unwrap());
/// let mut solver = BackboneSolver::load(&cnf, BackboneDetector::OneByOne);
/// let backbone = solver.compute_backbone().unwrap().unwrap();
/// assert_eq!(2, backbone.n_fixed());
/// ```
pub struct BackboneSolver {
    solver: Box<dyn SatSolver>,
    n_vars: usize,
    detector: BackboneDetector,
    n_consistency_checks: usize,
}

impl BackboneSolver {
    /// Loads a formula into the default SAT solver.
    pub fn load(formula: &CnfFormula, detector: BackboneDetector) -> Self {
        Self::with_solver(default_sat_solver(), formula, detector)
    }

    /// Loads a formula into the given SAT solver.
    ///
    /// The solver must be freshly built: the formula it decides is the one
    /// given here.
    pub fn with_solver(
        mut solver: Box<dyn SatSolver>,
        formula: &CnfFormula,
        detector: BackboneDetector,
    ) -> Self {
        for clause in formula.as_clauses() {
            solver.add_clause(clause.clone());
        }
        BackboneSolver {
            solver,
            n_vars: formula.n_vars(),
            detector,
            n_consistency_checks: 0,
        }
    }

    /// Returns the number of variables of the loaded formula.
    pub fn n_vars(&self) -> usize {
        self.n_vars
    }

    /// Returns the detection algorithm this solver runs.
    pub fn detector(&self) -> BackboneDetector {
        self.detector
    }

    /// Returns the number of solver consistency checks issued so far.
    ///
    /// The count accumulates over the backbone computations run on this
    /// instance; it is the measurement the two detection algorithms are
    /// compared on.
    pub fn n_consistency_checks(&self) -> usize {
        self.n_consistency_checks
    }

    /// Computes the backbone of the loaded formula.
    ///
    /// Returns [`BackboneComputation::Refuted`] if the formula is unsatisfiable.
    pub fn compute_backbone(&mut self) -> Result<BackboneComputation> {
        self.compute_backbone_under(&[])
    }

    /// Computes the backbone of the loaded formula conditioned by a set of
    /// assumption literals.
    ///
    /// Returns [`BackboneComputation::Refuted`] if the assumptions contradict
    /// the formula.
    pub fn compute_backbone_under(
        &mut self,
        assumptions: &[Literal],
    ) -> Result<BackboneComputation> {
        let (computation, n_checks) =
            detector::compute_backbone(self.solver.as_mut(), self.n_vars, assumptions, self.detector)?;
        self.n_consistency_checks += n_checks;
        Ok(computation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Clause;

    fn chain_formula() -> CnfFormula {
        // (0 ∨ ¬1) ∧ (1 ∨ ¬2)
        let mut cnf = CnfFormula::new(3);
        cnf.add_clause(Clause::new(vec![(0, true), (1, false)].into()).unwrap());
        cnf.add_clause(Clause::new(vec![(1, true), (2, false)].into()).unwrap());
        cnf
    }

    #[test]
    fn test_global_backbone_is_empty_for_chain() {
        let mut solver = BackboneSolver::load(&chain_formula(), BackboneDetector::default());
        assert_eq!(3, solver.n_vars());
        let backbone = solver.compute_backbone().unwrap().unwrap();
        assert_eq!(0, backbone.n_fixed());
    }

    #[test]
    fn test_assumptions_are_retracted_between_queries() {
        let mut solver = BackboneSolver::load(&chain_formula(), BackboneDetector::default());
        let under_last = solver
            .compute_backbone_under(&[Literal::new(2.into(), true)])
            .unwrap()
            .unwrap();
        assert_eq!(3, under_last.n_fixed());
        let unconditioned = solver.compute_backbone().unwrap().unwrap();
        assert_eq!(0, unconditioned.n_fixed());
    }

    #[test]
    fn test_consistency_checks_are_counted() {
        let mut solver = BackboneSolver::load(&chain_formula(), BackboneDetector::default());
        assert_eq!(0, solver.n_consistency_checks());
        solver.compute_backbone().unwrap();
        let after_first = solver.n_consistency_checks();
        // one initial model plus at least one check per settled candidate
        assert!(after_first >= 2);
        solver.compute_backbone().unwrap();
        assert!(solver.n_consistency_checks() > after_first);
    }

    #[test]
    fn test_unsatisfiable_formula_is_refuted() {
        let mut cnf = CnfFormula::new(1);
        cnf.add_clause(Clause::new(vec![(0, true)].into()).unwrap());
        cnf.add_clause(Clause::new(vec![(0, false)].into()).unwrap());
        let mut solver = BackboneSolver::load(&cnf, BackboneDetector::default());
        assert!(solver.compute_backbone().unwrap().is_refuted());
    }
}
