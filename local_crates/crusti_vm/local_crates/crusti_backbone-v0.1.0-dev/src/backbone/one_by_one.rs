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

use super::BackboneComputation;
use crate::{Backbone, ConsistencyCheckResult, Literal, SatSolver, VarId};
use anyhow::Result;

/// Computes the backbone of the solver's formula conditioned by `assumptions`.
///
/// The candidates are the literals of an initial model; each one is checked
/// in turn by asking the solver for a model of the conditioned formula where
/// the candidate is negated.
/// An unsatisfiable answer proves the candidate is a backbone literal; a
/// model disproves every candidate it disagrees with, which usually rules
/// out many candidates at once.
///
/// With `attention` set, each refuting model is followed by an activity bump
/// of every remaining candidate variable, biasing the next solver runs
/// towards the part of the formula that is still unsettled.
/// The bumps never change the computed backbone, only the number of solver
/// calls needed to reach it.
///
/// Returns the computation together with the number of consistency checks it
/// took, so that the two algorithm variants can be compared.
pub(crate) fn compute(
    solver: &mut dyn SatSolver,
    n_vars: usize,
    assumptions: &[Literal],
    attention: bool,
) -> Result<(BackboneComputation, usize)> {
    let mut n_checks = 1;
    let first_model = match solver.check_consistency_with(assumptions)? {
        ConsistencyCheckResult::Sat(model) => model,
        ConsistencyCheckResult::Unsat => return Ok((BackboneComputation::Refuted, n_checks)),
    };
    // candidate polarities, indexed by variable; None once a candidate is settled
    let mut candidates: Vec<Option<bool>> = vec![None; n_vars];
    for l in first_model.as_slice() {
        let v = usize::from(l.var_id());
        if v < n_vars {
            candidates[v] = Some(l.polarity());
        }
    }
    let mut backbone_literals = Vec::new();
    let mut augmented = Vec::with_capacity(assumptions.len() + 1);
    augmented.extend_from_slice(assumptions);
    for v in 0..n_vars {
        let polarity = match candidates[v] {
            Some(p) => p,
            None => continue,
        };
        let candidate = Literal::new(VarId::from(v), polarity);
        augmented.push(candidate.negate());
        n_checks += 1;
        let outcome = solver.check_consistency_with(&augmented)?;
        augmented.pop();
        match outcome {
            ConsistencyCheckResult::Unsat => {
                backbone_literals.push(candidate);
                candidates[v] = None;
            }
            ConsistencyCheckResult::Sat(witness) => {
                // the witness disagrees with the candidate itself, so it is dropped here too
                for l in witness.as_slice() {
                    let w = usize::from(l.var_id());
                    if w < n_vars && candidates[w] == Some(!l.polarity()) {
                        candidates[w] = None;
                    }
                }
                if attention {
                    for (w, p) in candidates.iter().enumerate().skip(v + 1) {
                        if p.is_some() {
                            solver.bump_activity(VarId::from(w));
                        }
                    }
                }
            }
        }
    }
    Ok((
        BackboneComputation::Backbone(Backbone::from_literals(n_vars, &backbone_literals)),
        n_checks,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{default_sat_solver, Clause, CnfFormula};

    fn load_formula(n_vars: usize, clauses: Vec<Vec<(usize, bool)>>) -> CnfFormula {
        let mut cnf = CnfFormula::new(n_vars);
        clauses
            .into_iter()
            .for_each(|c| cnf.add_clause(Clause::new(c.into()).unwrap()));
        cnf
    }

    fn compute_on(
        cnf: &CnfFormula,
        assumptions: &[Literal],
        attention: bool,
    ) -> BackboneComputation {
        let mut solver = default_sat_solver();
        for clause in cnf.as_clauses() {
            solver.add_clause(clause.clone());
        }
        let (computation, n_checks) =
            compute(solver.as_mut(), cnf.n_vars(), assumptions, attention).unwrap();
        assert!(n_checks >= 1);
        computation
    }

    #[test]
    fn test_no_backbone() {
        let cnf = load_formula(2, vec![vec![(0, true), (1, true)]]);
        for attention in [true, false] {
            let backbone = compute_on(&cnf, &[], attention).unwrap();
            assert_eq!(0, backbone.n_fixed());
        }
    }

    #[test]
    fn test_unit_clauses_are_backbone() {
        let cnf = load_formula(
            3,
            vec![vec![(0, true)], vec![(1, false)], vec![(0, true), (2, true)]],
        );
        for attention in [true, false] {
            let backbone = compute_on(&cnf, &[], attention).unwrap();
            assert_eq!(Some(true), backbone.fixed(0.into()));
            assert_eq!(Some(false), backbone.fixed(1.into()));
            assert_eq!(None, backbone.fixed(2.into()));
        }
    }

    #[test]
    fn test_propagated_backbone() {
        // 0 and (¬0 ∨ 1) fix 1; 2 stays free
        let cnf = load_formula(3, vec![vec![(0, true)], vec![(0, false), (1, true)]]);
        for attention in [true, false] {
            let backbone = compute_on(&cnf, &[], attention).unwrap();
            assert_eq!(Some(true), backbone.fixed(0.into()));
            assert_eq!(Some(true), backbone.fixed(1.into()));
            assert_eq!(None, backbone.fixed(2.into()));
        }
    }

    #[test]
    fn test_backbone_under_assumptions() {
        // (0 ∨ ¬1) ∧ (1 ∨ ¬2): assuming 2 forces 1, which forces 0
        let cnf = load_formula(
            3,
            vec![vec![(0, true), (1, false)], vec![(1, true), (2, false)]],
        );
        for attention in [true, false] {
            let backbone = compute_on(&cnf, &[Literal::new(2.into(), true)], attention).unwrap();
            assert_eq!(Some(true), backbone.fixed(0.into()));
            assert_eq!(Some(true), backbone.fixed(1.into()));
            assert_eq!(Some(true), backbone.fixed(2.into()));
        }
    }

    #[test]
    fn test_refuted_assumptions() {
        let cnf = load_formula(2, vec![vec![(0, true)], vec![(0, false), (1, false)]]);
        for attention in [true, false] {
            assert!(compute_on(&cnf, &[Literal::new(1.into(), true)], attention).is_refuted());
        }
    }

    #[test]
    fn test_refuted_formula() {
        let cnf = load_formula(1, vec![vec![(0, true)], vec![(0, false)]]);
        for attention in [true, false] {
            assert!(compute_on(&cnf, &[], attention).is_refuted());
        }
    }

    #[test]
    fn test_unconstrained_variables_are_not_backbone() {
        // the formula declares 4 variables but constrains only the first one
        let cnf = load_formula(4, vec![vec![(0, true)]]);
        for attention in [true, false] {
            let backbone = compute_on(&cnf, &[], attention).unwrap();
            assert_eq!(1, backbone.n_fixed());
            assert_eq!(Some(true), backbone.fixed(0.into()));
        }
    }

    #[test]
    fn test_backbone_soundness() {
        // every reported literal must be refutation-checked by an independent solver
        let cnf = load_formula(
            4,
            vec![
                vec![(0, true)],
                vec![(0, false), (1, true)],
                vec![(1, false), (2, false)],
                vec![(2, true), (3, true)],
            ],
        );
        let backbone = compute_on(&cnf, &[], true).unwrap();
        assert!(backbone.n_fixed() > 0);
        for l in backbone.iter_fixed() {
            let mut checker = default_sat_solver();
            for clause in cnf.as_clauses() {
                checker.add_clause(clause.clone());
            }
            assert!(matches!(
                checker.check_consistency_with(&[l.negate()]).unwrap(),
                ConsistencyCheckResult::Unsat
            ));
        }
    }

    #[test]
    fn test_attention_and_baseline_agree() {
        let cnf = load_formula(
            5,
            vec![
                vec![(0, true), (1, false)],
                vec![(1, true), (2, false)],
                vec![(3, false), (4, false)],
                vec![(2, true), (4, true), (0, false)],
            ],
        );
        assert_eq!(
            compute_on(&cnf, &[], true),
            compute_on(&cnf, &[], false)
        );
        let assumption = [Literal::new(2.into(), true)];
        assert_eq!(
            compute_on(&cnf, &assumption, true),
            compute_on(&cnf, &assumption, false)
        );
    }
}
