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

use super::sat_solver::MAYBE_TIMEOUT_MSG;
use crate::{Clause, ConsistencyCheckResult, Literal, LiteralVec, SatSolver};
use anyhow::{anyhow, Context, Result};
use cadical::{Callbacks, Solver};

struct CadicalCallbacks;

impl Callbacks for CadicalCallbacks {}

/// The CaDiCaL SAT solver.
///
/// CaDiCaL is an efficient SAT solver written in C++.
/// It won first place in the SAT track of the SAT Race 2019 and second overall place.
///
/// The published CaDiCaL bindings do not give access to the branching
/// heuristics of the solver, so [`bump_activity`](SatSolver::bump_activity)
/// hints are ignored by this backend.
pub struct CadicalSatSolver {
    solver: Solver<CadicalCallbacks>,
}

// SAFETY: a CaDiCaL instance is driven by at most one thread at a time.
// Construction and clause loading touch process-global state and must happen
// on the spawning thread; the loaded instance may then be moved to a single
// worker thread, which becomes its only user.
unsafe impl Send for CadicalSatSolver {}

impl CadicalSatSolver {
    /// Builds a new instance of the CaDiCaL SAT solver.
    pub fn new() -> Self {
        Self {
            solver: Solver::new(),
        }
    }
}

impl Default for CadicalSatSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SatSolver for CadicalSatSolver {
    fn add_clause(&mut self, clause: Clause) {
        self.solver
            .add_clause(clause.as_literals().iter().map(|l| l.to_dimacs()))
    }

    fn n_vars(&self) -> usize {
        self.solver.max_variable() as usize
    }

    fn check_consistency_with(
        &mut self,
        assumptions: &[Literal],
    ) -> Result<ConsistencyCheckResult> {
        let cadical_assumptions = assumptions.iter().map(|l| l.to_dimacs());
        match self.solver.solve_with(cadical_assumptions) {
            Some(true) => Ok(ConsistencyCheckResult::Sat(LiteralVec::new(build_model(
                &self.solver,
            )))),
            Some(false) => Ok(ConsistencyCheckResult::Unsat),
            None => Err(anyhow!(MAYBE_TIMEOUT_MSG))
                .context("while checking consistency with the CaDiCaL SAT solver"),
        }
    }
}

fn build_model<T>(solver: &Solver<T>) -> Vec<Literal>
where
    T: Callbacks,
{
    (1..=solver.max_variable())
        .map(|i| match solver.value(i) {
            Some(true) => Literal::from_dimacs(i),
            Some(false) | None => Literal::from_dimacs(-i),
        })
        .collect::<Vec<Literal>>()
}
