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

use crate::Clause;

/// A conjunction of [`Clause`]s over a declared set of variables.
///
/// The number of variables is fixed at construction time; variables that
/// appear in no clause are unconstrained.
/// Once loaded into a SAT solver, a `CnfFormula` is never modified.
///
/// # Examples
///
/// ```
/// use crusti_backbone::{Clause, CnfFormula};
///
/// let mut cnf = CnfFormula::new(2);
/// cnf.add_clause(Clause::new(vec![(0, false), (1, true)].into()).unwrap());
/// assert_eq!(2, cnf.n_vars());
/// assert_eq!(1, cnf.n_clauses());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CnfFormula {
    clauses: Vec<Clause>,
    n_vars: usize,
}

impl CnfFormula {
    /// Builds an empty formula over `n_vars` variables.
    pub fn new(n_vars: usize) -> Self {
        CnfFormula {
            clauses: Vec::new(),
            n_vars,
        }
    }

    /// Adds a new clause to this formula.
    ///
    /// # Panics
    ///
    /// Panics if the clause refers to a variable beyond the declared count.
    pub fn add_clause(&mut self, clause: Clause) {
        if clause.n_vars() > self.n_vars {
            panic!(
                "clause over {} variables added to a formula declaring {}",
                clause.n_vars(),
                self.n_vars
            );
        }
        self.clauses.push(clause);
    }

    /// Returns the clauses of this formula.
    pub fn as_clauses(&self) -> &[Clause] {
        self.clauses.as_slice()
    }

    /// Returns the number of clauses this formula contains.
    pub fn n_clauses(&self) -> usize {
        self.clauses.len()
    }

    /// Returns the number of variables declared for this formula.
    pub fn n_vars(&self) -> usize {
        self.n_vars
    }
}
