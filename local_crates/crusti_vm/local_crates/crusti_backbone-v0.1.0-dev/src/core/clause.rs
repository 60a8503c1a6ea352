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

use crate::{Literal, LiteralVec, MaybeTrivial};

/// A disjunction of [`Literal`]s.
///
/// Clauses hold distinct literals; building one from a sequence of literals
/// removes the duplicates.
/// A clause containing a literal and its negation is a tautology, while an
/// empty clause is a contradiction; in both cases, the construction returns
/// the corresponding trivial value of [`MaybeTrivial`] instead of a clause.
///
/// # Examples
///
/// ```
/// use crusti_backbone::{Clause, LiteralVec};
///
/// let clause = Clause::new(vec![(0, false), (1, true)].into()).unwrap();
/// assert_eq!(2, clause.as_literals().len());
/// assert!(Clause::new(vec![(0, false), (0, true)].into()).is_true());
/// assert!(Clause::new(LiteralVec::new(vec![])).is_false());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Clause(LiteralVec);

impl Clause {
    /// Builds a new clause given its literals.
    pub fn new(literals: LiteralVec) -> MaybeTrivial<Clause> {
        if literals.as_slice().is_empty() {
            return MaybeTrivial::False;
        }
        match literals.clean() {
            Some(distinct) => MaybeTrivial::NotTrivial(Clause(distinct)),
            None => MaybeTrivial::True,
        }
    }

    /// Returns the literals of this clause, sorted by the literal order.
    pub fn as_literals(&self) -> &[Literal] {
        self.0.as_slice()
    }

    /// Returns the minimal number of variables a formula must have to contain this clause.
    pub fn n_vars(&self) -> usize {
        self.0.n_vars()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sorts_and_deduplicates() {
        let clause = Clause::new(vec![(1, true), (0, false), (1, true)].into()).unwrap();
        assert_eq!(
            vec![Literal::new(0.into(), false), Literal::new(1.into(), true)],
            clause.as_literals().to_vec()
        );
    }

    #[test]
    fn test_new_tautology() {
        assert!(Clause::new(vec![(0, false), (1, true), (0, true)].into()).is_true());
    }

    #[test]
    fn test_new_empty() {
        assert!(Clause::new(LiteralVec::new(vec![])).is_false());
    }

    #[test]
    fn test_n_vars() {
        let clause = Clause::new(vec![(4, false), (1, true)].into()).unwrap();
        assert_eq!(5, clause.n_vars());
    }
}
