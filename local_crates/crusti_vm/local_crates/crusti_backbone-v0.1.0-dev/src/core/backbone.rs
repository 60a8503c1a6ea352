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

use crate::{Literal, VarId};

/// The set of literals fixed in every model of a formula.
///
/// The set is stored as a polarity-per-variable vector: a variable maps to
/// `Some(polarity)` when the corresponding literal belongs to the backbone,
/// and to `None` when the formula admits models with both polarities.
/// Lookups are constant-time, as backbone queries sit on the hot path of the
/// graph extraction.
///
/// # Examples
///
/// ```
/// use crusti_backbone::{Backbone, Literal, VarId};
///
/// let backbone = Backbone::from_literals(3, &[Literal::new(VarId::from(1), false)]);
/// assert_eq!(None, backbone.fixed(VarId::from(0)));
/// assert_eq!(Some(false), backbone.fixed(VarId::from(1)));
/// assert_eq!(1, backbone.n_fixed());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Backbone {
    fixed: Vec<Option<bool>>,
}

impl Backbone {
    /// Builds a backbone over `n_vars` variables from its literals.
    ///
    /// # Panics
    ///
    /// Panics if a literal refers to a variable beyond the declared count.
    pub fn from_literals(n_vars: usize, literals: &[Literal]) -> Self {
        let mut fixed = vec![None; n_vars];
        for l in literals {
            fixed[usize::from(l.var_id())] = Some(l.polarity());
        }
        Backbone { fixed }
    }

    /// Returns the number of variables this backbone was computed over.
    pub fn n_vars(&self) -> usize {
        self.fixed.len()
    }

    /// Returns the polarity a variable is fixed to, or `None` if it is not fixed.
    pub fn fixed(&self, v: VarId) -> Option<bool> {
        self.fixed.get(usize::from(v)).copied().flatten()
    }

    /// Checks whether a variable is fixed by this backbone.
    pub fn is_fixed(&self, v: VarId) -> bool {
        self.fixed(v).is_some()
    }

    /// Returns the number of fixed variables.
    pub fn n_fixed(&self) -> usize {
        self.fixed.iter().filter(|p| p.is_some()).count()
    }

    /// Iterates over the backbone literals, by ascending variable identifier.
    pub fn iter_fixed(&self) -> impl Iterator<Item = Literal> + '_ {
        self.fixed
            .iter()
            .enumerate()
            .filter_map(|(v, p)| p.map(|polarity| Literal::new(VarId::from(v), polarity)))
    }
}
