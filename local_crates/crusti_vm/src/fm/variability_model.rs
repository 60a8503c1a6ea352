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

use crate::FeatureTable;
use crusti_backbone::{Backbone, CnfFormula, VarId};

/// A variability model given as a CNF formula over named features.
///
/// Every satisfying assignment of the formula is a valid configuration of
/// the model; every variable is a feature (or an encoder-introduced
/// auxiliary variable).
/// The formula is immutable once the model is built.
pub struct VariabilityModel {
    cnf: CnfFormula,
    features: FeatureTable,
}

impl VariabilityModel {
    /// Builds a model from its formula and its feature names.
    ///
    /// # Panics
    ///
    /// Panics if the formula and the table do not declare the same number of
    /// variables.
    pub fn new(cnf: CnfFormula, features: FeatureTable) -> Self {
        if cnf.n_vars() != features.n_vars() {
            panic!(
                "formula declares {} variables but the feature table has {}",
                cnf.n_vars(),
                features.n_vars()
            );
        }
        VariabilityModel { cnf, features }
    }

    /// Returns the CNF formula of this model.
    pub fn cnf(&self) -> &CnfFormula {
        &self.cnf
    }

    /// Returns the feature names of this model.
    pub fn features(&self) -> &FeatureTable {
        &self.features
    }

    /// Returns the variables eligible as edge sources, by ascending
    /// identifier.
    ///
    /// A variable qualifies when it is not auxiliary and not fixed by the
    /// global backbone: backbone variables have no conditional relationships
    /// left to discover.
    pub fn candidate_variables(&self, global_backbone: &Backbone) -> Vec<VarId> {
        (0..self.cnf.n_vars())
            .map(VarId::from)
            .filter(|v| !self.features.is_auxiliary(*v) && !global_backbone.is_fixed(*v))
            .collect()
    }
}
