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

use crusti_backbone::VarId;

/// The name prefix marking encoder-introduced auxiliary variables.
const AUXILIARY_NAME_PREFIX: &str = "aux_";

/// The feature names of a variability model, indexed by CNF variable.
///
/// CNF encoders may leave some variables unnamed, and mark the helper
/// variables they introduce with the `aux_` name prefix.
/// Auxiliary variables take part in the formula like any other variable but
/// are kept out of every produced graph and feature list.
///
/// # Examples
///
/// ```
/// use crusti_vm::{FeatureTable, VarId};
///
/// let mut features = FeatureTable::new(3);
/// features.set_name(VarId::from(0), "base".to_string());
/// features.set_name(VarId::from(2), "aux_1".to_string());
/// assert_eq!(Some("base"), features.name(VarId::from(0)));
/// assert_eq!(None, features.name(VarId::from(1)));
/// assert!(features.is_auxiliary(VarId::from(2)));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeatureTable {
    names: Vec<Option<String>>,
}

impl FeatureTable {
    /// Builds a table for `n_vars` unnamed variables.
    pub fn new(n_vars: usize) -> Self {
        FeatureTable {
            names: vec![None; n_vars],
        }
    }

    /// Sets the name of a variable, returning the previous name if the
    /// variable already had one.
    ///
    /// # Panics
    ///
    /// Panics if the variable is beyond the declared count.
    pub fn set_name(&mut self, v: VarId, name: String) -> Option<String> {
        self.names[usize::from(v)].replace(name)
    }

    /// Returns the name of a variable, if it has one.
    pub fn name(&self, v: VarId) -> Option<&str> {
        self.names
            .get(usize::from(v))
            .and_then(|n| n.as_deref())
    }

    /// Checks whether a variable is an encoder-introduced auxiliary variable.
    pub fn is_auxiliary(&self, v: VarId) -> bool {
        self.name(v)
            .map_or(false, |n| n.starts_with(AUXILIARY_NAME_PREFIX))
    }

    /// Returns the number of variables of this table.
    pub fn n_vars(&self) -> usize {
        self.names.len()
    }

    /// Returns the number of named variables.
    pub fn n_named(&self) -> usize {
        self.names.iter().filter(|n| n.is_some()).count()
    }

    /// Returns the number of auxiliary variables.
    pub fn n_auxiliary(&self) -> usize {
        (0..self.names.len())
            .filter(|v| self.is_auxiliary(VarId::from(*v)))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unnamed_variables() {
        let features = FeatureTable::new(2);
        assert_eq!(2, features.n_vars());
        assert_eq!(0, features.n_named());
        assert_eq!(None, features.name(VarId::from(0)));
        assert!(!features.is_auxiliary(VarId::from(0)));
    }

    #[test]
    fn test_set_name_returns_previous() {
        let mut features = FeatureTable::new(1);
        assert_eq!(None, features.set_name(VarId::from(0), "a".to_string()));
        assert_eq!(
            Some("a".to_string()),
            features.set_name(VarId::from(0), "b".to_string())
        );
        assert_eq!(Some("b"), features.name(VarId::from(0)));
    }

    #[test]
    fn test_auxiliary_detection() {
        let mut features = FeatureTable::new(3);
        features.set_name(VarId::from(0), "auxiliary_pump".to_string());
        features.set_name(VarId::from(1), "aux_17".to_string());
        assert!(!features.is_auxiliary(VarId::from(0)));
        assert!(features.is_auxiliary(VarId::from(1)));
        assert!(!features.is_auxiliary(VarId::from(2)));
        assert_eq!(1, features.n_auxiliary());
    }
}
