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
use crusti_backbone::{Backbone, VarId};

/// A directed edge stating that selecting its source forces the selection of
/// its target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequiresEdge {
    source: VarId,
    target: VarId,
}

impl RequiresEdge {
    /// Builds a new requires edge.
    pub fn new(source: VarId, target: VarId) -> Self {
        RequiresEdge { source, target }
    }

    /// Returns the variable whose selection forces the target.
    pub fn source(&self) -> VarId {
        self.source
    }

    /// Returns the variable forced by the source.
    pub fn target(&self) -> VarId {
        self.target
    }
}

/// An undirected edge stating that its two variables are never selected
/// together.
///
/// The pair is stored with the smaller variable first, so that each excludes
/// relation has a single representation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExcludesEdge {
    first: VarId,
    second: VarId,
}

impl ExcludesEdge {
    /// Builds a new excludes edge; the endpoint order is irrelevant.
    pub fn new(a: VarId, b: VarId) -> Self {
        if a <= b {
            ExcludesEdge { first: a, second: b }
        } else {
            ExcludesEdge { first: b, second: a }
        }
    }

    /// Returns the smaller endpoint.
    pub fn first(&self) -> VarId {
        self.first
    }

    /// Returns the greater endpoint.
    pub fn second(&self) -> VarId {
        self.second
    }
}

/// Distills the edges of a candidate variable from its conditional backbone.
///
/// `line` is the backbone of the formula conditioned by the candidate set to
/// true; `global` the backbone of the unconditioned formula.
/// A variable forced to true by the candidate (and not by the formula
/// itself) yields a requires edge; a variable forced to false (with neither
/// endpoint dead) yields an excludes edge.
/// Excludes pairs are kept only when the other endpoint is not smaller than
/// the candidate, so that each pair is emitted by exactly one of its
/// endpoints.
pub(crate) fn extract_edges(
    candidate: VarId,
    line: &Backbone,
    global: &Backbone,
    features: &FeatureTable,
    requires: &mut Vec<RequiresEdge>,
    excludes: &mut Vec<ExcludesEdge>,
) {
    let candidate_index = usize::from(candidate);
    for w in 0..line.n_vars() {
        if w == candidate_index {
            continue;
        }
        let other = VarId::from(w);
        if features.is_auxiliary(other) {
            continue;
        }
        match line.fixed(other) {
            Some(true) => {
                if !global.is_fixed(other) {
                    requires.push(RequiresEdge::new(candidate, other));
                }
            }
            Some(false) => {
                if w >= candidate_index
                    && global.fixed(other) != Some(false)
                    && global.fixed(candidate) != Some(false)
                {
                    excludes.push(ExcludesEdge::new(candidate, other));
                }
            }
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crusti_backbone::Literal;

    fn extract(
        candidate: usize,
        line: &Backbone,
        global: &Backbone,
        features: &FeatureTable,
    ) -> (Vec<RequiresEdge>, Vec<ExcludesEdge>) {
        let mut requires = Vec::new();
        let mut excludes = Vec::new();
        extract_edges(
            VarId::from(candidate),
            line,
            global,
            features,
            &mut requires,
            &mut excludes,
        );
        (requires, excludes)
    }

    #[test]
    fn test_excludes_edge_is_normalized() {
        assert_eq!(
            ExcludesEdge::new(VarId::from(0), VarId::from(1)),
            ExcludesEdge::new(VarId::from(1), VarId::from(0))
        );
    }

    #[test]
    fn test_requires_edges_skip_globally_fixed_targets() {
        let features = FeatureTable::new(3);
        // assuming 0 forces 1 and 2, but 2 is core
        let line = Backbone::from_literals(
            3,
            &[
                Literal::new(0.into(), true),
                Literal::new(1.into(), true),
                Literal::new(2.into(), true),
            ],
        );
        let global = Backbone::from_literals(3, &[Literal::new(2.into(), true)]);
        let (requires, excludes) = extract(0, &line, &global, &features);
        assert_eq!(
            vec![RequiresEdge::new(VarId::from(0), VarId::from(1))],
            requires
        );
        assert!(excludes.is_empty());
    }

    #[test]
    fn test_excludes_pair_emitted_by_smaller_endpoint_only() {
        let features = FeatureTable::new(2);
        let global = Backbone::from_literals(2, &[]);
        let line_of_0 = Backbone::from_literals(
            2,
            &[Literal::new(0.into(), true), Literal::new(1.into(), false)],
        );
        let (_, excludes_of_0) = extract(0, &line_of_0, &global, &features);
        assert_eq!(
            vec![ExcludesEdge::new(VarId::from(0), VarId::from(1))],
            excludes_of_0
        );
        let line_of_1 = Backbone::from_literals(
            2,
            &[Literal::new(0.into(), false), Literal::new(1.into(), true)],
        );
        let (_, excludes_of_1) = extract(1, &line_of_1, &global, &features);
        assert!(excludes_of_1.is_empty());
    }

    #[test]
    fn test_excludes_edges_skip_dead_targets() {
        let features = FeatureTable::new(2);
        let line = Backbone::from_literals(
            2,
            &[Literal::new(0.into(), true), Literal::new(1.into(), false)],
        );
        let global = Backbone::from_literals(2, &[Literal::new(1.into(), false)]);
        let (requires, excludes) = extract(0, &line, &global, &features);
        assert!(requires.is_empty());
        assert!(excludes.is_empty());
    }

    #[test]
    fn test_edges_skip_auxiliary_variables() {
        let mut features = FeatureTable::new(3);
        features.set_name(VarId::from(1), "aux_1".to_string());
        let line = Backbone::from_literals(
            3,
            &[
                Literal::new(0.into(), true),
                Literal::new(1.into(), true),
                Literal::new(2.into(), false),
            ],
        );
        let global = Backbone::from_literals(3, &[]);
        let (requires, excludes) = extract(0, &line, &global, &features);
        assert!(requires.is_empty());
        assert_eq!(
            vec![ExcludesEdge::new(VarId::from(0), VarId::from(2))],
            excludes
        );
    }
}
