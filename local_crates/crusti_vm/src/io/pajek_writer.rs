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

use crate::{ExcludesEdge, FeatureTable, RequiresEdge};
use anyhow::Result;
use crusti_backbone::VarId;
use std::io::Write;

/// A writer for the Pajek `.net` graph format.
///
/// A graph file starts with a `*Vertices N` section listing the named,
/// non-auxiliary variables; `N` is the declared variable count, so that edge
/// endpoints remain valid even when some variables are left unlisted.
/// The requires graph is directed and uses the `*Arcs` section; the excludes
/// graph is undirected and uses `*Edges`.
/// Variable numbers are 1-based, as in the DIMACS input.
///
/// # Example
///
/// ```
/// use crusti_vm::{FeatureTable, PajekWriter, RequiresEdge, VarId};
///
/// let mut features = FeatureTable::new(2);
/// features.set_name(VarId::from(0), "a".to_string());
/// features.set_name(VarId::from(1), "b".to_string());
/// let edges = vec![RequiresEdge::new(VarId::from(1), VarId::from(0))];
/// let writer = PajekWriter::new();
/// writer.write_requires(&features, &edges, &mut std::io::stdout()).unwrap();
/// ```
#[derive(Default)]
pub struct PajekWriter;

impl PajekWriter {
    /// Creates a new `PajekWriter`.
    pub fn new() -> Self {
        PajekWriter
    }

    /// Writes the requires graph (a directed graph) using the Pajek format.
    pub fn write_requires(
        &self,
        features: &FeatureTable,
        edges: &[RequiresEdge],
        writer: &mut dyn Write,
    ) -> Result<()> {
        self.write_vertices(features, writer)?;
        writeln!(writer, "*Arcs")?;
        for edge in edges {
            writeln!(
                writer,
                "{} {}",
                edge.source().to_dimacs(),
                edge.target().to_dimacs()
            )?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Writes the excludes graph (an undirected graph) using the Pajek format.
    pub fn write_excludes(
        &self,
        features: &FeatureTable,
        edges: &[ExcludesEdge],
        writer: &mut dyn Write,
    ) -> Result<()> {
        self.write_vertices(features, writer)?;
        writeln!(writer, "*Edges")?;
        for edge in edges {
            writeln!(
                writer,
                "{} {}",
                edge.first().to_dimacs(),
                edge.second().to_dimacs()
            )?;
        }
        writer.flush()?;
        Ok(())
    }

    fn write_vertices(&self, features: &FeatureTable, writer: &mut dyn Write) -> Result<()> {
        writeln!(writer, "*Vertices {}", features.n_vars())?;
        for v in (0..features.n_vars()).map(VarId::from) {
            if features.is_auxiliary(v) {
                continue;
            }
            if let Some(name) = features.name(v) {
                writeln!(writer, "{} \"{}\"", v.to_dimacs(), name)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::WritableString;

    fn named_features() -> FeatureTable {
        let mut features = FeatureTable::new(3);
        features.set_name(VarId::from(0), "a".to_string());
        features.set_name(VarId::from(1), "b".to_string());
        features.set_name(VarId::from(2), "aux_1".to_string());
        features
    }

    #[test]
    fn test_write_requires() {
        let features = named_features();
        let edges = vec![
            RequiresEdge::new(VarId::from(0), VarId::from(1)),
            RequiresEdge::new(VarId::from(1), VarId::from(0)),
        ];
        let mut result = WritableString::default();
        PajekWriter::new()
            .write_requires(&features, &edges, &mut result)
            .unwrap();
        assert_eq!(
            "*Vertices 3\n1 \"a\"\n2 \"b\"\n*Arcs\n1 2\n2 1\n",
            result.to_string()
        );
    }

    #[test]
    fn test_write_excludes() {
        let features = named_features();
        let edges = vec![ExcludesEdge::new(VarId::from(1), VarId::from(0))];
        let mut result = WritableString::default();
        PajekWriter::new()
            .write_excludes(&features, &edges, &mut result)
            .unwrap();
        assert_eq!(
            "*Vertices 3\n1 \"a\"\n2 \"b\"\n*Edges\n1 2\n",
            result.to_string()
        );
    }

    #[test]
    fn test_write_empty_graph() {
        let features = FeatureTable::new(1);
        let mut result = WritableString::default();
        PajekWriter::new()
            .write_requires(&features, &[], &mut result)
            .unwrap();
        assert_eq!("*Vertices 1\n*Arcs\n", result.to_string());
    }
}
