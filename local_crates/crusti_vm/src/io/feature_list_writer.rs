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
use anyhow::Result;
use crusti_backbone::{Backbone, VarId};
use std::io::Write;

/// A writer for the core and dead feature lists.
///
/// Each list gives one feature per line as `index "name"`, using the same
/// variable rendering as the graph files.
/// Auxiliary and unnamed variables are left out.
#[derive(Default)]
pub struct FeatureListWriter;

impl FeatureListWriter {
    /// Creates a new `FeatureListWriter`.
    pub fn new() -> Self {
        FeatureListWriter
    }

    /// Writes the core features: the ones selected in every configuration.
    pub fn write_core(
        &self,
        features: &FeatureTable,
        global_backbone: &Backbone,
        writer: &mut dyn Write,
    ) -> Result<()> {
        self.write_fixed(features, global_backbone, true, writer)
    }

    /// Writes the dead features: the ones selected in no configuration.
    pub fn write_dead(
        &self,
        features: &FeatureTable,
        global_backbone: &Backbone,
        writer: &mut dyn Write,
    ) -> Result<()> {
        self.write_fixed(features, global_backbone, false, writer)
    }

    fn write_fixed(
        &self,
        features: &FeatureTable,
        global_backbone: &Backbone,
        polarity: bool,
        writer: &mut dyn Write,
    ) -> Result<()> {
        for v in (0..features.n_vars()).map(VarId::from) {
            if global_backbone.fixed(v) != Some(polarity) || features.is_auxiliary(v) {
                continue;
            }
            if let Some(name) = features.name(v) {
                writeln!(writer, "{} \"{}\"", v.to_dimacs(), name)?;
            }
        }
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::WritableString;
    use crusti_backbone::Literal;

    #[test]
    fn test_write_core_and_dead() {
        let mut features = FeatureTable::new(4);
        features.set_name(VarId::from(0), "a".to_string());
        features.set_name(VarId::from(1), "b".to_string());
        features.set_name(VarId::from(2), "aux_1".to_string());
        features.set_name(VarId::from(3), "d".to_string());
        let backbone = Backbone::from_literals(
            4,
            &[
                Literal::new(0.into(), true),
                Literal::new(1.into(), false),
                Literal::new(2.into(), true),
                Literal::new(3.into(), true),
            ],
        );
        let mut core = WritableString::default();
        FeatureListWriter::new()
            .write_core(&features, &backbone, &mut core)
            .unwrap();
        assert_eq!("1 \"a\"\n4 \"d\"\n", core.to_string());
        let mut dead = WritableString::default();
        FeatureListWriter::new()
            .write_dead(&features, &backbone, &mut dead)
            .unwrap();
        assert_eq!("2 \"b\"\n", dead.to_string());
    }

    #[test]
    fn test_write_empty_lists() {
        let features = FeatureTable::new(2);
        let backbone = Backbone::from_literals(2, &[]);
        let mut result = WritableString::default();
        FeatureListWriter::new()
            .write_core(&features, &backbone, &mut result)
            .unwrap();
        assert_eq!("", result.to_string());
    }
}
