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

use crate::{FeatureTable, VariabilityModel};
use anyhow::{anyhow, Context, Result};
use crusti_backbone::{Clause, CnfFormula, Literal, LiteralVec, MaybeTrivial, VarId};
use lazy_static::lazy_static;
use regex::Regex;
use std::io::BufRead;

lazy_static! {
    static ref PROBLEM_LINE_PATTERN: Regex = Regex::new(r"^p\s+cnf\s+(\d+)\s+(\d+)$").unwrap();
    static ref NAMED_COMMENT_PATTERN: Regex = Regex::new(r"^c\s+(\d+)\s+(\S.*)$").unwrap();
}

/// A reader for DIMACS CNF files carrying feature names.
///
/// Beyond the usual problem line and terminated clauses (which may span
/// multiple physical lines), the reader recognizes the comment convention
/// `c <var> <name>` giving a human-readable name to a variable; the name is
/// the full tail of the comment.
/// Names beginning with the `aux_` prefix mark encoder-introduced auxiliary
/// variables.
///
/// Recoverable oddities (duplicated names, tautological clauses, clause
/// count mismatches) are reported to the registered warning handlers;
/// malformed content is an error.
///
/// # Example
///
/// ```
/// use crusti_vm::DimacsReader;
/// use std::io::BufReader;
///
/// let content = "c 1 a\nc 2 b\np cnf 2 1\n-2 1 0\n";
/// let model = DimacsReader::default()
///     .read(&mut BufReader::new(content.as_bytes()))
///     .unwrap();
/// assert_eq!(2, model.cnf().n_vars());
/// assert_eq!(1, model.cnf().n_clauses());
/// ```
#[derive(Default)]
pub struct DimacsReader<'h> {
    warning_handlers: Vec<&'h mut dyn FnMut(usize, &str)>,
}

impl<'h> DimacsReader<'h> {
    /// Adds a warning handler, called with the 0-based line number and the
    /// reason of each recoverable oddity found while reading.
    pub fn add_warning_handler(&mut self, handler: &'h mut dyn FnMut(usize, &str)) {
        self.warning_handlers.push(handler);
    }

    fn raise_warning(&mut self, line: usize, reason: &str) {
        self.warning_handlers
            .iter_mut()
            .for_each(|h| h(line, reason));
    }

    /// Reads a variability model from DIMACS CNF content.
    pub fn read(&mut self, reader: &mut dyn BufRead) -> Result<VariabilityModel> {
        let mut declared: Option<(usize, usize)> = None;
        let mut names: Vec<(usize, usize, String)> = Vec::new();
        let mut clauses: Vec<Clause> = Vec::new();
        let mut pending: Vec<Literal> = Vec::new();
        let mut n_trivial_clauses = 0;
        for (line_number, line_result) in reader.lines().enumerate() {
            let line =
                line_result.with_context(|| format!("while reading line {}", line_number))?;
            let content = line.trim();
            if content.is_empty() {
                continue;
            }
            if content.starts_with('c') {
                if let Some(captures) = NAMED_COMMENT_PATTERN.captures(content) {
                    let index = captures
                        .get(1)
                        .unwrap()
                        .as_str()
                        .parse::<usize>()
                        .with_context(|| {
                            format!("while parsing the variable index at line {}", line_number)
                        })?;
                    let name = captures
                        .get(2)
                        .unwrap()
                        .as_str()
                        .split_whitespace()
                        .collect::<Vec<&str>>()
                        .join(" ");
                    names.push((line_number, index, name));
                }
                continue;
            }
            if content.starts_with('p') {
                if declared.is_some() {
                    return Err(anyhow!("second problem line at line {}", line_number));
                }
                let captures = PROBLEM_LINE_PATTERN.captures(content).ok_or_else(|| {
                    anyhow!(
                        r#"syntax error in problem line "{}" at line {}"#,
                        content,
                        line_number
                    )
                })?;
                let n_vars = captures.get(1).unwrap().as_str().parse::<usize>()?;
                let n_clauses = captures.get(2).unwrap().as_str().parse::<usize>()?;
                declared = Some((n_vars, n_clauses));
                continue;
            }
            let (n_vars, _) = declared.ok_or_else(|| {
                anyhow!("clause content at line {} before the problem line", line_number)
            })?;
            for token in content.split_whitespace() {
                let dimacs_literal = token.parse::<i32>().with_context(|| {
                    format!(r#"while parsing literal "{}" at line {}"#, token, line_number)
                })?;
                if dimacs_literal == 0 {
                    match Clause::new(LiteralVec::new(std::mem::take(&mut pending))) {
                        MaybeTrivial::NotTrivial(clause) => clauses.push(clause),
                        MaybeTrivial::True => {
                            n_trivial_clauses += 1;
                            self.raise_warning(line_number, "tautological clause, dropped");
                        }
                        MaybeTrivial::False => {
                            return Err(anyhow!(
                                "empty clause at line {} makes the formula unsatisfiable",
                                line_number
                            ))
                        }
                    }
                } else {
                    let var_index = dimacs_literal.unsigned_abs() as usize;
                    if var_index > n_vars {
                        return Err(anyhow!(
                            "literal {} at line {} refers to a variable beyond the {} declared ones",
                            dimacs_literal,
                            line_number,
                            n_vars
                        ));
                    }
                    pending.push(Literal::from_dimacs(dimacs_literal));
                }
            }
        }
        if !pending.is_empty() {
            return Err(anyhow!("the last clause of the input is unterminated"));
        }
        let (n_vars, n_declared_clauses) =
            declared.ok_or_else(|| anyhow!("no problem line found"))?;
        if clauses.len() + n_trivial_clauses != n_declared_clauses {
            self.raise_warning(
                0,
                &format!(
                    "the problem line declares {} clauses but {} were read",
                    n_declared_clauses,
                    clauses.len() + n_trivial_clauses
                ),
            );
        }
        let mut features = FeatureTable::new(n_vars);
        for (line_number, index, name) in names {
            if index == 0 || index > n_vars {
                self.raise_warning(
                    line_number,
                    &format!("name comment for unknown variable {}", index),
                );
                continue;
            }
            if let Some(previous) = features.set_name(VarId::from_dimacs(index), name) {
                self.raise_warning(
                    line_number,
                    &format!(r#"variable {} was already named "{}""#, index, previous),
                );
            }
        }
        let mut cnf = CnfFormula::new(n_vars);
        clauses.into_iter().for_each(|c| cnf.add_clause(c));
        Ok(VariabilityModel::new(cnf, features))
    }
}
