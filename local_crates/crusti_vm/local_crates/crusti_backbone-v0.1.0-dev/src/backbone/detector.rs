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

use super::one_by_one;
use crate::{Backbone, Literal, SatSolver};
use anyhow::{anyhow, Error, Result};
use std::str::FromStr;

/// The available backbone detection algorithms.
///
/// Both algorithms check the candidate literals of an initial model one by
/// one; they only differ in the way they drive the underlying SAT solver.
///
/// # Examples
///
/// ```
/// use crusti_backbone::BackboneDetector;
///
/// assert_eq!(BackboneDetector::OneByOne, "one".parse().unwrap());
/// assert_eq!(BackboneDetector::OneByOneWithoutAttention, "without".parse().unwrap());
/// assert!("unknown".parse::<BackboneDetector>().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackboneDetector {
    /// One-by-one candidate checking, biasing the solver towards the
    /// still-unsettled candidates after each refuting model (`"one"`).
    OneByOne,
    /// The same candidate loop without the branching bias, kept as a
    /// measurement baseline (`"without"`).
    OneByOneWithoutAttention,
}

impl Default for BackboneDetector {
    fn default() -> Self {
        BackboneDetector::OneByOne
    }
}

impl FromStr for BackboneDetector {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "one" => Ok(BackboneDetector::OneByOne),
            "without" => Ok(BackboneDetector::OneByOneWithoutAttention),
            _ => Err(anyhow!(r#"unknown backbone detector "{}""#, s)),
        }
    }
}

impl std::fmt::Display for BackboneDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackboneDetector::OneByOne => write!(f, "one"),
            BackboneDetector::OneByOneWithoutAttention => write!(f, "without"),
        }
    }
}

/// The outcome of a backbone detection.
///
/// The backbone of a formula conditioned by an assumption set only exists
/// when their conjunction is satisfiable; detection under a contradictory
/// assumption set yields [`Refuted`](BackboneComputation::Refuted) instead.
#[derive(Debug, PartialEq, Eq)]
pub enum BackboneComputation {
    /// The backbone of the (satisfiable) conditioned formula
    Backbone(Backbone),
    /// The assumption set contradicts the formula
    Refuted,
}

impl BackboneComputation {
    /// Returns `true` if the assumptions were refuted.
    pub fn is_refuted(&self) -> bool {
        matches!(self, BackboneComputation::Refuted)
    }

    /// Returns the computed [`Backbone`], consuming the self value.
    ///
    /// # Panics
    ///
    /// Panics if the assumptions were refuted.
    pub fn unwrap(self) -> Backbone {
        match self {
            BackboneComputation::Backbone(b) => b,
            BackboneComputation::Refuted => {
                panic!("cannot unwrap a backbone computation for refuted assumptions")
            }
        }
    }
}

pub(crate) fn compute_backbone(
    solver: &mut dyn SatSolver,
    n_vars: usize,
    assumptions: &[Literal],
    detector: BackboneDetector,
) -> Result<(BackboneComputation, usize)> {
    match detector {
        BackboneDetector::OneByOne => one_by_one::compute(solver, n_vars, assumptions, true),
        BackboneDetector::OneByOneWithoutAttention => {
            one_by_one::compute(solver, n_vars, assumptions, false)
        }
    }
}
