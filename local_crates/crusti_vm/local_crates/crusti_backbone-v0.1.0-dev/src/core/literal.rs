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

/// A variable identifier.
///
/// Identifiers are 0-based; the DIMACS representation of the variable is its
/// identifier plus one.
/// A `VarId` can be obtained from and converted into `usize`.
///
/// # Examples
///
/// ```
/// use crusti_backbone::VarId;
///
/// assert_eq!(0, usize::from(VarId::from(0)));
/// assert_eq!(1, VarId::from(0).to_dimacs());
/// ```
#[derive(Clone, Copy, Debug, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct VarId(usize);

impl VarId {
    /// Builds a `VarId` from a (1-based) DIMACS variable index.
    ///
    /// # Panics
    ///
    /// Panics if the index is 0, which is not a DIMACS variable index.
    pub fn from_dimacs(index: usize) -> Self {
        if index == 0 {
            panic!("0 is not a DIMACS variable index");
        }
        VarId(index - 1)
    }

    /// Returns the (1-based) DIMACS index of this variable.
    pub fn to_dimacs(self) -> usize {
        self.0 + 1
    }
}

impl From<usize> for VarId {
    fn from(u: usize) -> Self {
        VarId(u)
    }
}

impl From<VarId> for usize {
    fn from(v: VarId) -> Self {
        v.0
    }
}

impl std::fmt::Display for VarId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

/// A literal, composed by a [`VarId`] and a `bool` (its polarity).
///
/// # Order
///
/// A total order is imposed on literals:
/// * if variable identifiers are not equal, the same order applies to the literals;
/// * if variable identifiers are equal and polarity are different, the polarity (`bool`) order applies;
/// * if variable identifiers and polarity are equals, the two literals are equal.
///
/// # Examples
///
/// ```
/// use crusti_backbone::{Literal, VarId};
///
/// let v = VarId::from(0);
/// let l = Literal::new(v, true);
/// let not_l = Literal::new(v, false);
/// assert_eq!(not_l, l.negate());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Literal(VarId, bool);

impl Literal {
    /// Builds a new literal, given its [`VarId`] and its polarity as a `bool`.
    pub fn new(var_id: VarId, polarity: bool) -> Self {
        Literal(var_id, polarity)
    }

    /// Builds a literal from its signed DIMACS representation.
    ///
    /// # Panics
    ///
    /// Panics if the given value is 0, which is the DIMACS clause terminator.
    pub fn from_dimacs(lit: i32) -> Self {
        if lit == 0 {
            panic!("0 is not a DIMACS literal");
        }
        Literal(VarId(lit.unsigned_abs() as usize - 1), lit > 0)
    }

    /// Returns the signed DIMACS representation of this literal.
    pub fn to_dimacs(self) -> i32 {
        let index = self.0.to_dimacs() as i32;
        if self.1 {
            index
        } else {
            -index
        }
    }

    /// Returns the negation of the literal, as a new `Literal`.
    ///
    /// # Examples
    ///
    /// ```
    /// use crusti_backbone::{Literal, VarId};
    ///
    /// let l = Literal::new(VarId::from(0), true);
    /// assert_eq!(Literal::new(VarId::from(0), false), l.negate());
    /// ```
    pub fn negate(&self) -> Self {
        Literal(self.0, !self.1)
    }

    /// Checks if a literal is the negation of this literal.
    fn is_negation_of(&self, other: &Literal) -> bool {
        self.0 == other.0 && self.1 != other.1
    }

    /// Returns the [`VarId`] of this literal.
    pub fn var_id(&self) -> VarId {
        self.0
    }

    /// Returns the polarity of this literal.
    pub fn polarity(&self) -> bool {
        self.1
    }
}

impl PartialOrd for Literal {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Literal {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.cmp(&other.0).then(self.1.cmp(&other.1))
    }
}

impl From<(usize, bool)> for Literal {
    fn from(couple: (usize, bool)) -> Self {
        Literal::new(VarId::from(couple.0), couple.1)
    }
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.to_dimacs(), f)
    }
}

/// A sorted sequence of literals.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct LiteralVec(Vec<Literal>);

impl LiteralVec {
    pub fn new(mut literals: Vec<Literal>) -> Self {
        literals.sort_unstable();
        LiteralVec(literals)
    }

    /// Removes the duplicated literals of this `LiteralVec`.
    ///
    /// In case the sequence contains a literal and its negation, `None` is returned.
    pub fn clean(self) -> Option<LiteralVec> {
        let literals = &self.0;
        if literals.is_empty() {
            return Some(LiteralVec(vec![]));
        }
        let mut new_vec: Vec<Literal> = Vec::with_capacity(literals.len());
        for i in 0..literals.len() - 1 {
            let lit_i = &literals[i];
            if lit_i.is_negation_of(&literals[i + 1]) {
                return None;
            }
            if lit_i != &literals[i + 1] {
                new_vec.push(*lit_i);
            }
        }
        new_vec.push(literals[literals.len() - 1]);
        Some(LiteralVec(new_vec))
    }

    pub fn as_slice(&self) -> &[Literal] {
        &self.0
    }

    pub fn to_vec(self) -> Vec<Literal> {
        self.0
    }

    pub fn n_vars(&self) -> usize {
        self.0
            .iter()
            .map(|l| 1 + usize::from(l.var_id()))
            .max()
            .unwrap_or(0)
    }
}

impl<T> From<Vec<T>> for LiteralVec
where
    T: Into<Literal>,
{
    fn from(v: Vec<T>) -> Self {
        LiteralVec::new(v.into_iter().map(|l| l.into()).collect())
    }
}
