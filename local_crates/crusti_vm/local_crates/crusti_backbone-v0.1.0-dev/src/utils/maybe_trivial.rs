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

/// A logical content that may be trivial.
///
/// This enum mainly acts like an [`Option`],
/// where [`Some`] is replaced by [`NotTrivial`]
/// and [`None`] can be [`True`] or [`False`].
///
/// [`Option`]: std::option::Option
/// [`Some`]: std::option::Option::Some
/// [`None`]: std::option::Option::None
/// [`NotTrivial`]: MaybeTrivial::NotTrivial
/// [`True`]: MaybeTrivial::True
/// [`False`]: MaybeTrivial::False
#[derive(Debug)]
pub enum MaybeTrivial<T> {
    /// A value which is not trivial
    NotTrivial(T),
    /// A trivially `true` value (a tautology)
    True,
    /// A trivially `false` value (a contradiction)
    False,
}

impl<F> MaybeTrivial<F> {
    /// Returns the contained [`MaybeTrivial::NotTrivial`] value, consuming the self value.
    ///
    /// # Panics
    ///
    /// Panics if the self value equals `True` or `False`.
    pub fn unwrap(self) -> F {
        match self {
            MaybeTrivial::NotTrivial(f) => f,
            MaybeTrivial::True => panic!("cannot unwrap MaybeTrivial for True"),
            MaybeTrivial::False => panic!("cannot unwrap MaybeTrivial for False"),
        }
    }

    /// Returns `true` if the `MaybeTrivial` is a [`False`] value.
    ///
    /// [`False`]: MaybeTrivial::False
    pub fn is_false(&self) -> bool {
        matches!(self, MaybeTrivial::False)
    }

    /// Returns `true` if the `MaybeTrivial` is a [`True`] value.
    ///
    /// [`True`]: MaybeTrivial::True
    pub fn is_true(&self) -> bool {
        matches!(self, MaybeTrivial::True)
    }

    /// Maps a `MaybeTrivial<T>` to `MaybeTrivial<U>` by applying a function to a non-trivial value.
    pub fn map<M, U>(self, mapper: M) -> MaybeTrivial<U>
    where
        M: FnOnce(F) -> U,
    {
        match self {
            MaybeTrivial::NotTrivial(f) => MaybeTrivial::NotTrivial(mapper(f)),
            MaybeTrivial::True => MaybeTrivial::True,
            MaybeTrivial::False => MaybeTrivial::False,
        }
    }
}

impl<F> PartialEq for MaybeTrivial<F>
where
    F: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (MaybeTrivial::NotTrivial(f), MaybeTrivial::NotTrivial(f2)) => f.eq(f2),
            (MaybeTrivial::True, MaybeTrivial::True) => true,
            (MaybeTrivial::False, MaybeTrivial::False) => true,
            _ => false,
        }
    }
}
