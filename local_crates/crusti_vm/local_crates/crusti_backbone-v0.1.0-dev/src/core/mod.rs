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

mod backbone;
pub use backbone::Backbone;

mod clause;
pub use clause::Clause;

mod cnf;
pub use cnf::CnfFormula;

mod literal;
pub use literal::Literal;
pub use literal::LiteralVec;
pub use literal::VarId;
