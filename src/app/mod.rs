// dimacs2net
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

mod check_command;
pub(crate) use check_command::CheckCommand;

mod generate_command;
pub(crate) use generate_command::GenerateCommand;

use crusti_app_helper::Arg;
use std::{fs, path::PathBuf};

pub(crate) const ARG_INPUT: &str = "INPUT";

pub(crate) fn arg_input<'a>() -> Arg<'a, 'a> {
    Arg::with_name(ARG_INPUT)
        .help("the input DIMACS CNF file")
        .required(true)
}

pub(crate) fn canonicalize(file_path: &str) -> String {
    format!(
        "{}",
        fs::canonicalize(PathBuf::from(file_path))
            .unwrap()
            .display()
    )
}
