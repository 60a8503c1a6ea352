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

use anyhow::{Context, Result};
use crusti_app_helper::{info, warn, App, AppSettings, ArgMatches, Command, SubCommand};
use crusti_vm::DimacsReader;
use std::{fs::File, io::BufReader, path::PathBuf};

const CMD_NAME: &str = "check";

#[derive(Default)]
pub(crate) struct CheckCommand;

impl CheckCommand {
    pub fn new() -> Self {
        CheckCommand
    }
}

impl<'a> Command<'a> for CheckCommand {
    fn name(&self) -> &str {
        CMD_NAME
    }

    fn clap_subcommand(&self) -> App<'a, 'a> {
        SubCommand::with_name(CMD_NAME)
            .about("Checks a DIMACS CNF input file and reports its statistics.")
            .setting(AppSettings::DisableVersion)
            .arg(super::arg_input())
    }

    fn execute(&self, arg_matches: &ArgMatches<'_>) -> Result<()> {
        self.execute_internal(arg_matches.value_of(super::ARG_INPUT).unwrap())
    }
}

impl CheckCommand {
    pub(crate) fn execute_internal(&self, str_path: &str) -> Result<()> {
        info!("executing DIMACS checker");
        info!("input file is {}", str_path);
        let path = PathBuf::from(str_path);
        let file_reader =
            File::open(&path).with_context(|| format!("while opening file {}", &path.display()))?;
        let mut warning_counter = 0;
        let mut warning_handler = |line: usize, reason: &str| {
            warn!("line {}: {}", line, reason);
            warning_counter += 1;
        };
        let mut dimacs_reader = DimacsReader::default();
        dimacs_reader.add_warning_handler(&mut warning_handler);
        let model = dimacs_reader.read(&mut BufReader::new(file_reader))?;
        info!("instance was read without errors");
        match warning_counter {
            0 => info!("no warnings were found"),
            n => info!("got {} warning(s)", n),
        }
        info!(
            "instance contains {} variable(s) and {} clause(s)",
            model.cnf().n_vars(),
            model.cnf().n_clauses()
        );
        info!(
            "instance names {} variable(s), of which {} are auxiliary",
            model.features().n_named(),
            model.features().n_auxiliary()
        );
        Ok(())
    }
}
