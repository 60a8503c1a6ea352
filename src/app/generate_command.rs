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

use anyhow::{anyhow, Context, Result};
use crusti_app_helper::{info, warn, App, AppSettings, Arg, ArgMatches, Command, SubCommand};
use crusti_vm::{
    analyze, AnalysisSettings, DimacsReader, FeatureListWriter, PajekWriter, StrongGraphAnalysis,
    VariabilityModel,
};
use std::{
    fs::{self, File},
    io::BufReader,
    path::{Path, PathBuf},
};

pub(crate) struct GenerateCommand;

const CMD_NAME: &str = "generate";

const ARG_DETECTOR: &str = "DETECTOR";
const ARG_KEEP_DIMACS: &str = "KEEP_DIMACS";
const ARG_OUTPUT_DIR: &str = "OUTPUT_DIR";
const ARG_THREADS: &str = "THREADS";

impl GenerateCommand {
    pub fn new() -> Self {
        GenerateCommand
    }
}

impl<'a> Command<'a> for GenerateCommand {
    fn name(&self) -> &str {
        CMD_NAME
    }

    fn clap_subcommand(&self) -> App<'a, 'a> {
        SubCommand::with_name(CMD_NAME)
            .about("Generates the strong dependency and conflict graphs of a CNF variability model.")
            .setting(AppSettings::DisableVersion)
            .arg(super::arg_input())
            .arg(
                Arg::with_name(ARG_THREADS)
                    .long("threads")
                    .short("t")
                    .takes_value(true)
                    .default_value("1")
                    .help("sets the number of worker threads"),
            )
            .arg(
                Arg::with_name(ARG_OUTPUT_DIR)
                    .long("output-dir")
                    .short("o")
                    .takes_value(true)
                    .help("sets the output directory (defaults to the input file's directory)"),
            )
            .arg(
                Arg::with_name(ARG_DETECTOR)
                    .long("detector")
                    .short("d")
                    .takes_value(true)
                    .default_value("one")
                    .possible_values(&["one", "without"])
                    .help("sets the backbone detection algorithm"),
            )
            .arg(
                Arg::with_name(ARG_KEEP_DIMACS)
                    .long("keep-dimacs")
                    .short("k")
                    .help("keeps the intermediate DIMACS file when the input had to be converted"),
            )
    }

    fn execute(&self, arg_matches: &ArgMatches<'_>) -> Result<()> {
        let n_threads = arg_matches
            .value_of(ARG_THREADS)
            .unwrap()
            .parse::<usize>()
            .context("while parsing the number of worker threads")?;
        self.execute_internal(
            arg_matches.value_of(super::ARG_INPUT).unwrap(),
            arg_matches.value_of(ARG_OUTPUT_DIR),
            arg_matches.value_of(ARG_DETECTOR).unwrap(),
            n_threads,
            arg_matches.is_present(ARG_KEEP_DIMACS),
        )
    }
}

impl GenerateCommand {
    fn execute_internal(
        &self,
        input: &str,
        output_dir: Option<&str>,
        detector: &str,
        n_threads: usize,
        keep_dimacs: bool,
    ) -> Result<()> {
        let input_path = PathBuf::from(input);
        check_input_extension(&input_path)?;
        if keep_dimacs {
            warn!("the input file is already in the DIMACS CNF format; ignoring --keep-dimacs");
        }
        let file = File::open(&input_path)
            .with_context(|| format!(r#"while opening file "{}""#, input))?;
        info!("reading input file {}", super::canonicalize(input));
        let model = read_model(file)?;
        info!(
            "read a formula with {} variables and {} clauses",
            model.cnf().n_vars(),
            model.cnf().n_clauses()
        );
        let settings = AnalysisSettings::new(detector.parse()?, n_threads);
        let analysis = analyze(&model, &settings)?;
        let out_dir = match output_dir {
            Some(d) => PathBuf::from(d),
            None => input_path.parent().unwrap_or_else(|| Path::new(".")).to_path_buf(),
        };
        fs::create_dir_all(&out_dir)
            .with_context(|| format!(r#"while creating the output directory "{}""#, out_dir.display()))?;
        let basename = input_path
            .file_stem()
            .unwrap()
            .to_string_lossy()
            .into_owned();
        write_output_files(&model, &analysis, &out_dir, &basename)
    }
}

fn check_input_extension(input_path: &Path) -> Result<()> {
    let extension = input_path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match extension.as_deref() {
        Some("dimacs") | Some("cnf") => Ok(()),
        _ => Err(anyhow!(
            r#"unsupported input file "{}"; expected a .dimacs or .cnf file"#,
            input_path.display()
        )),
    }
}

fn read_model(file: File) -> Result<VariabilityModel> {
    let mut warning_handler = |line: usize, reason: &str| warn!("line {}: {}", line, reason);
    let mut reader = DimacsReader::default();
    reader.add_warning_handler(&mut warning_handler);
    reader.read(&mut BufReader::new(file))
}

fn write_output_files(
    model: &VariabilityModel,
    analysis: &StrongGraphAnalysis,
    out_dir: &Path,
    basename: &str,
) -> Result<()> {
    let create = |suffix: &str| -> Result<File> {
        let path = out_dir.join(format!("{}{}", basename, suffix));
        info!("saving to {}", path.display());
        File::create(&path)
            .with_context(|| format!(r#"while creating the output file "{}""#, path.display()))
    };
    let features = model.features();
    PajekWriter::new().write_requires(
        features,
        analysis.requires(),
        &mut create("__requires.net")?,
    )?;
    PajekWriter::new().write_excludes(
        features,
        analysis.excludes(),
        &mut create("__excludes.net")?,
    )?;
    FeatureListWriter::new().write_core(
        features,
        analysis.global_backbone(),
        &mut create("__core.txt")?,
    )?;
    FeatureListWriter::new().write_dead(
        features,
        analysis.global_backbone(),
        &mut create("__dead.txt")?,
    )?;
    Ok(())
}
