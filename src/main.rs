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

mod app;

use app::{CheckCommand, GenerateCommand};
use crusti_app_helper::AppHelper;

fn main() {
    let mut app = AppHelper::new(
        option_env!("CARGO_PKG_NAME").unwrap_or("unknown app name"),
        option_env!("CARGO_PKG_VERSION").unwrap_or("unknown app version"),
        "Univ. Artois & CNRS",
        "dimacs2net, an extractor of strong dependency and conflict graphs from CNF variability models.",
    );
    app.add_command(Box::new(GenerateCommand::new()));
    app.add_command(Box::new(CheckCommand::new()));
    app.launch_app();
}
