// brewi: a tree-walking evaluator for the Brewin language.
//
// Copyright (C) 2019  Brandon Lewis
//
// This program is free software: you can redistribute it and/or
// modify it under the terms of the GNU Lesser General Public License
// as published by the Free Software Foundation, either version 3 of
// the License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
// Lesser General Public License for more details.
//
// You should have received a copy of the GNU Lesser General Public
// License along with this program.  If not, see
// <https://www.gnu.org/licenses/>.

use std::env::args;
use std::fs::File;
use std::io::{self, Read};
use std::process::ExitCode;

use brewi::ast::Program;
use brewi::call;
use brewi::config::Config;
use brewi::env::Env;
use brewi::host::StdHost;
use brewi::interp::Interp;
use brewi::registry;

fn load_program(path: Option<&String>) -> io::Result<Program> {
    let mut text = String::new();
    match path {
        Some(path) => File::open(path)?.read_to_string(&mut text)?,
        None => io::stdin().read_to_string(&mut text)?,
    };
    serde_json::from_str(&text).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

fn run() -> Result<(), String> {
    let argv: Vec<String> = args().collect();
    let ast_path = argv.get(1);
    let config = match argv.get(2) {
        Some(path) => Config::load(path).map_err(|e| format!("couldn't load config: {}", e))?,
        None => Config::default(),
    };

    let program = load_program(ast_path).map_err(|e| format!("couldn't load AST: {}", e))?;
    let (structs, functions) = registry::build(&program).map_err(|f| f.to_string())?;

    let mut host = StdHost::new();
    let mut interp = Interp::new(&functions, &structs, &mut host, config.level);
    let env = Env::function();

    call::call_expr(&mut interp, &env, "main", &[]).map_err(|unwind| match unwind {
        brewi::signal::Unwind::Fault(f) => f.to_string(),
        brewi::signal::Unwind::Raise(payload) => format!("uncaught exception: {}", payload),
    })?;
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{}", message);
            ExitCode::FAILURE
        }
    }
}
