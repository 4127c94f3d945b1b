// Copyright contributors to the Twirl project
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::{error::Error, fs, path::Path};

use clap::{Parser, Subcommand};
use log::{debug, info};

use twirl_common::Tolerance;
use twirl_groups::{GroupChoices, GroupFile, Lookup};

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    group: GroupChoices,
    #[arg(short, long, default_value_t = 1)]
    qubits: usize,
    #[arg(long, default_value_t = 1e-5)]
    rtol: f64,
    #[arg(long, default_value_t = 1e-8)]
    atol: f64,
    /// Bucket candidates by a rounded key instead of scanning the group
    #[arg(long)]
    hashed: bool,
    /// Re-test rediscovered rejected candidates instead of remembering them
    #[arg(long)]
    no_memo: bool,
    /// Abort once the group grows beyond this many elements
    #[arg(long)]
    max_elements: Option<usize>,
    #[command(subcommand)]
    commands: Option<Commands>,
}

#[derive(Subcommand, Clone, PartialEq, Eq)]
enum Commands {
    /// Write the group as JSON instead of printing it
    Generate { output: String },
}

fn main() -> Result<(), Box<dyn Error>> {
    // By default log INFO.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let tolerance = Tolerance::new(cli.rtol, cli.atol);

    let mut options = cli.group.options(cli.qubits);
    options.tolerance = tolerance;
    options.memoize_rejections = !cli.no_memo;
    options.max_elements = cli.max_elements;
    if cli.hashed {
        options.lookup = Lookup::Hashed { decimals: 6 };
    }
    debug!("Closure options: {options:?}");

    let closure = cli.group.enumerate(cli.qubits, options)?;
    info!("{}", closure.stats());

    match cli.commands {
        Some(Commands::Generate { output }) => {
            let path = Path::new(&output);
            if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
                fs::create_dir_all(dir)?;
            }
            let file = GroupFile::new(cli.group, cli.qubits, tolerance, closure.elements());
            fs::write(path, serde_json::to_string_pretty(&file)?)?;
            info!("Wrote {} elements to {}", closure.len(), path.display());
        }
        None => {
            println!("{} group on {} qubits: {} elements", cli.group, cli.qubits, closure.len());
            // Map into one string before sending to stdout
            let mut output = String::new();
            for (i, element) in closure.elements().iter().enumerate() {
                output.push_str(&format!("#{i}{element}"));
            }
            print!("{output}");
        }
    }

    Ok(())
}
