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

use std::{error::Error, fs, io, path::PathBuf};

use clap::Parser;
use log::{debug, info, trace};
use rand::SeedableRng;
use rand::rngs::StdRng;

use twirl_averages::{Ensembles, Experiment, experiment};
use twirl_groups::GroupFile;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    experiment: Experiment,
    /// Number of samples for the sampled ensembles
    #[arg(short = 'n', long, default_value_t = 10_000)]
    samples: usize,
    /// Seed for reproducible sampling
    #[arg(short, long)]
    seed: Option<u64>,
    /// A group written by `twirl_groups generate`, averaged alongside the
    /// built-in groups
    #[arg(short, long)]
    group_file: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    // By default log INFO.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    trace!("Cli arguments: {:?}", cli);

    let mut ensembles = Ensembles::standard()?;
    if let Some(path) = &cli.group_file {
        let file: GroupFile = serde_json::from_str(&fs::read_to_string(path)?)?;
        let name = format!("{}-{}q", file.group, file.qubits);
        let group = file.matrices()?;
        info!("Loaded {} elements of {name} from {}", group.len(), path.display());
        ensembles = ensembles.with_extra(name, group);
    }

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };

    let reports = experiment::run(cli.experiment, &ensembles, cli.samples, &mut rng)?;
    let mut wtr = csv::Writer::from_writer(io::stdout());
    let err = reports.into_iter().try_for_each(|report| wtr.serialize(report));
    debug!("Exited with {:?}", err);
    err?;
    wtr.flush()?;

    Ok(())
}
