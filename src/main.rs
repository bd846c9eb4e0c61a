// Thin driver around the library: read a control file, build the network it
// names, then either train on the example sets or run them.
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use abcd_nn::control::DEFAULT_CONTROL_FILE;
use abcd_nn::files::dataset::{read_input_set, read_target_set};
use abcd_nn::report::{self, TrainingReport};
use abcd_nn::train::train_config::DEFAULT_LOG_EVERY;
use abcd_nn::{train_on_set, ControlFile, Network, NetworkConfig, TrainingConfig};

#[derive(Parser, Debug)]
#[command(
    name = "abcd-nn",
    version,
    about = "Train or run an A-B-C-D perceptron described by a control file."
)]
struct Cli {
    /// Control file naming the network configuration, input set and target set.
    #[arg(default_value = DEFAULT_CONTROL_FILE)]
    control_file: PathBuf,

    /// After training, write the configuration and stopping state here as JSON.
    #[arg(long)]
    report: Option<PathBuf>,

    /// Log training progress every N epochs (0 = never).
    #[arg(long, value_name = "N", default_value_t = DEFAULT_LOG_EVERY)]
    log_every: usize,
}

impl Cli {
    /// Applies command-line overrides to the training parameters read from file.
    fn tune(&self, training: TrainingConfig) -> TrainingConfig {
        training.with_log_every(self.log_every)
    }
}

fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("An error has terminated execution:\n\t{:#}", err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    info!(path = %cli.control_file.display(), "using control file");
    let control = ControlFile::load(&cli.control_file)
        .with_context(|| format!("reading control file {}", cli.control_file.display()))?;

    info!(path = %control.network_config.display(), "using network configuration file");
    let mut config = NetworkConfig::load(&control.network_config)?;
    config.training = cli.tune(config.training);
    let mut network = Network::from_config(&config)?;

    let topology = *network.topology();
    let inputs = read_input_set(&control.input_set, topology.input_size())?;
    let targets = read_target_set(&control.target_set, topology.output_size())?;

    if control.train {
        println!("Training network...\n");
        let stopping = train_on_set(
            &mut network,
            &inputs,
            &targets,
            &config.training,
            &config.checkpoints,
        )?;
        println!("{}", report::training_summary(&config, &stopping));

        if let Some(path) = &cli.report {
            TrainingReport { config: config.clone(), stopping }
                .save_json(path)
                .with_context(|| format!("writing report {}", path.display()))?;
        }
    } else {
        println!("Running network...\n");
        println!("{}", report::network_summary(&config));
    }

    let outputs = network.run_on_set(&inputs)?;
    print!("{}", report::comparison_table(&targets, &outputs));
    Ok(())
}
