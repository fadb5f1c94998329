use std::path::PathBuf;

use clap::Parser;
use log::info;
use molsim::logging::init_logging;
use molsim::normalize::normalize_descriptors;
use molsim::report::similarity_table;
use molsim::similarity::rank_against_reference;
use molsim::{Descriptor, DescriptorDataset};

/// Rank compounds by continuous Tanimoto similarity of their normalized
/// descriptors to a reference compound
#[derive(Parser, Debug)]
#[command(name = "descriptor-similarity", long_about = None)]
struct Args {
    /// JSON descriptor table to use instead of the built-in one
    #[arg(long)]
    dataset: Option<PathBuf>,

    /// Reference compound, overriding the one named in the dataset
    #[arg(long)]
    reference: Option<String>,

    /// Log level: error, warn, info, debug or trace
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level)?;

    let mut dataset = match &args.dataset {
        Some(path) => {
            info!("loading descriptors from {}", path.display());
            DescriptorDataset::load(path)?
        }
        None => DescriptorDataset::builtin(),
    };
    let reference = args.reference.unwrap_or(dataset.reference);

    normalize_descriptors(&mut dataset.compounds, &Descriptor::ALL);
    let scores = rank_against_reference(
        &dataset.compounds,
        &reference,
        &Descriptor::ALL,
    )?;
    print!("{}", similarity_table(&reference, &scores));
    Ok(())
}
