use std::path::PathBuf;

use clap::Parser;
use log::info;
use molsim::chart::{
    reference_colour, save_similarity_chart, save_structure_grid, SaveOutcome,
};
use molsim::druglikeness::is_lipinski_compliant;
use molsim::fingerprint::Tanimoto;
use molsim::logging::init_logging;
use molsim::report::{compliance_table, properties_table, reference_table};
use molsim::structure::{analyze_compounds, similarity_to_reference};
use molsim::toolkit::Depictor;
use molsim::{DefaultToolkit, StructureDataset};

/// Rank compounds by fingerprint similarity to one or more reference
/// structures and check them against the rule of five
#[derive(Parser, Debug)]
#[command(name = "structure-similarity", long_about = None)]
struct Args {
    /// JSON structure table to use instead of the built-in one
    #[arg(long)]
    dataset: Option<PathBuf>,

    /// Reference compound. Repeat for several; replaces the dataset's list
    #[arg(long)]
    reference: Vec<String>,

    /// Directory the PNG images are written to
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Skip writing images
    #[arg(long)]
    no_images: bool,

    /// Log level: error, warn, info, debug or trace
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level)?;

    let dataset = match &args.dataset {
        Some(path) => {
            info!("loading structures from {}", path.display());
            StructureDataset::load(path)?
        }
        None => StructureDataset::builtin(),
    };
    let references = if args.reference.is_empty() {
        dataset.references
    } else {
        args.reference
    };

    let toolkit = DefaultToolkit::default();
    let analysis = analyze_compounds(&toolkit, &dataset.compounds)?;
    for skipped in &analysis.skipped {
        println!("Error: {skipped}");
    }
    println!("\nMolecular Properties:");
    print!("{}", properties_table(&analysis.compounds));

    if !args.no_images {
        let depictions: Vec<_> = analysis
            .compounds
            .iter()
            .map(|c| (c.name.as_str(), toolkit.depict(&c.mol)))
            .collect();
        match save_structure_grid(&args.output_dir, &depictions) {
            SaveOutcome::Saved(path) => println!(
                "\nCompound structures saved as '{}'",
                path.display()
            ),
            SaveOutcome::Failed { reason, .. } => {
                println!("Error saving compound structures: {reason}")
            }
        }
    }

    let mut rankings = Vec::with_capacity(references.len());
    for reference in &references {
        let scores = similarity_to_reference(&analysis, reference, &Tanimoto)?;
        println!("\nTanimoto Similarity to {reference}:");
        print!("{}", reference_table(reference, &scores));
        rankings.push(scores);
    }

    // dataset order, not the order of the last ranking
    println!("\nLipinski Rule-of-5 Compliance:");
    print!(
        "{}",
        compliance_table(analysis.compounds.iter().map(|c| {
            (c.name.as_str(), is_lipinski_compliant(&c.properties))
        }))
    );

    if !args.no_images {
        for (i, (reference, scores)) in
            references.iter().zip(&rankings).enumerate()
        {
            match save_similarity_chart(
                &args.output_dir,
                reference,
                scores,
                reference_colour(i),
            ) {
                SaveOutcome::Saved(path) => println!(
                    "\nSimilarity plot saved as '{}'",
                    path.display()
                ),
                SaveOutcome::Failed { reason, .. } => {
                    println!("Error saving similarity plot: {reason}")
                }
            }
        }
    }
    Ok(())
}
