use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::ArgMatches;

use buscollate_collate::collate::collate;
use buscollate_collate::genes::{GeneCount, GeneList};
use buscollate_collate::manifest::SequenceFileManifest;
use buscollate_collate::report::RunReport;
use buscollate_collate::writer::write_per_gene;

/// Everything a collation run needs, owned and explicit. Built once from
/// the parsed arguments and handed to the components.
pub struct CollateConfig {
    pub input: PathBuf,
    pub genes: PathBuf,
    pub output: PathBuf,
    pub id_column: Option<String>,
    pub report: Option<PathBuf>,
}

impl CollateConfig {
    pub fn from_matches(matches: &ArgMatches) -> Self {
        let input = matches
            .get_one::<String>("input")
            .expect("A path to a file of filenames is required.");

        let genes = matches
            .get_one::<String>("genes")
            .expect("A path to a gene list is required.");

        let output = matches
            .get_one::<String>("output")
            .expect("The output directory has a default.");

        CollateConfig {
            input: PathBuf::from(input),
            genes: PathBuf::from(genes),
            output: PathBuf::from(output),
            id_column: matches.get_one::<String>("id-column").cloned(),
            report: matches.get_one::<String>("report").map(PathBuf::from),
        }
    }
}

pub fn run_collate(matches: &ArgMatches) -> Result<()> {
    let config = CollateConfig::from_matches(matches);

    let genes = GeneList::from_file(&config.genes, config.id_column.as_deref())?;
    if genes.duplicate_count() > 0 {
        eprintln!(
            "warning: gene list contains {} duplicate identifier(s)",
            genes.duplicate_count()
        );
    }

    let manifest = SequenceFileManifest::from_file(&config.input)?;

    println!(
        "Collating {} genomes against {} genes",
        manifest.len(),
        genes.n_genes()
    );

    let outcome = collate(&genes, &manifest)?;
    let failures = write_per_gene(&outcome.best, &config.output)?;

    let report = RunReport::new(&genes, &outcome, &failures);
    print!("{report}");

    if let Some(report_path) = &config.report {
        report
            .to_json_file(report_path)
            .with_context(|| format!("Failed to write report: {:?}", report_path))?;
        eprintln!("Report written to {}", report_path.display());
    }

    Ok(())
}
