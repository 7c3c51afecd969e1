use clap::{Arg, Command};

use buscollate_collate::consts::DEFAULT_OUT;

use crate::consts;

pub fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .author("Genebuild")
        .about("Collate per-genome BUSCO cDNA results, keeping the longest isoform per gene.")
        .arg_required_else_help(true)
        .arg(
            Arg::new("input")
                .long("input")
                .short('i')
                .required(true)
                .help("File of filenames listing per-genome BUSCO cDNA FASTA files, one per line"),
        )
        .arg(
            Arg::new("genes")
                .long("genes")
                .short('l')
                .required(true)
                .help("Tab-separated BUSCO gene list with a header row"),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .default_value(DEFAULT_OUT)
                .help("Output directory for per-gene FASTA files"),
        )
        .arg(
            Arg::new("id-column")
                .long("id-column")
                .help("Header name of the gene identifier column (default: first column)"),
        )
        .arg(
            Arg::new("report")
                .long("report")
                .help("Write a JSON run report to this path"),
        )
}
