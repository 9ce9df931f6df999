use charset_gen::{CharsetDefinition, emit};
use clap::Parser;
use log::{debug, info};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "charset-gen")]
#[command(version)]
#[command(
    about = "Generate a POCO TextEncoding class pair from a charmap read on stdin",
    long_about = None
)]
struct Cli {
    /// Name of the generated encoding class
    #[arg(value_name = "CLASS", default_value = "UNDEFINED")]
    class_name: String,

    /// Definitions (.cpp) output path [default: <CLASS>.cpp]
    #[arg(value_name = "SOURCE")]
    source: Option<PathBuf>,

    /// Declarations (.h) output path [default: SOURCE with its extension
    /// swapped to .h]
    #[arg(value_name = "HEADER")]
    header: Option<PathBuf>,
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let source_path = cli
        .source
        .unwrap_or_else(|| PathBuf::from(format!("{}.cpp", cli.class_name)));
    let header_path = cli
        .header
        .unwrap_or_else(|| source_path.with_extension("h"));

    let mut charmap = String::new();
    io::stdin().read_to_string(&mut charmap)?;

    // The whole charmap is validated and both artifacts are rendered before
    // either output file is created, so a failed run leaves nothing behind.
    let definition = CharsetDefinition::parse(&charmap)?;
    info!(
        "{}: {} mapped byte codes, {} names, {} reverse buckets",
        cli.class_name,
        definition.mapped_count(),
        definition.names().len(),
        definition.occupied_buckets().count()
    );

    let header = emit::header(&definition, &cli.class_name);
    let source = emit::source(&definition, &cli.class_name);

    fs::write(&header_path, header)?;
    fs::write(&source_path, source)?;
    debug!(
        "wrote {} and {}",
        header_path.display(),
        source_path.display()
    );

    Ok(())
}
