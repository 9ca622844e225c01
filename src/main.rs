use clap::Parser;
use heredity::inference::{self, InferenceOptions, DEFAULT_MAX_PEOPLE};
use heredity::observable::CsvBuilder;
use heredity::prelude::*;
use heredity::report::{self, Format};
use std::convert::TryFrom;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process;

#[derive(Parser, Debug)]
#[command(
    name = "heredity",
    version,
    about = "Posterior gene and trait probabilities for every person of a small pedigree."
)]
struct Args {
    /// Delimited file with the columns name, mother, father and trait.
    data: PathBuf,

    /// TOML file overriding the default probability tables.
    #[arg(long)]
    model: Option<PathBuf>,

    /// Output layout, `text` or `tsv`.
    #[arg(long, default_value = "text")]
    format: Format,

    /// Field delimiter of the input file.
    #[arg(long, default_value_t = ',')]
    delimiter: char,

    /// Enumerate trait assignments on all cores.
    #[arg(long)]
    parallel: bool,

    /// Largest pedigree the enumeration will accept.
    #[arg(long, default_value_t = DEFAULT_MAX_PEOPLE)]
    max_people: usize,
}

fn run(args: &Args) -> Result<()> {
    let model = match &args.model {
        Some(path) => ProbabilityModel::from_path(path)?,
        None => ProbabilityModel::default(),
    };

    let mut population = Population::new();
    population.observe(
        CsvBuilder::new()
            .delimiter(args.delimiter as u8)
            .from_path(&args.data)?,
    )?;
    log::info!("Loaded {} people from {}", population.len(), args.data.display());

    let pedigree = Pedigree::try_from(&population)?;
    let options = InferenceOptions {
        parallel: args.parallel,
        max_people: args.max_people,
    };
    let distributions = inference::infer(&pedigree, &model, &options)?;

    let stdout = io::stdout();
    report::write(&distributions, args.format, BufWriter::new(stdout.lock()))
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    if !args.delimiter.is_ascii() {
        eprintln!("Error: the delimiter must be a single ASCII character");
        process::exit(1);
    }

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
