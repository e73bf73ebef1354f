use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use geodump::config::{DEFAULT_DATA_DIR, DEFAULT_OUTPUT_DIR};
use geodump::pipeline::{self, PipelineConfig};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(name = "geodump")]
#[command(about = "Distill GeoNames dumps into ranked location lookup tables")]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build locations.txt and countries.txt
    Build(BuildArgs),
    /// Build countries.txt only
    Countries(CountriesArgs),
}

#[derive(Args)]
struct BuildArgs {
    /// Directory containing allCountries.txt, alternateNamesV2.txt and countryInfo.txt
    /// (each may also be .bz2 compressed)
    #[arg(short, long, default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    /// Output directory for generated files
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    output: PathBuf,

    /// Dry run - run every pass but don't write output files
    #[arg(long)]
    dry_run: bool,
}

#[derive(Args)]
struct CountriesArgs {
    /// Directory containing countryInfo.txt
    #[arg(short, long, default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    /// Output directory for generated files
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    output: PathBuf,
}

fn run_build(args: BuildArgs) -> Result<()> {
    let config = PipelineConfig {
        data_dir: args.data_dir,
        output_dir: args.output,
        dry_run: args.dry_run,
    };

    let (stats, timings) = pipeline::run(&config)?;

    println!();
    println!("=== Summary ===");
    println!("Classify time:        {:.2}s", timings.classify.as_secs_f64());
    println!("Merge time:           {:.2}s", timings.merge.as_secs_f64());
    println!("Write time:           {:.2}s", timings.write.as_secs_f64());
    println!("Total time:           {:.2}s", timings.total().as_secs_f64());
    println!();
    println!("Records scanned:      {}", stats.classify.records_scanned);
    println!("Airports:             {}", stats.classify.airports);
    println!("Airports w/o codes:   {}", stats.classify.airports_without_codes);
    println!("Cities:               {}", stats.classify.cities);
    println!("Pending divisions:    {}", stats.classify.divisions_pending);
    println!("English names:        {}", stats.merge.target_language_names);
    println!("Names attached:       {}", stats.merge.names_attached);
    println!("Divisions promoted:   {}", stats.merge.divisions_promoted);
    println!("Divisions dropped:    {}", stats.merge.divisions_dropped);
    println!("Total locations:      {}", stats.total_locations());
    println!("Locations written:    {}", stats.locations_written);
    println!("Countries written:    {}", stats.countries_written);

    Ok(())
}

fn run_countries(args: CountriesArgs) -> Result<()> {
    let written = pipeline::run_countries(&args.data_dir, &args.output)?;
    println!("Countries written:    {}", written);
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");

    let result = match cli.command {
        Commands::Build(args) => run_build(args),
        Commands::Countries(args) => run_countries(args),
    };

    match result {
        Ok(()) => {
            info!("Completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Error: {:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
