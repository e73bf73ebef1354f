use crate::classify::classify_locations;
use crate::config::{
    ALTERNATE_NAMES_FILE, COUNTRIES_FILE, COUNTRY_INFO_FILE, GEONAMES_FILE, LOCATIONS_FILE,
};
use crate::countries::read_countries;
use crate::merge::{attach_alternate_names, rank_locations};
use crate::models::{CountryEntry, Location};
use crate::output::{write_atomically, write_countries, write_locations};
use crate::reader::{locate_dataset, open_dataset};
use crate::stats::PipelineStats;
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::info;

pub struct PipelineConfig {
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Run every pass but write nothing
    pub dry_run: bool,
}

/// Resolved input files; all must exist before any pass starts.
struct Datasets {
    geonames: PathBuf,
    alternate_names: PathBuf,
    country_info: PathBuf,
}

impl Datasets {
    fn locate(data_dir: &Path) -> Result<Self> {
        Ok(Self {
            geonames: locate_dataset(data_dir, GEONAMES_FILE)?,
            alternate_names: locate_dataset(data_dir, ALTERNATE_NAMES_FILE)?,
            country_info: locate_dataset(data_dir, COUNTRY_INFO_FILE)?,
        })
    }
}

#[derive(Debug, Default)]
pub struct PipelineTimings {
    pub classify: Duration,
    pub merge: Duration,
    pub write: Duration,
}

impl PipelineTimings {
    pub fn total(&self) -> Duration {
        self.classify + self.merge + self.write
    }
}

/// Builds both lookup tables from the datasets in `config.data_dir`.
pub fn run(config: &PipelineConfig) -> Result<(PipelineStats, PipelineTimings)> {
    let datasets = Datasets::locate(&config.data_dir)?;
    let mut stats = PipelineStats::new();
    let mut timings = PipelineTimings::default();

    let locations = build_locations(&datasets, &mut stats, &mut timings)?;
    let countries = build_countries(&datasets.country_info)?;

    let start = Instant::now();
    if config.dry_run {
        info!("Dry run, skipping output files");
    } else {
        let spinner = make_spinner("[3] Writing locations");
        stats.locations_written = save_locations(&config.output_dir, &locations)?;
        spinner.finish_and_clear();

        let spinner = make_spinner("[4] Writing countries");
        stats.countries_written = save_countries(&config.output_dir, &countries)?;
        spinner.finish_and_clear();
    }
    timings.write = start.elapsed();

    Ok((stats, timings))
}

fn build_locations(
    datasets: &Datasets,
    stats: &mut PipelineStats,
    timings: &mut PipelineTimings,
) -> Result<Vec<Location>> {
    let start = Instant::now();
    let pb = make_progress_bar("[1] Finding locations");
    let mut reader = open_dataset(&datasets.geonames, &pb)?;
    let classification = classify_locations(&mut reader)
        .with_context(|| format!("Failed to classify {}", datasets.geonames.display()))?;
    pb.finish_and_clear();
    stats.classify = classification.stats;
    timings.classify = start.elapsed();

    let start = Instant::now();
    let pb = make_progress_bar("[2] Finding alternative names");
    let mut reader = open_dataset(&datasets.alternate_names, &pb)?;
    let mut pending = classification.pending;
    stats.merge = attach_alternate_names(&mut reader, &mut pending)
        .with_context(|| format!("Failed to merge {}", datasets.alternate_names.display()))?;
    pb.finish_and_clear();

    let locations = rank_locations(classification.accepted, pending, &mut stats.merge);
    timings.merge = start.elapsed();
    info!(
        locations = locations.len(),
        duration_secs = timings.merge.as_secs_f64(),
        "Locations ranked"
    );
    Ok(locations)
}

fn build_countries(path: &Path) -> Result<Vec<CountryEntry>> {
    let pb = ProgressBar::hidden();
    let mut reader = open_dataset(path, &pb)?;
    read_countries(&mut reader).with_context(|| format!("Failed to read {}", path.display()))
}

fn save_locations(output_dir: &Path, locations: &[Location]) -> Result<u64> {
    let path = output_dir.join(LOCATIONS_FILE);
    let written = write_atomically(&path, |w| write_locations(w, locations))?;
    info!(rows = written, path = ?path, "Locations written");
    Ok(written)
}

fn save_countries(output_dir: &Path, countries: &[CountryEntry]) -> Result<u64> {
    let path = output_dir.join(COUNTRIES_FILE);
    let written = write_atomically(&path, |w| write_countries(w, countries))?;
    info!(rows = written, path = ?path, "Countries written");
    Ok(written)
}

/// Builds only the country table.
pub fn run_countries(data_dir: &Path, output_dir: &Path) -> Result<u64> {
    let path = locate_dataset(data_dir, COUNTRY_INFO_FILE)?;
    let countries = build_countries(&path)?;
    save_countries(output_dir, &countries)
}

fn make_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(msg.to_string());
    pb
}

fn make_progress_bar(label: &str) -> ProgressBar {
    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(&format!(
                "{label} [{{bar:30.cyan/blue}}] {{bytes}}/{{total_bytes}} ({{eta}})"
            ))
            .unwrap()
            .progress_chars("=> "),
    );
    pb
}
