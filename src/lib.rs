//! Geodump: GeoNames gazetteer distillation pipeline
//!
//! This crate turns the raw GeoNames dumps into two compact, sorted, tab-delimited
//! lookup tables for fast runtime place lookup:
//!
//! 1. **Classification Pass** -- Stream `allCountries.txt` once, keep airports with
//!    IATA-style codes and cities (capitals, admin seats, large populated places), and
//!    park first-order divisions (plus US counties) in a pending table
//! 2. **Alternate-Name Pass** -- Stream `alternateNamesV2.txt` once and attach every
//!    English name to the matching pending division
//! 3. **Ranking** -- Promote divisions that gained at least one name, then stably sort
//!    everything: capitals first, US next, larger populations first
//! 4. **Output** -- Write `locations.txt` and `countries.txt`
//!
//! # Architecture
//!
//! - **Streaming byte reader** -- Lines are split on tabs in place, never decoded
//!   unless a field is kept
//! - **Explicit interning** -- Country codes, admin codes and timezones share one
//!   allocation per distinct value through an interner owned by the classifier
//! - **Explicit join** -- The pending table is handed from the first pass to the
//!   second as a value, so each pass is testable in isolation
//! - **Fail fast** -- Short rows, bad integers and bad UTF-8 abort the run with the
//!   offending line number
//! - **Atomic output** -- Files are written to a temp sibling and renamed into place
//!
//! # Key Modules
//!
//! - [`reader`] -- Tab-delimited record reader with optional bzip2 decompression
//! - [`classify`] -- Location classifier and the pending division table
//! - [`merge`] -- Alternate-name merge and final ranking
//! - [`countries`] -- Country code table
//! - [`output`] -- Lookup table serialization
//! - [`pipeline`] -- Pass orchestration and progress display
//! - [`models`] -- Core data types (Location, Kind, CountryEntry, SortKey)
//! - [`intern`] -- String interning table
//! - [`schema`] -- Column indices of the dump files
//! - [`stats`] -- Per-pass counters
//! - [`config`] -- File names and classification constants
//!
//! # Example Usage
//!
//! ```bash
//! # Build both tables from ./dump into the current directory
//! geodump build
//!
//! # Read compressed dumps from elsewhere, write into out/
//! geodump build -d /data/geonames -o out/
//!
//! # Only rebuild the country table
//! geodump countries -o out/
//! ```

pub mod classify;
pub mod config;
pub mod countries;
pub mod intern;
pub mod merge;
pub mod models;
pub mod output;
pub mod pipeline;
pub mod reader;
pub mod schema;
pub mod stats;
