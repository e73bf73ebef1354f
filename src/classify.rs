use crate::config::{CITY_MIN_POPULATION, PENDING_CAPACITY, PRIORITY_COUNTRY};
use crate::intern::Interner;
use crate::models::{Kind, Location};
use crate::reader::{Record, TsvReader};
use crate::schema::geoname;
use crate::stats::ClassifyStats;
use anyhow::{bail, Context, Result};
use rustc_hash::FxHashMap;
use std::io::BufRead;
use std::rc::Rc;
use tracing::{info, trace};

const AIRPORT: &[u8] = b"AIRP";
const CAPITAL: &[u8] = b"PPLC";
const ADMIN1_SEAT: &[u8] = b"PPLA";
const ADMIN1_DIVISION: &[u8] = b"ADM1";
const ADMIN2_DIVISION: &[u8] = b"ADM2";
const POPULATED_PLACE_PREFIX: u8 = b'P';

/// Divisions waiting for alternate names, keyed by geoname id.
///
/// Entries keep the order they were inserted in, so promotion is deterministic.
#[derive(Debug, Default)]
pub struct PendingLocations {
    entries: Vec<Location>,
    by_geoid: FxHashMap<u64, usize>,
}

impl PendingLocations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            by_geoid: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    pub fn insert(&mut self, location: Location) -> Result<()> {
        if self.by_geoid.contains_key(&location.geoid) {
            bail!("Duplicate geoname id {} among divisions", location.geoid);
        }
        self.by_geoid.insert(location.geoid, self.entries.len());
        self.entries.push(location);
        Ok(())
    }

    pub fn get(&self, geoid: u64) -> Option<&Location> {
        self.by_geoid.get(&geoid).map(|&i| &self.entries[i])
    }

    pub fn get_mut(&mut self, geoid: u64) -> Option<&mut Location> {
        self.by_geoid.get(&geoid).map(|&i| &mut self.entries[i])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consumes the table, yielding entries in insertion order.
    pub fn into_locations(self) -> impl Iterator<Item = Location> {
        self.entries.into_iter()
    }
}

/// Output of the classification pass
#[derive(Debug, Default)]
pub struct Classification {
    /// Airports and cities, in source order
    pub accepted: Vec<Location>,
    pub pending: PendingLocations,
    pub stats: ClassifyStats,
}

/// Single-pass classifier over `allCountries.txt` records.
pub struct Classifier {
    interner: Interner,
    accepted: Vec<Location>,
    pending: PendingLocations,
    stats: ClassifyStats,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier {
    pub fn new() -> Self {
        Self {
            interner: Interner::new(),
            accepted: Vec::new(),
            pending: PendingLocations::with_capacity(PENDING_CAPACITY),
            stats: ClassifyStats::default(),
        }
    }

    pub fn classify(&mut self, record: &Record<'_>) -> Result<()> {
        self.stats.records_scanned += 1;

        let Some((kind, aliases)) = self.decide(record)? else {
            return Ok(());
        };

        let location = build_location(record, kind, aliases, &mut self.interner)?;
        match kind {
            Kind::Airport => {
                self.stats.airports += 1;
                self.accepted.push(location);
            }
            Kind::City => {
                self.stats.cities += 1;
                self.accepted.push(location);
            }
            Kind::Division => {
                self.stats.divisions_pending += 1;
                self.pending
                    .insert(location)
                    .with_context(|| format!("Line {}", record.line_number()))?;
            }
        }
        Ok(())
    }

    /// First matching rule wins; `None` means the record is not a location.
    fn decide(&mut self, record: &Record<'_>) -> Result<Option<(Kind, Vec<String>)>> {
        let feature_code = record.bytes(geoname::FEATURE_CODE)?;

        if feature_code == AIRPORT {
            let codes = airport_codes(record.bytes(geoname::ALTERNATENAMES)?);
            if codes.is_empty() {
                self.stats.airports_without_codes += 1;
                trace!(line = record.line_number(), "Airport has no IATA-style code");
                return Ok(None);
            }
            return Ok(Some((Kind::Airport, codes)));
        }

        if feature_code == CAPITAL
            || feature_code == ADMIN1_SEAT
            || (feature_code.first() == Some(&POPULATED_PLACE_PREFIX)
                && record.parse::<i64>(geoname::POPULATION)? >= CITY_MIN_POPULATION)
        {
            return Ok(Some((Kind::City, Vec::new())));
        }

        if feature_code == ADMIN1_DIVISION
            || (feature_code == ADMIN2_DIVISION
                && record.bytes(geoname::COUNTRY_CODE)? == PRIORITY_COUNTRY.as_bytes())
        {
            return Ok(Some((Kind::Division, Vec::new())));
        }

        Ok(None)
    }

    pub fn finish(mut self) -> Classification {
        self.stats.interned_strings = self.interner.len() as u64;
        Classification {
            accepted: self.accepted,
            pending: self.pending,
            stats: self.stats,
        }
    }
}

/// Runs the classifier over every record of the place dataset.
pub fn classify_locations<R: BufRead>(reader: &mut TsvReader<R>) -> Result<Classification> {
    let mut classifier = Classifier::new();
    while let Some(record) = reader.next_record(geoname::MIN_FIELDS)? {
        classifier.classify(&record)?;
    }
    let classification = classifier.finish();

    info!(
        records = classification.stats.records_scanned,
        airports = classification.stats.airports,
        cities = classification.stats.cities,
        pending_divisions = classification.stats.divisions_pending,
        interned = classification.stats.interned_strings,
        "Classification complete"
    );

    Ok(classification)
}

/// Comma-separated entries of exactly three ASCII uppercase letters, in order.
pub fn airport_codes(alternate_names: &[u8]) -> Vec<String> {
    alternate_names
        .split(|&b| b == b',')
        .filter(|name| name.len() == 3 && name.iter().all(u8::is_ascii_uppercase))
        .map(|name| name.iter().map(|&b| char::from(b)).collect())
        .collect()
}

fn is_alphabetic(bytes: &[u8]) -> bool {
    !bytes.is_empty() && bytes.iter().all(u8::is_ascii_alphabetic)
}

fn build_location(
    record: &Record<'_>,
    kind: Kind,
    aliases: Vec<String>,
    interner: &mut Interner,
) -> Result<Location> {
    let geoid = record.parse::<u64>(geoname::GEONAMEID)?;
    let feature_code = record.bytes(geoname::FEATURE_CODE)?;

    let admin_bytes = record.bytes(geoname::ADMIN1_CODE)?;
    let admin_code = if is_alphabetic(admin_bytes) {
        Some(intern_column(interner, record, geoname::ADMIN1_CODE)?)
    } else {
        None
    };

    Ok(Location {
        name: record.text(geoname::ASCIINAME)?.to_owned(),
        aliases,
        country: intern_column(interner, record, geoname::COUNTRY_CODE)?,
        admin_code,
        kind,
        tz: intern_column(interner, record, geoname::TIMEZONE)?,
        geoid,
        capital: feature_code == CAPITAL,
        population: record.parse::<i64>(geoname::POPULATION)?,
    })
}

fn intern_column(interner: &mut Interner, record: &Record<'_>, column: usize) -> Result<Rc<str>> {
    interner
        .intern(record.bytes(column)?)
        .with_context(|| format!("Line {}, column {}", record.line_number(), column))
}
