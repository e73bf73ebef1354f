//! Tab-delimited writers for the generated lookup tables.
//!
//! Neither file has a header row and values are never quoted, so every line is
//! exactly the fields joined by tabs.

use crate::config::{ALIAS_SEPARATOR, WRITE_BUFFER_SIZE};
use crate::models::{CountryEntry, Kind, Location};
use anyhow::{Context, Result};
use csv::{QuoteStyle, Terminator, Writer, WriterBuilder};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// One row of `locations.txt`
#[derive(Serialize)]
struct LocationRow<'a> {
    name: &'a str,
    aliases: String,
    country: &'a str,
    admin_code: Option<&'a str>,
    kind: Kind,
    tz: &'a str,
}

impl<'a> From<&'a Location> for LocationRow<'a> {
    fn from(location: &'a Location) -> Self {
        Self {
            name: &location.name,
            aliases: location.aliases.join(ALIAS_SEPARATOR),
            country: &location.country,
            admin_code: location.admin_code.as_deref(),
            kind: location.kind,
            tz: &location.tz,
        }
    }
}

/// One row of `countries.txt`
#[derive(Serialize)]
struct CountryRow<'a> {
    iso_code: &'a str,
    name: &'a str,
}

fn tsv_writer<W: Write>(writer: W) -> Writer<W> {
    WriterBuilder::new()
        .delimiter(b'\t')
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .has_headers(false)
        .from_writer(writer)
}

pub fn write_locations<W: Write>(writer: W, locations: &[Location]) -> Result<u64> {
    let mut writer = tsv_writer(writer);
    let mut written = 0u64;
    for location in locations {
        writer
            .serialize(LocationRow::from(location))
            .with_context(|| format!("Failed to write location {}", location.geoid))?;
        written += 1;
    }
    writer.flush()?;
    Ok(written)
}

pub fn write_countries<W: Write>(writer: W, countries: &[CountryEntry]) -> Result<u64> {
    let mut writer = tsv_writer(writer);
    let mut written = 0u64;
    for country in countries {
        writer
            .serialize(CountryRow {
                iso_code: &country.iso_code,
                name: &country.name,
            })
            .with_context(|| format!("Failed to write country {}", country.iso_code))?;
        written += 1;
    }
    writer.flush()?;
    Ok(written)
}

/// Writes `path` through a `.tmp` sibling renamed into place once `write` succeeds.
pub fn write_atomically<T, F>(path: &Path, write: F) -> Result<T>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<T>,
{
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }
    }

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = Path::new(&tmp_name);

    let file = File::create(tmp_path)
        .with_context(|| format!("Failed to create temp file: {:?}", tmp_path))?;
    let mut writer = BufWriter::with_capacity(WRITE_BUFFER_SIZE, file);

    let value = write(&mut writer)?;
    writer
        .flush()
        .with_context(|| format!("Failed to flush: {:?}", tmp_path))?;
    drop(writer);

    fs::rename(tmp_path, path)
        .with_context(|| format!("Failed to rename temp file to: {:?}", path))?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;
    use tempfile::TempDir;

    fn location(name: &str, aliases: &[&str], admin: Option<&str>, kind: Kind) -> Location {
        Location {
            name: name.to_string(),
            aliases: aliases.iter().map(|s| s.to_string()).collect(),
            country: Rc::from("US"),
            admin_code: admin.map(Rc::from),
            kind,
            tz: Rc::from("America/New_York"),
            geoid: 1,
            capital: false,
            population: 0,
        }
    }

    fn render(locations: &[Location]) -> String {
        let mut buf = Vec::new();
        write_locations(&mut buf, locations).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn city_without_aliases_or_admin_code() {
        let out = render(&[location("Metropolis", &[], None, Kind::City)]);
        assert_eq!(out, "Metropolis\t\tUS\t\tcity\tAmerica/New_York\n");
    }

    #[test]
    fn aliases_are_joined_with_semicolons() {
        let out = render(&[location("Gotham", &["Foo", "Bar"], Some("NJ"), Kind::Division)]);
        assert_eq!(out, "Gotham\tFoo;Bar\tUS\tNJ\tdivision\tAmerica/New_York\n");
    }

    #[test]
    fn values_are_never_quoted() {
        let out = render(&[location("St. John's, \"Old\" Town", &["SJT"], None, Kind::Airport)]);
        assert_eq!(
            out,
            "St. John's, \"Old\" Town\tSJT\tUS\t\tairport\tAmerica/New_York\n"
        );
    }

    #[test]
    fn writes_one_line_per_location() {
        let locations = vec![
            location("A", &[], None, Kind::City),
            location("B", &[], None, Kind::City),
        ];
        let mut buf = Vec::new();
        let written = write_locations(&mut buf, &locations).unwrap();
        assert_eq!(written, 2);
        assert_eq!(String::from_utf8(buf).unwrap().lines().count(), 2);
    }

    #[test]
    fn countries_are_two_columns() {
        let countries = vec![
            CountryEntry {
                iso_code: "AD".to_string(),
                name: "Andorra".to_string(),
            },
            CountryEntry {
                iso_code: "US".to_string(),
                name: "United States".to_string(),
            },
        ];
        let mut buf = Vec::new();
        assert_eq!(write_countries(&mut buf, &countries).unwrap(), 2);
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "AD\tAndorra\nUS\tUnited States\n"
        );
    }

    #[test]
    fn atomic_write_replaces_target() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.txt");
        fs::write(&path, "old\n").unwrap();

        write_atomically(&path, |w| {
            w.write_all(b"new\n")?;
            Ok(())
        })
        .unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new\n");
        assert!(!dir.path().join("out.txt.tmp").exists());
    }

    #[test]
    fn failed_write_leaves_target_untouched() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.txt");
        fs::write(&path, "old\n").unwrap();

        let result: Result<()> = write_atomically(&path, |_| anyhow::bail!("boom"));

        assert!(result.is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "old\n");
    }

    #[test]
    fn atomic_write_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deep").join("out.txt");
        write_atomically(&path, |w| Ok(w.write_all(b"x\n")?)).unwrap();
        assert!(path.exists());
    }
}
