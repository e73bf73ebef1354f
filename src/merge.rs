use crate::classify::PendingLocations;
use crate::config::TARGET_LANGUAGE;
use crate::models::Location;
use crate::reader::TsvReader;
use crate::schema::alternate_name;
use crate::stats::MergeStats;
use anyhow::Result;
use std::io::BufRead;
use tracing::{debug, info};

/// Attaches English alternate names to pending divisions, in arrival order.
///
/// Names for ids that are not pending are ignored. Duplicates are kept.
pub fn attach_alternate_names<R: BufRead>(
    reader: &mut TsvReader<R>,
    pending: &mut PendingLocations,
) -> Result<MergeStats> {
    let mut stats = MergeStats::default();

    while let Some(record) = reader.next_record(alternate_name::MIN_FIELDS)? {
        stats.records_scanned += 1;

        if record.bytes(alternate_name::ISOLANGUAGE)? != TARGET_LANGUAGE {
            continue;
        }
        stats.target_language_names += 1;

        let geoid = record.parse::<u64>(alternate_name::GEONAMEID)?;
        if let Some(location) = pending.get_mut(geoid) {
            let name = record.text(alternate_name::ALTERNATE_NAME)?;
            location.aliases.push(name.to_owned());
            stats.names_attached += 1;
        }
    }

    info!(
        records = stats.records_scanned,
        english = stats.target_language_names,
        attached = stats.names_attached,
        "Alternate names merged"
    );

    Ok(stats)
}

/// Promotes pending divisions that gained a name and sorts everything by rank.
///
/// Divisions without any alias are discarded. The sort is stable, so ties keep
/// accepted locations first (in source order) followed by promoted divisions.
pub fn rank_locations(
    mut accepted: Vec<Location>,
    pending: PendingLocations,
    stats: &mut MergeStats,
) -> Vec<Location> {
    accepted.reserve(pending.len());
    for location in pending.into_locations() {
        if location.aliases.is_empty() {
            stats.divisions_dropped += 1;
        } else {
            stats.divisions_promoted += 1;
            accepted.push(location);
        }
    }

    debug!(
        promoted = stats.divisions_promoted,
        dropped = stats.divisions_dropped,
        "Pending divisions resolved"
    );

    accepted.sort_by_key(Location::sort_key);
    accepted
}
