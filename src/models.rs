use crate::config::PRIORITY_COUNTRY;
use serde::Serialize;
use std::fmt;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Airport,
    City,
    Division,
}

impl Kind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Airport => "airport",
            Kind::City => "city",
            Kind::Division => "division",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ranking key: capitals first, then the priority country, then larger populations.
///
/// Compared lexicographically in field order, so `false` sorts before `true`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SortKey {
    pub not_capital: bool,
    pub not_us: bool,
    pub negated_population: i64,
}

#[derive(Debug, Clone)]
pub struct Location {
    /// ASCII display name
    pub name: String,
    pub aliases: Vec<String>,
    pub country: Rc<str>,
    pub admin_code: Option<Rc<str>>,
    pub kind: Kind,
    pub tz: Rc<str>,
    /// Source gazetteer identifier, only used to join alternate names
    pub geoid: u64,
    pub capital: bool,
    pub population: i64,
}

impl Location {
    pub fn sort_key(&self) -> SortKey {
        SortKey {
            not_capital: !self.capital,
            not_us: &*self.country != PRIORITY_COUNTRY,
            negated_population: self.population.saturating_neg(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryEntry {
    pub iso_code: String,
    pub name: String,
}
