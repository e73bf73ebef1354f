//! Column layouts of the GeoNames dump files.
//!
//! Lines have trailing whitespace stripped before they are split, which drops
//! trailing empty columns. Each `MIN_FIELDS` is therefore the highest column the
//! pipeline reads plus one, not the full width of the schema.

/// `allCountries.txt`: 19 columns
pub mod geoname {
    pub const GEONAMEID: usize = 0;
    pub const NAME: usize = 1;
    pub const ASCIINAME: usize = 2;
    pub const ALTERNATENAMES: usize = 3;
    pub const LATITUDE: usize = 4;
    pub const LONGITUDE: usize = 5;
    pub const FEATURE_CLASS: usize = 6;
    pub const FEATURE_CODE: usize = 7;
    pub const COUNTRY_CODE: usize = 8;
    pub const CC2: usize = 9;
    pub const ADMIN1_CODE: usize = 10;
    pub const ADMIN2_CODE: usize = 11;
    pub const ADMIN3_CODE: usize = 12;
    pub const ADMIN4_CODE: usize = 13;
    pub const POPULATION: usize = 14;
    pub const ELEVATION: usize = 15;
    pub const DEM: usize = 16;
    pub const TIMEZONE: usize = 17;
    pub const MODIFICATION_DATE: usize = 18;

    pub const MIN_FIELDS: usize = TIMEZONE + 1;
}

/// `alternateNamesV2.txt`: 10 columns
pub mod alternate_name {
    pub const ALTERNATENAMEID: usize = 0;
    pub const GEONAMEID: usize = 1;
    pub const ISOLANGUAGE: usize = 2;
    pub const ALTERNATE_NAME: usize = 3;
    pub const IS_PREFERRED_NAME: usize = 4;
    pub const IS_SHORT_NAME: usize = 5;
    pub const IS_COLLOQUIAL: usize = 6;
    pub const IS_HISTORIC: usize = 7;
    pub const FROM: usize = 8;
    pub const TO: usize = 9;

    pub const MIN_FIELDS: usize = ALTERNATE_NAME + 1;
}

/// `countryInfo.txt`: 19 columns
pub mod country_info {
    pub const ISO: usize = 0;
    pub const ISO3: usize = 1;
    pub const ISO_NUMERIC: usize = 2;
    pub const FIPS: usize = 3;
    pub const COUNTRY: usize = 4;
    pub const CAPITAL: usize = 5;
    pub const AREA: usize = 6;
    pub const POPULATION: usize = 7;
    pub const CONTINENT: usize = 8;
    pub const TLD: usize = 9;
    pub const CURRENCY_CODE: usize = 10;
    pub const CURRENCY_NAME: usize = 11;
    pub const PHONE: usize = 12;
    pub const POSTAL_CODE_FORMAT: usize = 13;
    pub const POSTAL_CODE_REGEX: usize = 14;
    pub const LANGUAGES: usize = 15;
    pub const GEONAMEID: usize = 16;
    pub const NEIGHBOURS: usize = 17;
    pub const EQUIVALENT_FIPS_CODE: usize = 18;

    pub const MIN_FIELDS: usize = COUNTRY + 1;
}
