/// Default directory holding the downloaded GeoNames dumps
pub const DEFAULT_DATA_DIR: &str = "dump";

/// Default directory for the generated lookup tables
pub const DEFAULT_OUTPUT_DIR: &str = ".";

/// Primary place dataset
pub const GEONAMES_FILE: &str = "allCountries.txt";

/// Alternate names dataset
pub const ALTERNATE_NAMES_FILE: &str = "alternateNamesV2.txt";

/// Country info dataset
pub const COUNTRY_INFO_FILE: &str = "countryInfo.txt";

/// Suffix accepted for bzip2-compressed copies of the datasets
pub const BZ2_SUFFIX: &str = ".bz2";

pub const LOCATIONS_FILE: &str = "locations.txt";

pub const COUNTRIES_FILE: &str = "countries.txt";

/// Only alternate names in this language are attached to divisions
pub const TARGET_LANGUAGE: &[u8] = b"en";

/// Minimum population for a non-capital populated place to count as a city
pub const CITY_MIN_POPULATION: i64 = 50_000;

/// Country whose second-order divisions are also tracked, and which ranks first
pub const PRIORITY_COUNTRY: &str = "US";

/// Separator between aliases in the locations file
pub const ALIAS_SEPARATOR: &str = ";";

/// Buffer size for dataset readers
pub const READ_BUFFER_SIZE: usize = 256 * 1024;

/// Buffer size for output writers
pub const WRITE_BUFFER_SIZE: usize = 128 * 1024;

/// Pre-sized capacity of the pending division table
pub const PENDING_CAPACITY: usize = 8 * 1024;
