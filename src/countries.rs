use crate::models::CountryEntry;
use crate::reader::TsvReader;
use crate::schema::country_info;
use anyhow::Result;
use std::collections::BTreeMap;
use std::io::BufRead;
use tracing::info;

/// Reads `countryInfo.txt` into entries sorted by ISO code.
///
/// A later row for the same code replaces the earlier one.
pub fn read_countries<R: BufRead>(reader: &mut TsvReader<R>) -> Result<Vec<CountryEntry>> {
    let mut by_code = BTreeMap::new();

    while let Some(record) = reader.next_record(country_info::MIN_FIELDS)? {
        let iso_code = record.text(country_info::ISO)?.to_owned();
        let name = record.text(country_info::COUNTRY)?.to_owned();
        by_code.insert(iso_code, name);
    }

    info!(countries = by_code.len(), "Country table built");

    Ok(by_code
        .into_iter()
        .map(|(iso_code, name)| CountryEntry { iso_code, name })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(data: &str) -> Result<Vec<CountryEntry>> {
        let mut reader = TsvReader::new(data.as_bytes());
        read_countries(&mut reader)
    }

    fn codes(entries: &[CountryEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.iso_code.as_str()).collect()
    }

    #[test]
    fn sorts_by_iso_code() {
        let data = "\
# ISO\tISO3\tISO-Numeric\tfips\tCountry
US\tUSA\t840\tUS\tUnited States\tWashington\t9629091.0\t327167434\tNA\t.us\tUSD\tDollar\t1\t#####-####\t^\\d{5}(-\\d{4})?$\ten-US,es-US,haw,fr\t6252001\tCA,MX,CU\t
AD\tAND\t020\tAN\tAndorra\tAndorra la Vella\t468.0\t77006\tEU\t.ad\tEUR\tEuro\t376\tAD###\t^(?:AD)*(\\d{3})$\tca\t3041565\tES,FR\t
DE\tDEU\t276\tGM\tGermany\tBerlin\t357021.0\t82927922\tEU\t.de\tEUR\tEuro\t49\t#####\t^(\\d{5})$\tde\t2921044\tCH,PL,NL,DK,BE,CZ,LU,FR,AT\t
";
        let entries = read(data).unwrap();
        assert_eq!(codes(&entries), vec!["AD", "DE", "US"]);
        assert_eq!(entries[2].name, "United States");
    }

    #[test]
    fn later_rows_replace_earlier_ones() {
        let data = "XK\tXKX\t0\tKV\tKosovo\nXK\tXKX\t0\tKV\tRepublic of Kosovo\n";
        let entries = read(data).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "Republic of Kosovo");
    }

    #[test]
    fn trailing_empty_columns_are_tolerated() {
        let data = "AQ\tATA\t010\tAY\tAntarctica\t\t14000000\t0\tAN\t.aq\t\t\t\t\t\t\t6697173\t\t\n";
        let entries = read(data).unwrap();
        assert_eq!(entries[0].name, "Antarctica");
    }

    #[test]
    fn short_row_is_fatal() {
        assert!(read("US\tUSA\t840\n").is_err());
    }

    #[test]
    fn empty_input_gives_empty_table() {
        assert!(read("# only comments\n").unwrap().is_empty());
    }
}
