use chrono::NaiveDate;
use counselling::workflows::counselling::{Category, CounsellingRound};

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_round(raw: &str) -> Result<CounsellingRound, String> {
    let number = raw
        .trim()
        .parse::<u8>()
        .map_err(|_| format!("'{raw}' is not a round number"))?;
    CounsellingRound::new(number).map_err(|err| err.to_string())
}

/// One `CATEGORY=SEATS` entry of `--seats`. Positivity is checked later with the rest of the
/// request so the error names the offending category.
pub(crate) fn parse_seat_entry(raw: &str) -> Result<(Category, i64), String> {
    let (code, count) = raw
        .split_once('=')
        .ok_or_else(|| format!("'{raw}' must look like CATEGORY=SEATS"))?;
    if code.trim().is_empty() {
        return Err(format!("'{raw}' is missing a category code"));
    }
    let seats = count
        .trim()
        .parse::<i64>()
        .map_err(|_| format!("'{}' is not a whole number of seats", count.trim()))?;
    Ok((Category::parse(code), seats))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_seat_entry_reads_code_and_count() {
        assert_eq!(parse_seat_entry("obc=3"), Ok((Category::Obc, 3)));
        assert_eq!(parse_seat_entry(" PWD = 1 "), Ok((Category::Pwd, 1)));
        assert_eq!(parse_seat_entry("SC=-2"), Ok((Category::Sc, -2)));
        assert!(parse_seat_entry("UR").is_err());
        assert!(parse_seat_entry("=4").is_err());
        assert!(parse_seat_entry("ST=two").is_err());
    }

    #[test]
    fn parse_round_enforces_bounds() {
        assert_eq!(parse_round("3").map(CounsellingRound::number), Ok(3));
        assert!(parse_round("0").is_err());
        assert!(parse_round("5").is_err());
        assert!(parse_round("first").is_err());
    }

    #[test]
    fn parse_date_expects_iso_format() {
        assert_eq!(
            parse_date("2026-07-01"),
            Ok(NaiveDate::from_ymd_opt(2026, 7, 1).expect("valid date"))
        );
        assert!(parse_date("01/07/2026").is_err());
    }
}
