use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime};

const COMMON_DATE_FORMATS: &[&str] = &[
  "%Y-%m-%d %H:%M:%S",    // Common format without timezone
  "%Y-%m-%d %H:%M:%S %z", // Common format with timezone
  "%Y-%m-%dT%H:%M:%S%.f", // ISO without offset
];

pub fn parse_date(date_str: impl AsRef<str>) -> Option<DateTime<FixedOffset>> {
  let date_str = date_str.as_ref().trim();
  if date_str.is_empty() {
    return None;
  }

  if let Ok(parsed) = DateTime::parse_from_rfc3339(date_str) {
    return Some(parsed);
  }

  if let Ok(parsed) = DateTime::parse_from_rfc2822(date_str) {
    return Some(parsed);
  }

  for fmt in COMMON_DATE_FORMATS {
    if let Ok(parsed) = DateTime::parse_from_str(date_str, fmt) {
      return Some(parsed);
    }

    if let Ok(parsed) = NaiveDateTime::parse_from_str(date_str, fmt) {
      return Some(localize(parsed));
    }
  }

  // front matter dates are commonly bare days; treat them as midnight UTC
  NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
    .ok()
    .and_then(|d| d.and_hms_opt(0, 0, 0))
    .map(|d| d.and_utc().fixed_offset())
}

// try local time, fallback to UTC
fn localize(naive: NaiveDateTime) -> DateTime<FixedOffset> {
  naive
    .and_local_timezone(Local)
    .earliest()
    .map(|date| date.fixed_offset())
    .unwrap_or_else(|| naive.and_utc().fixed_offset())
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn test_parse_common_formats() {
    let rfc3339 = parse_date("2024-03-01T10:00:00.000Z").unwrap();
    let rfc2822 = parse_date("Fri, 01 Mar 2024 10:00:00 GMT").unwrap();
    assert_eq!(rfc3339, rfc2822);

    let day = parse_date("2024-06-01").unwrap();
    assert_eq!(day.to_rfc3339(), "2024-06-01T00:00:00+00:00");
  }

  #[test]
  fn test_parse_garbage() {
    assert!(parse_date("").is_none());
    assert!(parse_date("   ").is_none());
    assert!(parse_date("last tuesday").is_none());
  }
}
