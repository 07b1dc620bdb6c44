use chrono::{
  DateTime,
  NaiveDate,
  NaiveDateTime
};
use serde::de::IgnoredAny;
use serde::{
  Deserialize,
  Deserializer,
  Serialize
};

const NAIVE_DATETIME_FORMATS: [&str;
  4] = [
  "%Y-%m-%dT%H:%M:%S%.f",
  "%Y-%m-%dT%H:%M",
  "%Y-%m-%d %H:%M:%S%.f",
  "%Y-%m-%d %H:%M"
];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Reads the calendar date out of a raw
/// due-date or meeting-time value.
///
/// The date is taken as written: an
/// RFC 3339 value keeps the day of its
/// own offset and is never shifted into
/// another zone. Returns `None` when the
/// value is not a recognizable date.
pub fn parse_calendar_date(
  raw: &str
) -> Option<NaiveDate> {
  let token = raw.trim();
  if token.is_empty() {
    return None;
  }

  if let Ok(dt) =
    DateTime::parse_from_rfc3339(token)
  {
    return Some(dt.date_naive());
  }

  for format in NAIVE_DATETIME_FORMATS
  {
    if let Ok(dt) =
      NaiveDateTime::parse_from_str(
        token, format
      )
    {
      return Some(dt.date());
    }
  }

  match NaiveDate::parse_from_str(
    token,
    DATE_FORMAT
  ) {
    | Ok(date) => Some(date),
    | Err(err) => {
      tracing::debug!(
        value = %token,
        error = %err,
        "value has no calendar date"
      );
      None
    }
  }
}

/// A due date or meeting time exactly as
/// the data owner sent it.
///
/// Deserializing never fails: a value
/// that is neither a string nor a number
/// (or a missing field) becomes
/// `Missing` and lands in no cell.
#[derive(
  Debug,
  Clone,
  Default,
  PartialEq,
  Eq,
  Serialize,
)]
#[serde(untagged)]
pub enum RawDate {
  Text(String),
  /// Milliseconds since the Unix epoch.
  EpochMillis(i64),
  #[default]
  Missing
}

impl RawDate {
  /// Epoch values are read on the UTC
  /// calendar.
  pub fn calendar_date(
    &self
  ) -> Option<NaiveDate> {
    match self {
      | RawDate::Text(text) => {
        parse_calendar_date(text)
      }
      | RawDate::EpochMillis(ms) => {
        DateTime::from_timestamp_millis(
          *ms
        )
        .map(|dt| dt.date_naive())
      }
      | RawDate::Missing => None
    }
  }
}

impl From<&str> for RawDate {
  fn from(text: &str) -> Self {
    RawDate::Text(text.to_string())
  }
}

impl<'de> Deserialize<'de> for RawDate {
  fn deserialize<D>(
    deserializer: D
  ) -> Result<Self, D::Error>
  where
    D: Deserializer<'de>
  {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Incoming {
      Text(String),
      Millis(i64),
      Fractional(f64),
      Other(IgnoredAny)
    }

    let raw = match Incoming::deserialize(
      deserializer
    )? {
      | Incoming::Text(text) => {
        RawDate::Text(text)
      }
      | Incoming::Millis(ms) => {
        RawDate::EpochMillis(ms)
      }
      | Incoming::Fractional(ms)
        if ms.is_finite() =>
      {
        RawDate::EpochMillis(
          ms.trunc() as i64
        )
      }
      | Incoming::Fractional(_)
      | Incoming::Other(_) => {
        tracing::debug!(
          "date value is neither text \
           nor a number"
        );
        RawDate::Missing
      }
    };
    Ok(raw)
  }
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;

  use super::{
    RawDate,
    parse_calendar_date
  };

  fn ymd(
    y: i32,
    m: u32,
    d: u32
  ) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d)
      .expect("valid date")
  }

  #[test]
  fn reads_plain_dates() {
    assert_eq!(
      parse_calendar_date("2026-10-15"),
      Some(ymd(2026, 10, 15))
    );
    assert_eq!(
      parse_calendar_date(
        "  2026-10-15\n"
      ),
      Some(ymd(2026, 10, 15))
    );
  }

  #[test]
  fn reads_naive_datetimes() {
    for raw in [
      "2026-10-15T09:30",
      "2026-10-15T09:30:00",
      "2026-10-15T09:30:00.250",
      "2026-10-15 09:30",
      "2026-10-15 09:30:00"
    ] {
      assert_eq!(
        parse_calendar_date(raw),
        Some(ymd(2026, 10, 15)),
        "{raw}"
      );
    }
  }

  #[test]
  fn keeps_the_day_as_written_for_offsets()
   {
    assert_eq!(
      parse_calendar_date(
        "2026-10-15T23:30:00-05:00"
      ),
      Some(ymd(2026, 10, 15))
    );
    assert_eq!(
      parse_calendar_date(
        "2026-10-16T00:15:00+09:00"
      ),
      Some(ymd(2026, 10, 16))
    );
    assert_eq!(
      parse_calendar_date(
        "2026-10-15T12:00:00Z"
      ),
      Some(ymd(2026, 10, 15))
    );
  }

  #[test]
  fn malformed_values_have_no_date() {
    for raw in [
      "",
      "   ",
      "tomorrow",
      "2026-13-01",
      "2026-02-30",
      "15/10/2026"
    ] {
      assert_eq!(
        parse_calendar_date(raw),
        None,
        "{raw}"
      );
    }
  }

  #[test]
  fn raw_values_of_any_shape_deserialize()
   {
    let values: Vec<RawDate> =
      serde_json::from_str(
        r#"["2026-10-15", 1792022400000, 1792022400000.75, null, true, {"at":"x"}]"#
      )
      .expect("never fails");

    assert_eq!(
      values[0],
      RawDate::from("2026-10-15")
    );
    assert_eq!(
      values[1],
      RawDate::EpochMillis(1_792_022_400_000)
    );
    assert_eq!(
      values[2],
      RawDate::EpochMillis(1_792_022_400_000)
    );
    assert!(
      values[3..]
        .iter()
        .all(|v| *v == RawDate::Missing)
    );
  }

  #[test]
  fn epoch_millis_use_the_utc_day() {
    // 2026-10-15T00:00:00Z
    assert_eq!(
      RawDate::EpochMillis(
        1_792_022_400_000
      )
      .calendar_date(),
      Some(ymd(2026, 10, 15))
    );
    assert_eq!(
      RawDate::EpochMillis(
        1_792_022_399_999
      )
      .calendar_date(),
      Some(ymd(2026, 10, 14))
    );
    assert_eq!(
      RawDate::EpochMillis(i64::MAX)
        .calendar_date(),
      None
    );
    assert_eq!(
      RawDate::Missing.calendar_date(),
      None
    );
  }
}
