use anyhow::{
  Context,
  anyhow
};
use chrono::{
  Days,
  Local,
  NaiveDate
};

/// Today's date on the local wall clock.
#[must_use]
pub fn local_today() -> NaiveDate {
  Local::now().date_naive()
}

/// Resolves a `--date` / `day` argument
/// against `today`.
///
/// Accepts `today`, `yesterday`,
/// `tomorrow`, `YYYY-MM-DD` and `YYYY-MM`
/// (first day of that month).
#[tracing::instrument(skip(today), fields(input = input))]
pub fn parse_date_expr(
  input: &str,
  today: NaiveDate
) -> anyhow::Result<NaiveDate> {
  let token = input.trim();
  let lower =
    token.to_ascii_lowercase();

  match lower.as_str() {
    | "" => {
      return Err(anyhow!(
        "date expression cannot be \
         empty"
      ));
    }
    | "today" => return Ok(today),
    | "tomorrow" => {
      return today
        .checked_add_days(Days::new(1))
        .ok_or_else(|| {
          anyhow!(
            "tomorrow is out of range"
          )
        });
    }
    | "yesterday" => {
      return today
        .checked_sub_days(Days::new(1))
        .ok_or_else(|| {
          anyhow!(
            "yesterday is out of range"
          )
        });
    }
    | _ => {}
  }

  if let Ok(date) =
    NaiveDate::parse_from_str(
      token, "%Y-%m-%d"
    )
  {
    return Ok(date);
  }

  if let Some((year, month)) =
    token.split_once('-')
    && year.len() == 4
    && month.len() == 2
  {
    let year: i32 = year
      .parse()
      .with_context(|| {
        format!(
          "invalid year in date: \
           {token}"
        )
      })?;
    let month: u32 = month
      .parse()
      .with_context(|| {
        format!(
          "invalid month in date: \
           {token}"
        )
      })?;
    return NaiveDate::from_ymd_opt(
      year, month, 1
    )
    .ok_or_else(|| {
      anyhow!(
        "invalid month value: {token}"
      )
    });
  }

  Err(anyhow!(
    "unrecognized date expression: \
     {token}"
  ))
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;

  use super::parse_date_expr;

  fn ymd(
    y: i32,
    m: u32,
    d: u32
  ) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d)
      .expect("valid date")
  }

  #[test]
  fn parses_relative_words() {
    let today = ymd(2026, 10, 31);
    assert_eq!(
      parse_date_expr("today", today)
        .expect("today"),
      today
    );
    assert_eq!(
      parse_date_expr("Tomorrow", today)
        .expect("tomorrow"),
      ymd(2026, 11, 1)
    );
    assert_eq!(
      parse_date_expr(" yesterday ", today)
        .expect("yesterday"),
      ymd(2026, 10, 30)
    );
  }

  #[test]
  fn parses_full_dates_and_months() {
    let today = ymd(2026, 10, 16);
    assert_eq!(
      parse_date_expr("2024-02-29", today)
        .expect("full date"),
      ymd(2024, 2, 29)
    );
    assert_eq!(
      parse_date_expr("2027-01", today)
        .expect("year-month"),
      ymd(2027, 1, 1)
    );
  }

  #[test]
  fn rejects_garbage() {
    let today = ymd(2026, 10, 16);
    for raw in [
      "", "soon", "2026-13", "2026-1",
      "2026-02-30", "26-10"
    ] {
      assert!(
        parse_date_expr(raw, today)
          .is_err(),
        "{raw}"
      );
    }
  }
}
