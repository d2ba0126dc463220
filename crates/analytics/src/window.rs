//! Report window: the half-open interval `[start, end)` analytics run over.

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};

use stocklens_core::{AnalyticsError, AnalyticsResult, DateField};

use crate::datetime::parse_date;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ReportWindow {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl ReportWindow {
    /// Raw bounds, used as given (an inverted window is allowed and has no hours).
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// Window covering the calendar days `start..=finish`.
    ///
    /// The end bound is midnight after `finish`, so the finish day is included.
    pub fn from_dates(start: NaiveDate, finish: NaiveDate) -> Self {
        let end = finish
            .checked_add_days(Days::new(1))
            .unwrap_or(finish)
            .and_time(NaiveTime::MIN);
        Self::new(start.and_time(NaiveTime::MIN), end)
    }

    /// Parse `dd.mm.yyyy` window boundaries.
    pub fn parse(start: &str, finish: &str) -> AnalyticsResult<Self> {
        let start_date =
            parse_date(start).ok_or_else(|| AnalyticsError::invalid_date(DateField::Start, start))?;
        let finish_date = parse_date(finish)
            .ok_or_else(|| AnalyticsError::invalid_date(DateField::Finish, finish))?;
        Ok(Self::from_dates(start_date, finish_date))
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Window length in hours (negative for an inverted window).
    pub fn total_hours(&self) -> f64 {
        hours_between(self.start, self.end)
    }
}

/// Signed hours elapsed from `from` to `to`.
pub(crate) fn hours_between(from: NaiveDateTime, to: NaiveDateTime) -> f64 {
    (to - from).num_seconds() as f64 / 3600.0
}
