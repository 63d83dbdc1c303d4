//! Calendar instants.
//!
//! Every date-like or timestamp-like type reports [`Scalar::Instant`] in
//! UTC, so a `SystemTime` and a `NaiveDateTime` denoting the same instant
//! are equivalent no matter which side is actual. Their lineages stay
//! distinct (all descending from `"instant"`) so type comparators can
//! still single out one representation.

use std::time::SystemTime;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

use crate::identity::Lineage;
use crate::shape::{Inspect, Scalar, Shape};

const INSTANT: &[&str] = &["instant"];

impl Inspect for SystemTime {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Scalar::Instant(DateTime::<Utc>::from(*self)))
    }

    fn lineage(&self) -> Lineage {
        Lineage::new("SystemTime", INSTANT)
    }
}

impl<Tz: TimeZone> Inspect for DateTime<Tz> {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Scalar::Instant(self.with_timezone(&Utc)))
    }

    fn lineage(&self) -> Lineage {
        Lineage::new("DateTime", INSTANT)
    }
}

/// Interpreted as UTC.
impl Inspect for NaiveDateTime {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Scalar::Instant(self.and_utc()))
    }

    fn lineage(&self) -> Lineage {
        Lineage::new("NaiveDateTime", INSTANT)
    }
}

/// Midnight UTC of the given day.
impl Inspect for NaiveDate {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Scalar::Instant(
            self.and_time(NaiveTime::default()).and_utc(),
        ))
    }

    fn lineage(&self) -> Lineage {
        Lineage::new("NaiveDate", INSTANT)
    }
}

/// Milliseconds since the UNIX epoch as a UTC instant.
///
/// Returns `None` when out of chrono's representable range.
pub fn instant_from_millis(millis: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(millis).single()
}
