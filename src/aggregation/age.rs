//! Backlog age bucketing.

use chrono::NaiveDate;

use crate::core::AgeBucket;

const DAYS_PER_MONTH: f64 = 30.44;
const DAYS_PER_YEAR: f64 = 365.25;

/// Bucket an unread article by its age at the reference date.
///
/// Breakpoints sit at 1, 3, 6 and 12 months. Dates after the reference date
/// count as fresh.
pub fn classify(article: NaiveDate, reference: NaiveDate) -> AgeBucket {
    if article > reference {
        return AgeBucket::LessThanOneMonth;
    }

    let days = (reference - article).num_days() as f64;
    let months = days / DAYS_PER_MONTH;

    if days / DAYS_PER_YEAR >= 1.0 {
        AgeBucket::OlderThanOneYear
    } else if months >= 6.0 {
        AgeBucket::SixToTwelveMonths
    } else if months >= 3.0 {
        AgeBucket::ThreeToSixMonths
    } else if months >= 1.0 {
        AgeBucket::OneToThreeMonths
    } else {
        AgeBucket::LessThanOneMonth
    }
}
