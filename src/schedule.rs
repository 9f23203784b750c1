//! Service tiers and transfer-time estimates.
//!
//! All clock math runs in WIB (UTC+7). Indonesia's western zone has no
//! daylight saving, so a fixed offset is sufficient.

use chrono::{DateTime, Duration, FixedOffset, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

const WIB_OFFSET_SECS: i32 = 7 * 3600;

/// Transfer speed tier sold to the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceTier {
    /// Standard processing, around three hours.
    Normal,
    /// Express, around forty minutes.
    Kilat,
    /// Top priority, around twenty minutes.
    SuperKilat,
}

/// Membership class used for tier pricing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Membership {
    Member,
    NonMember,
}

impl ServiceTier {
    /// Estimated processing duration for this tier.
    pub fn duration(&self) -> Duration {
        match self {
            ServiceTier::SuperKilat => Duration::minutes(20),
            ServiceTier::Kilat => Duration::minutes(40),
            ServiceTier::Normal => Duration::hours(3),
        }
    }

    /// Service charge in rupiah for this tier.
    pub fn charge(&self, membership: Membership) -> u64 {
        match (self, membership) {
            (ServiceTier::Normal, _) => 0,
            (ServiceTier::Kilat, _) => 15_000,
            (ServiceTier::SuperKilat, Membership::Member) => 15_000,
            (ServiceTier::SuperKilat, Membership::NonMember) => 18_000,
        }
    }
}

/// The WIB timezone offset.
pub fn wib() -> FixedOffset {
    FixedOffset::east_opt(WIB_OFFSET_SECS).expect("WIB offset is in range")
}

/// Current time in WIB.
pub fn now_wib() -> DateTime<FixedOffset> {
    Utc::now().with_timezone(&wib())
}

/// Completion estimate: `start` plus the tier's duration, rendered `HH:MM WIB`.
pub fn completion_estimate(start: DateTime<FixedOffset>, tier: ServiceTier) -> String {
    (start + tier.duration()).format("%H:%M WIB").to_string()
}

/// Elapsed time between two clock readings, wrapping past midnight when the
/// end reads earlier than the start.
pub fn elapsed_between(start: NaiveTime, end: NaiveTime) -> Duration {
    let delta = end - start;
    if delta < Duration::zero() {
        delta + Duration::days(1)
    } else {
        delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn tier_durations() {
        assert_eq!(ServiceTier::SuperKilat.duration(), Duration::minutes(20));
        assert_eq!(ServiceTier::Kilat.duration(), Duration::minutes(40));
        assert_eq!(ServiceTier::Normal.duration(), Duration::hours(3));
    }

    #[test]
    fn tier_charges() {
        assert_eq!(ServiceTier::Normal.charge(Membership::NonMember), 0);
        assert_eq!(ServiceTier::Kilat.charge(Membership::Member), 15_000);
        assert_eq!(ServiceTier::SuperKilat.charge(Membership::Member), 15_000);
        assert_eq!(ServiceTier::SuperKilat.charge(Membership::NonMember), 18_000);
    }

    #[test]
    fn completion_estimate_formats_wib() {
        let start = wib().with_ymd_and_hms(2024, 6, 1, 10, 30, 0).unwrap();
        assert_eq!(completion_estimate(start, ServiceTier::Normal), "13:30 WIB");
        assert_eq!(
            completion_estimate(start, ServiceTier::SuperKilat),
            "10:50 WIB"
        );
    }

    #[test]
    fn completion_estimate_rolls_past_midnight() {
        let start = wib().with_ymd_and_hms(2024, 6, 1, 23, 0, 0).unwrap();
        assert_eq!(completion_estimate(start, ServiceTier::Normal), "02:00 WIB");
    }

    #[test]
    fn elapsed_wraps_past_midnight() {
        let start = NaiveTime::from_hms_opt(23, 30, 0).unwrap();
        let end = NaiveTime::from_hms_opt(0, 15, 0).unwrap();
        assert_eq!(elapsed_between(start, end), Duration::minutes(45));
    }

    #[test]
    fn elapsed_same_day() {
        let start = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        let end = NaiveTime::from_hms_opt(11, 20, 0).unwrap();
        assert_eq!(elapsed_between(start, end), Duration::minutes(140));
    }
}
