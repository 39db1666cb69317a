use std::time::Duration;

/// How long a fetched region stays fresh before the upstream feed is asked again.
pub const CACHE_TTL_MINUTES: i64 = 30;

/// How long an event stays visible after it ended, even once the feed dropped it.
pub const RETENTION_HOURS: i64 = 24;

pub const DEFAULT_UPSTREAM_URL: &str = "https://my.vatsim.net/api/v2/";

/// Sent with every upstream request so VATSIM can identify us.
pub const USER_AGENT: &str = "VATAdria Event Platform";

pub const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(10);

/// Events lasting at least this many hours go into the all-day lane.
pub const ALL_DAY_THRESHOLD_HOURS: i64 = 23;

/// Minimum navigation interval in the calendar view.
pub const TRANSITION_DELAY: Duration = Duration::from_millis(300);
