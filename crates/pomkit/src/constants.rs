//! Named timing presets used by page objects and hooks.
//!
//! All values are `Duration`s so they drop straight into
//! [`ActionOptions`](crate::ActionOptions) and the `wait_for_*` calls.

use std::time::Duration;

/// Timeouts for an object or page to appear
pub mod timeout {
    use super::Duration;

    /// 1 second
    pub const ONE_SECOND: Duration = Duration::from_secs(1);
    /// 2 seconds
    pub const TWO_SECONDS: Duration = Duration::from_secs(2);
    /// 3 seconds
    pub const THREE_SECONDS: Duration = Duration::from_secs(3);
    /// 4 seconds
    pub const FOUR_SECONDS: Duration = Duration::from_secs(4);
    /// 5 seconds
    pub const FIVE_SECONDS: Duration = Duration::from_secs(5);
    /// 10 seconds
    pub const TEN_SECONDS: Duration = Duration::from_secs(10);
    /// 15 seconds
    pub const FIFTEEN_SECONDS: Duration = Duration::from_secs(15);
    /// 20 seconds
    pub const TWENTY_SECONDS: Duration = Duration::from_secs(20);
    /// 30 seconds
    pub const THIRTY_SECONDS: Duration = Duration::from_secs(30);
}

/// Settle pauses applied after mutating interactions
pub mod pause {
    use super::Duration;

    /// 100 milliseconds
    pub const ONE_TENTH_SECOND: Duration = Duration::from_millis(100);
    /// 200 milliseconds
    pub const TWO_TENTHS_SECOND: Duration = Duration::from_millis(200);
    /// 300 milliseconds
    pub const THREE_TENTHS_SECOND: Duration = Duration::from_millis(300);
    /// 400 milliseconds
    pub const FOUR_TENTHS_SECOND: Duration = Duration::from_millis(400);
    /// 500 milliseconds
    pub const HALF_SECOND: Duration = Duration::from_millis(500);
    /// 1 second
    pub const ONE_SECOND: Duration = Duration::from_secs(1);
    /// 2 seconds
    pub const TWO_SECONDS: Duration = Duration::from_secs(2);
    /// 3 seconds
    pub const THREE_SECONDS: Duration = Duration::from_secs(3);
    /// 5 seconds
    pub const FIVE_SECONDS: Duration = Duration::from_secs(5);
    /// 10 seconds
    pub const TEN_SECONDS: Duration = Duration::from_secs(10);
}

/// Default element wait when the config file omits `objectLoadTimeout`
pub const DEFAULT_OBJECT_LOAD_TIMEOUT: Duration = timeout::TEN_SECONDS;

/// Default page wait when the config file omits `pageLoadTimeout`
pub const DEFAULT_PAGE_LOAD_TIMEOUT: Duration = timeout::THIRTY_SECONDS;

/// Default settle pause when the config file omits `pause`
pub const DEFAULT_PAUSE: Duration = pause::HALF_SECOND;
