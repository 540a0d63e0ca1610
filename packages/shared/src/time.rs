//! Time-related utilities with clock abstraction for testability.
//!
//! Chat timestamps are rendered as wall-clock time in a fixed UTC offset
//! using the `DD-MM-YYYY HH:MM:SS` layout expected by chat clients.

use chrono::{DateTime, FixedOffset, Offset, TimeZone, Utc};

/// Layout of the `sentAt` field on outbound chat messages.
pub const SENT_AT_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

/// Clock trait for dependency injection and testing
pub trait Clock: Send + Sync {
    /// Current time in the clock's offset
    fn now(&self) -> DateTime<FixedOffset>;
}

/// System clock implementation (uses actual system time)
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    offset: FixedOffset,
}

impl SystemClock {
    /// Create a system clock reporting time in the given offset
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    /// Create a system clock from a whole-hour UTC offset (e.g. `-3`)
    ///
    /// Out-of-range offsets fall back to UTC.
    pub fn with_utc_offset_hours(hours: i32) -> Self {
        Self::new(utc_offset(hours))
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new(Utc.fix())
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&self.offset)
    }
}

/// Fixed clock implementation for testing (returns a fixed time)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    fixed_time: DateTime<FixedOffset>,
}

impl FixedClock {
    /// Create a new fixed clock with the given time
    pub fn new(fixed_time: DateTime<FixedOffset>) -> Self {
        Self { fixed_time }
    }

    /// Create a fixed clock from a Unix timestamp (milliseconds) rendered in UTC
    pub fn from_unix_millis(millis: i64) -> Self {
        let fixed_time = Utc
            .timestamp_millis_opt(millis)
            .single()
            .unwrap_or_default()
            .fixed_offset();
        Self { fixed_time }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.fixed_time
    }
}

/// Build a `FixedOffset` from whole hours east of UTC, falling back to UTC
pub fn utc_offset(hours: i32) -> FixedOffset {
    hours
        .checked_mul(3600)
        .and_then(FixedOffset::east_opt)
        .unwrap_or_else(|| Utc.fix())
}

/// Render a timestamp in the `sentAt` layout
pub fn format_sent_at(time: &DateTime<FixedOffset>) -> String {
    time.format(SENT_AT_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_uses_configured_offset() {
        // テスト項目: SystemClock が指定したオフセットで時刻を返す
        // given (前提条件):
        let clock = SystemClock::with_utc_offset_hours(-3);

        // when (操作):
        let now = clock.now();

        // then (期待する結果):
        assert_eq!(now.offset().local_minus_utc(), -3 * 3600);
    }

    #[test]
    fn test_system_clock_returns_increasing_timestamps() {
        // テスト項目: SystemClock が呼び出すたびに増加するタイムスタンプを返す
        // given (前提条件):
        let clock = SystemClock::default();

        // when (操作):
        let first = clock.now();
        std::thread::sleep(std::time::Duration::from_millis(10));
        let second = clock.now();

        // then (期待する結果):
        assert!(second >= first);
    }

    #[test]
    fn test_fixed_clock_returns_consistent_time() {
        // テスト項目: FixedClock が複数回呼び出しても同じ時刻を返す
        // given (前提条件):
        let clock = FixedClock::from_unix_millis(1_672_531_200_000);

        // when (操作):
        let first = clock.now();
        let second = clock.now();

        // then (期待する結果):
        assert_eq!(first, second);
        assert_eq!(first.timestamp_millis(), 1_672_531_200_000);
    }

    #[test]
    fn test_format_sent_at_layout() {
        // テスト項目: sentAt が DD-MM-YYYY HH:MM:SS 形式で出力される
        // given (前提条件): 2023-01-01 00:00:00 UTC
        let time = FixedClock::from_unix_millis(1_672_531_200_000).now();

        // when (操作):
        let rendered = format_sent_at(&time.with_timezone(&utc_offset(-3)));

        // then (期待する結果): UTC-3 is the previous evening
        assert_eq!(rendered, "31-12-2022 21:00:00");
    }

    #[test]
    fn test_utc_offset_out_of_range_falls_back_to_utc() {
        // テスト項目: 範囲外のオフセットは UTC にフォールバックする
        // given (前提条件):
        let hours = 48;

        // when (操作):
        let offset = utc_offset(hours);

        // then (期待する結果):
        assert_eq!(offset.local_minus_utc(), 0);
    }
}
