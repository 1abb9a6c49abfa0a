use chrono::{FixedOffset, Offset, Utc};
use tracing::warn;

use crate::env_or;

/// Bookable window and the offset in which hours and calendar days are read.
#[derive(Debug, Clone)]
pub struct ScheduleConfig {
    /// First bookable hour of the day, inclusive.
    pub business_hours_start: u32,
    /// Last bookable hour of the day, inclusive.
    pub business_hours_end: u32,
    pub utc_offset: FixedOffset,
}

impl ScheduleConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let mut business_hours_start = env_or("BUSINESS_HOURS_START", defaults.business_hours_start);
        let mut business_hours_end = env_or("BUSINESS_HOURS_END", defaults.business_hours_end);

        if business_hours_start > business_hours_end || business_hours_end > 23 {
            warn!(
                "Business hours {}..={} are not a valid window, using {}..={}",
                business_hours_start, business_hours_end,
                defaults.business_hours_start, defaults.business_hours_end
            );
            business_hours_start = defaults.business_hours_start;
            business_hours_end = defaults.business_hours_end;
        }

        let offset_minutes: i32 = env_or("SCHEDULE_UTC_OFFSET_MINUTES", 0);
        let utc_offset = offset_from_minutes(offset_minutes).unwrap_or_else(|| {
            warn!("SCHEDULE_UTC_OFFSET_MINUTES={} is out of range, using UTC", offset_minutes);
            defaults.utc_offset
        });

        Self {
            business_hours_start,
            business_hours_end,
            utc_offset,
        }
    }

    pub fn bookable_hours(&self) -> impl Iterator<Item = u32> {
        self.business_hours_start..=self.business_hours_end
    }

    /// Zero when the window is empty (`start > end`).
    pub fn slots_per_day(&self) -> usize {
        self.business_hours_end.saturating_add(1).saturating_sub(self.business_hours_start) as usize
    }

    pub fn is_bookable_hour(&self, hour: u32) -> bool {
        hour >= self.business_hours_start && hour <= self.business_hours_end
    }
}

/// `None` when the offset is outside chrono's +/- 24h range, including values that overflow as seconds.
fn offset_from_minutes(minutes: i32) -> Option<FixedOffset> {
    minutes.checked_mul(60).and_then(FixedOffset::east_opt)
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            business_hours_start: 8,
            business_hours_end: 17,
            utc_offset: Utc.fix(),
        }
    }
}
