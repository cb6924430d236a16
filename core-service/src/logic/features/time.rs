//! Time of day parsing
//!
//! Lenient: a component that fails to parse reads as 0, out-of-range values
//! are clamped, never rejected.

use std::num::IntErrorKind;

use serde::{Deserialize, Serialize};

pub const MAX_HOUR: i64 = 23;
pub const MAX_MINUTE: i64 = 59;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimeOfDay {
    pub hour: u32,
    pub minute: u32,
}

impl TimeOfDay {
    pub fn parse(time: &str) -> Self {
        Self {
            hour: parse_hour(time),
            minute: parse_minute(time),
        }
    }

    pub fn minutes_since_midnight(&self) -> u32 {
        self.hour * 60 + self.minute
    }
}

/// Hour part of "HH:MM", clamped to 0..=23
pub fn parse_hour(time: &str) -> u32 {
    parse_component(time, 0, MAX_HOUR)
}

/// Minute part of "HH:MM", clamped to 0..=59
pub fn parse_minute(time: &str) -> u32 {
    parse_component(time, 1, MAX_MINUTE)
}

fn parse_component(time: &str, index: usize, max: i64) -> u32 {
    let Some(part) = time.trim().split(':').nth(index) else {
        return 0;
    };

    let value = match part.trim().parse::<i64>() {
        Ok(value) => value,
        // Integer text too large to fit still clamps
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => max,
        Err(_) => 0,
    };

    value.clamp(0, max) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_times() {
        assert_eq!(TimeOfDay::parse("23:59"), TimeOfDay { hour: 23, minute: 59 });
        assert_eq!(TimeOfDay::parse("0:00"), TimeOfDay { hour: 0, minute: 0 });
        assert_eq!(TimeOfDay::parse("7:05"), TimeOfDay { hour: 7, minute: 5 });
        assert_eq!(TimeOfDay::parse(" 12:30 "), TimeOfDay { hour: 12, minute: 30 });
    }

    #[test]
    fn test_out_of_range_clamps() {
        assert_eq!(TimeOfDay::parse("25:70"), TimeOfDay { hour: 23, minute: 59 });
        assert_eq!(TimeOfDay::parse("-3:-1"), TimeOfDay { hour: 0, minute: 0 });
        assert_eq!(parse_hour("99999999999999999999999:00"), 23);
    }

    #[test]
    fn test_garbage_reads_as_zero() {
        assert_eq!(TimeOfDay::parse("abc"), TimeOfDay { hour: 0, minute: 0 });
        assert_eq!(TimeOfDay::parse(""), TimeOfDay { hour: 0, minute: 0 });
        assert_eq!(TimeOfDay::parse("ab:cd"), TimeOfDay { hour: 0, minute: 0 });
        assert_eq!(TimeOfDay::parse("1.5:30"), TimeOfDay { hour: 0, minute: 30 });
    }

    #[test]
    fn test_missing_separator() {
        // Hour still parses, minute component is absent
        assert_eq!(TimeOfDay::parse("14"), TimeOfDay { hour: 14, minute: 0 });
    }

    #[test]
    fn test_minutes_since_midnight() {
        assert_eq!(TimeOfDay::parse("1:30").minutes_since_midnight(), 90);
    }
}
