use chrono::{NaiveTime, Timelike};

/// Opening window of the shop and the length of a bookable slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BusinessHours {
    pub open: NaiveTime,
    pub close: NaiveTime,
    pub slot_minutes: u32,
}

impl BusinessHours {
    pub fn new(open: NaiveTime, close: NaiveTime, slot_minutes: u32) -> anyhow::Result<Self> {
        if slot_minutes == 0 {
            anyhow::bail!("slot length must be positive");
        }
        if open >= close {
            anyhow::bail!(
                "opening time {} must be before closing time {}",
                open.format("%H:%M"),
                close.format("%H:%M")
            );
        }
        Ok(Self {
            open,
            close,
            slot_minutes,
        })
    }

    pub fn parse(open: &str, close: &str, slot_minutes: u32) -> anyhow::Result<Self> {
        Self::new(parse_time(open)?, parse_time(close)?, slot_minutes)
    }

    pub fn open_minute(&self) -> u32 {
        minute_of_day(&self.open)
    }

    pub fn close_minute(&self) -> u32 {
        minute_of_day(&self.close)
    }
}

impl Default for BusinessHours {
    fn default() -> Self {
        Self {
            open: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN),
            close: NaiveTime::from_hms_opt(18, 0, 0).unwrap_or(NaiveTime::MIN),
            slot_minutes: 30,
        }
    }
}

fn minute_of_day(t: &NaiveTime) -> u32 {
    t.hour() * 60 + t.minute()
}

fn parse_time(s: &str) -> anyhow::Result<NaiveTime> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M")
        .map_err(|_| anyhow::anyhow!("invalid time format: {s}"))
}
