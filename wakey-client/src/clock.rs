use time::OffsetDateTime;
use time::macros::format_description;

/// Wall clock text shown on the main view.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ClockDisplay {
    /// "HH:MM"
    pub time: String,
    /// e.g. "Monday 19 October"
    pub date: String,
}

impl ClockDisplay {
    pub fn at(now: OffsetDateTime) -> Self {
        let time = now
            .format(format_description!("[hour]:[minute]"))
            .unwrap_or_default();
        let date = now
            .format(format_description!(
                "[weekday] [day padding:none] [month repr:long]"
            ))
            .unwrap_or_default();

        Self { time, date }
    }

    pub fn now() -> Self {
        Self::at(local_now())
    }
}

/// Local time, or UTC when the local offset cannot be determined.
pub fn local_now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}
