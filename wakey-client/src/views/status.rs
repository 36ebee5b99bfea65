use time::OffsetDateTime;
use wakey_api::models::*;

/// Countdown shown while no alarm is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextAlarm {
    In { hours: i64, minutes: i64 },
    /// The scheduled time is now or already behind the client clock
    Passed,
    NotScheduled,
}

impl NextAlarm {
    pub fn from_status(status: &AlarmRuntimeStatus, now: OffsetDateTime) -> Self {
        let Some(next) = status.next_fire_at() else {
            return NextAlarm::NotScheduled;
        };

        let millis = (next - now).whole_milliseconds();
        if millis <= 0 {
            return NextAlarm::Passed;
        }

        let millis = millis as i64;
        NextAlarm::In {
            hours: millis / 3_600_000,
            minutes: millis % 3_600_000 / 60_000,
        }
    }

    /// Text for the countdown line; empty when it should be hidden.
    pub fn text(&self) -> String {
        match self {
            NextAlarm::In { hours, minutes } => format!("Next alarm in {hours}h {minutes}m"),
            NextAlarm::Passed => String::new(),
            NextAlarm::NotScheduled => "No alarms set".to_string(),
        }
    }
}

pub fn state_label(state: &AlarmState) -> String {
    match state {
        AlarmState::Sunrise => "Sunrise in progress...".to_string(),
        AlarmState::Active => "Alarm ringing!".to_string(),
        AlarmState::Snoozed => "Snoozed...".to_string(),
        other => other.to_string(),
    }
}

/// What the main view shows for the alarm engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusView {
    /// No reading yet
    Unknown,
    Idle(NextAlarm),
    /// Ringing, ramping or snoozed; dismiss and snooze are offered
    Running { state: AlarmState, label: String },
}

impl StatusView {
    pub fn describe(status: Option<&AlarmRuntimeStatus>, now: OffsetDateTime) -> Self {
        match status {
            None => StatusView::Unknown,
            Some(status) if status.state == AlarmState::Idle => {
                StatusView::Idle(NextAlarm::from_status(status, now))
            }
            Some(status) => StatusView::Running {
                state: status.state.clone(),
                label: state_label(&status.state),
            },
        }
    }

    pub fn text(&self) -> String {
        match self {
            StatusView::Unknown => String::new(),
            StatusView::Idle(next) => next.text(),
            StatusView::Running { label, .. } => label.clone(),
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, StatusView::Running { .. })
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    fn idle(next: Option<&str>) -> AlarmRuntimeStatus {
        AlarmRuntimeStatus {
            state: AlarmState::Idle,
            active_alarm_id: None,
            next_fire_time: next.map(str::to_string),
        }
    }

    #[test]
    fn test_countdown_floors_hours_and_minutes() {
        let now = datetime!(2026-10-19 22:14:30 UTC);
        let status = idle(Some("2026-10-20T07:00:00+00:00"));

        let next = NextAlarm::from_status(&status, now);

        assert_eq!(next, NextAlarm::In { hours: 8, minutes: 45 });
        assert_eq!(next.text(), "Next alarm in 8h 45m");
    }

    #[test]
    fn test_countdown_respects_offsets() {
        let now = datetime!(2026-10-19 05:00 UTC);
        let status = idle(Some("2026-10-19T07:30:00+02:00"));

        assert_eq!(
            NextAlarm::from_status(&status, now),
            NextAlarm::In { hours: 0, minutes: 30 }
        );
    }

    #[test]
    fn test_missing_or_invalid_time_means_no_alarms() {
        let now = datetime!(2026-10-19 05:00 UTC);

        assert_eq!(NextAlarm::from_status(&idle(None), now).text(), "No alarms set");
        assert_eq!(NextAlarm::from_status(&idle(Some("soon")), now).text(), "No alarms set");
    }

    #[test]
    fn test_passed_time_is_hidden() {
        let now = datetime!(2026-10-19 07:00 UTC);

        let same = NextAlarm::from_status(&idle(Some("2026-10-19T07:00:00Z")), now);
        let behind = NextAlarm::from_status(&idle(Some("2026-10-19T06:59:00Z")), now);

        assert_eq!(same, NextAlarm::Passed);
        assert_eq!(behind, NextAlarm::Passed);
        assert_eq!(behind.text(), "");
    }

    #[test]
    fn test_running_labels() {
        assert_eq!(state_label(&AlarmState::Sunrise), "Sunrise in progress...");
        assert_eq!(state_label(&AlarmState::Active), "Alarm ringing!");
        assert_eq!(state_label(&AlarmState::Snoozed), "Snoozed...");
        assert_eq!(state_label(&AlarmState::Other("fading".to_string())), "fading");
    }

    #[test]
    fn test_describe() {
        let now = datetime!(2026-10-19 05:00 UTC);
        let ringing = AlarmRuntimeStatus {
            state: AlarmState::Active,
            active_alarm_id: Some("abc".to_string()),
            next_fire_time: None,
        };

        assert_eq!(StatusView::describe(None, now), StatusView::Unknown);
        assert!(StatusView::describe(Some(&ringing), now).is_running());
        assert_eq!(StatusView::describe(Some(&idle(None)), now).text(), "No alarms set");
    }
}
