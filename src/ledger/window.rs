use crate::ledger::history::EventHistory;
use crate::types::query::LeaderboardEntry;
use chrono::{DateTime, Datelike, Duration, NaiveTime, TimeZone, Utc};
use std::collections::BTreeMap;

/// Named time window for leaderboard aggregation. The window end is always
/// "now"; only the start varies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Last30Days,
    MonthToDate,
    Last6Months,
    YearToDate,
    AllTime,
}

impl Period {
    pub const DEFAULT: Period = Period::Last30Days;

    /// Maps a period name to a window. Unrecognized names fall back to the
    /// default window rather than failing.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "last-30-days" => Self::Last30Days,
            "month-to-date" => Self::MonthToDate,
            "last-6-months" => Self::Last6Months,
            "year-to-date" => Self::YearToDate,
            "all-time" => Self::AllTime,
            other => {
                tracing::debug!(period = %other, "unrecognized period, using default");
                Self::DEFAULT
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Last30Days => "last-30-days",
            Self::MonthToDate => "month-to-date",
            Self::Last6Months => "last-6-months",
            Self::YearToDate => "year-to-date",
            Self::AllTime => "all-time",
        }
    }

    /// Inclusive lower bound of the window, `None` for all-time.
    pub fn window_start(self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Self::Last30Days => Some(now - Duration::days(30)),
            Self::Last6Months => Some(now - Duration::days(180)),
            Self::MonthToDate => {
                let month_start = now.date_naive().with_day(1).unwrap_or_default();
                Some(Utc.from_utc_datetime(&month_start.and_time(NaiveTime::MIN)))
            }
            Self::YearToDate => {
                let year_start = now.date_naive().with_ordinal(1).unwrap_or_default();
                Some(Utc.from_utc_datetime(&year_start.and_time(NaiveTime::MIN)))
            }
            Self::AllTime => None,
        }
    }
}

#[derive(Debug, Default)]
struct Tally {
    username: String,
    points: i64,
    count: u64,
}

/// Full scan of the event history restricted to `timestamp >= window_start`.
/// Actor and target points accumulate into one shared per-user total; the
/// aggregator makes no assumption about a user appearing in only one role,
/// or about self-awards being absent from old documents. The latest name
/// seen inside the window wins.
pub fn aggregate(
    history: &EventHistory,
    window_start: Option<DateTime<Utc>>,
    limit: usize,
) -> Vec<LeaderboardEntry> {
    let mut totals: BTreeMap<String, Tally> = BTreeMap::new();

    for event in history.iter() {
        if let Some(start) = window_start {
            if event.timestamp < start {
                continue;
            }
        }
        credit(
            &mut totals,
            &event.actor_id,
            &event.actor_name,
            event.actor_points,
        );
        credit(
            &mut totals,
            &event.target_id,
            &event.target_name,
            event.target_points,
        );
    }

    let mut entries = totals
        .into_iter()
        .map(|(user_id, tally)| LeaderboardEntry {
            user_id,
            username: tally.username,
            points: tally.points,
            count: tally.count,
        })
        .collect::<Vec<_>>();
    entries.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then_with(|| a.user_id.cmp(&b.user_id))
    });
    entries.truncate(limit);
    entries
}

fn credit(totals: &mut BTreeMap<String, Tally>, user_id: &str, username: &str, points: i64) {
    let tally = totals.entry(user_id.to_string()).or_default();
    tally.username = username.to_string();
    tally.points += points;
    tally.count += 1;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ledger::ScoringEvent;
    use chrono::NaiveDate;

    fn event(
        actor: &str,
        target: &str,
        actor_points: i64,
        target_points: i64,
        timestamp: DateTime<Utc>,
    ) -> ScoringEvent {
        ScoringEvent {
            actor_id: actor.to_string(),
            actor_name: actor.to_string(),
            emoji: "fire".to_string(),
            target_id: target.to_string(),
            target_name: target.to_string(),
            message_ts: format!("{}.0", timestamp.timestamp()),
            channel_id: "C1".to_string(),
            timestamp,
            actor_points,
            target_points,
        }
    }

    fn utc(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        let date = NaiveDate::from_ymd_opt(year, month, day).expect("date should be valid");
        Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
    }

    #[test]
    fn parse_accepts_known_names_and_falls_back() {
        assert_eq!(Period::parse("month-to-date"), Period::MonthToDate);
        assert_eq!(Period::parse("all-time"), Period::AllTime);
        assert_eq!(Period::parse("bogus"), Period::Last30Days);
        assert_eq!(Period::parse(""), Period::Last30Days);
    }

    #[test]
    fn month_to_date_starts_on_the_first() {
        let now = utc(2024, 3, 15);
        let start = Period::MonthToDate
            .window_start(now)
            .expect("window should have a start");
        assert_eq!(start, utc(2024, 3, 1));
    }

    #[test]
    fn year_to_date_starts_on_january_first() {
        let now = utc(2024, 3, 15);
        let start = Period::YearToDate
            .window_start(now)
            .expect("window should have a start");
        assert_eq!(start, utc(2024, 1, 1));
    }

    #[test]
    fn all_time_has_no_lower_bound() {
        assert!(Period::AllTime.window_start(Utc::now()).is_none());
    }

    #[test]
    fn window_excludes_events_older_than_the_start() {
        let now = utc(2024, 6, 1);
        let mut history = EventHistory::default();
        history.append(event("U1", "U2", 1, 2, now - Duration::days(45)), 100);
        history.append(event("U1", "U3", 1, 2, now - Duration::days(5)), 100);

        let last_30 = aggregate(&history, Period::Last30Days.window_start(now), 10);
        assert_eq!(last_30.len(), 2, "only the recent event's users rank");
        let u1 = last_30
            .iter()
            .find(|entry| entry.user_id == "U1")
            .expect("actor should rank");
        assert_eq!(u1.points, 1);

        let six_months = aggregate(&history, Period::Last6Months.window_start(now), 10);
        let u1 = six_months
            .iter()
            .find(|entry| entry.user_id == "U1")
            .expect("actor should rank");
        assert_eq!(u1.points, 2);

        let all_time = aggregate(&history, Period::AllTime.window_start(now), 10);
        assert_eq!(all_time.len(), 3);
    }

    #[test]
    fn actor_and_target_points_share_one_total() {
        let now = utc(2024, 6, 1);
        let mut history = EventHistory::default();
        // U1 earns as actor in one event and as target in another.
        history.append(event("U1", "U2", 3, 2, now), 100);
        history.append(event("U2", "U1", 1, 2, now), 100);

        let board = aggregate(&history, None, 10);
        let u1 = board
            .iter()
            .find(|entry| entry.user_id == "U1")
            .expect("user should rank");
        assert_eq!(u1.points, 5);
        assert_eq!(u1.count, 2);
    }

    #[test]
    fn ties_break_by_user_id_ascending() {
        let now = utc(2024, 6, 1);
        let mut history = EventHistory::default();
        history.append(event("U2", "U1", 1, 1, now), 100);

        let board = aggregate(&history, None, 10);
        let ids = board
            .iter()
            .map(|entry| entry.user_id.as_str())
            .collect::<Vec<_>>();
        assert_eq!(ids, ["U1", "U2"]);
    }

    #[test]
    fn latest_event_name_wins() {
        let now = utc(2024, 6, 1);
        let mut history = EventHistory::default();
        let mut early = event("U1", "U2", 1, 2, now - Duration::days(2));
        early.actor_name = "old-name".to_string();
        let mut late = event("U1", "U3", 1, 2, now);
        late.actor_name = "new-name".to_string();
        history.append(early, 100);
        history.append(late, 100);

        let board = aggregate(&history, None, 10);
        let u1 = board
            .iter()
            .find(|entry| entry.user_id == "U1")
            .expect("user should rank");
        assert_eq!(u1.username, "new-name");
    }

    #[test]
    fn limit_truncates_the_board() {
        let now = utc(2024, 6, 1);
        let mut history = EventHistory::default();
        history.append(event("U1", "U2", 5, 2, now), 100);
        history.append(event("U3", "U4", 1, 2, now), 100);

        let board = aggregate(&history, None, 1);
        assert_eq!(board.len(), 1);
        assert_eq!(board[0].user_id, "U1");
    }
}
