use chrono::{Datelike, Duration, NaiveDate};

use crate::model::leave_request::LeaveRequest;

/// Monday of the week containing `day`.
pub fn week_start(day: NaiveDate) -> NaiveDate {
    day - Duration::days(day.weekday().num_days_from_monday() as i64)
}

pub fn month_start(day: NaiveDate) -> NaiveDate {
    day.with_day(1).unwrap()
}

pub fn month_end(day: NaiveDate) -> NaiveDate {
    let (year, month) = if day.month() == 12 {
        (day.year() + 1, 1)
    } else {
        (day.year(), day.month() + 1)
    };
    // First of the next month always exists.
    NaiveDate::from_ymd_opt(year, month, 1).unwrap() - Duration::days(1)
}

/// Every day shown on the month grid: from the Monday of the week holding
/// the 1st through the last day of the month plus a trailing week, so days
/// of adjacent months appear for grid completeness.
pub fn calendar_days(month: NaiveDate) -> Vec<NaiveDate> {
    let start = week_start(month_start(month));
    let end = month_end(month) + Duration::days(7);

    let mut days = Vec::new();
    let mut day = start;
    while day <= end {
        days.push(day);
        day += Duration::days(1);
    }
    days
}

/// Requests whose inclusive range covers `day`, optionally narrowed to one
/// store. Applies uniformly to grid days that belong to adjacent months.
pub fn requests_on<'a>(
    day: NaiveDate,
    requests: &'a [LeaveRequest],
    store_id: Option<&str>,
) -> Vec<&'a LeaveRequest> {
    requests
        .iter()
        .filter(|request| {
            if store_id.is_some_and(|id| request.store_id != id) {
                return false;
            }
            request.covers(day)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::leave_request::LeaveStatus;
    use chrono::{Utc, Weekday};

    fn request(id: &str, store_id: &str, start: NaiveDate, end: NaiveDate) -> LeaveRequest {
        LeaveRequest {
            id: id.into(),
            user_id: "4".into(),
            user_name: "Employee 1".into(),
            store_id: store_id.into(),
            store_name: format!("Store {store_id}"),
            start_date: start,
            end_date: end,
            reason: "x".into(),
            status: LeaveStatus::Pending,
            created_at: Utc::now(),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn grid_starts_on_the_monday_before_the_month() {
        // March 2026 starts on a Sunday.
        let days = calendar_days(date(2026, 3, 1));
        assert_eq!(days[0], date(2026, 2, 23));
        assert_eq!(days[0].weekday(), Weekday::Mon);
    }

    #[test]
    fn grid_runs_a_week_past_the_month_end() {
        let days = calendar_days(date(2026, 3, 15));
        assert_eq!(*days.last().unwrap(), date(2026, 4, 7));
    }

    #[test]
    fn grid_handles_the_december_rollover() {
        let days = calendar_days(date(2025, 12, 1));
        assert_eq!(*days.last().unwrap(), date(2026, 1, 7));
    }

    #[test]
    fn membership_is_inclusive_on_both_ends() {
        let requests = vec![request("a", "1", date(2026, 3, 5), date(2026, 3, 9))];

        for day in [5, 7, 9] {
            assert_eq!(requests_on(date(2026, 3, day), &requests, None).len(), 1);
        }
        for day in [4, 10] {
            assert!(requests_on(date(2026, 3, day), &requests, None).is_empty());
        }
    }

    #[test]
    fn membership_respects_the_store_filter() {
        let requests = vec![
            request("a", "1", date(2026, 3, 5), date(2026, 3, 9)),
            request("b", "2", date(2026, 3, 5), date(2026, 3, 9)),
        ];

        let on_day = requests_on(date(2026, 3, 6), &requests, Some("2"));
        assert_eq!(on_day.len(), 1);
        assert_eq!(on_day[0].id, "b");
    }

    #[test]
    fn membership_applies_to_out_of_month_grid_days() {
        // Spans the March/April boundary; both sides of the grid see it.
        let requests = vec![request("a", "1", date(2026, 3, 30), date(2026, 4, 2))];
        let days = calendar_days(date(2026, 3, 1));

        assert!(days.contains(&date(2026, 4, 1)));
        assert_eq!(requests_on(date(2026, 4, 1), &requests, None).len(), 1);
    }
}
