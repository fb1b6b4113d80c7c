use crate::auth::auth::AuthUser;
use crate::leave::calendar::{calendar_days, requests_on};
use crate::leave::policy;
use crate::leave::store::LeaveStore;
use crate::model::leave_request::LeaveRequest;
use actix_web::{HttpResponse, Responder, web};
use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct MonthQuery {
    /// Display month as YYYY-MM; defaults to the current month
    #[schema(example = "2026-01")]
    pub month: Option<String>,
    /// Store filter (admins only; other roles are scoped to their own store)
    #[schema(example = "1")]
    pub store_id: Option<String>,
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct DayQuery {
    #[schema(example = "2026-01-07", format = "date", value_type = String)]
    pub date: NaiveDate,
    #[schema(example = "1")]
    pub store_id: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct CalendarDay {
    #[schema(example = "2026-01-07", format = "date", value_type = String)]
    pub date: NaiveDate,
    /// False for the padding days borrowed from adjacent months
    pub in_month: bool,
    pub requests: Vec<LeaveRequest>,
}

#[derive(Serialize, ToSchema)]
pub struct CalendarResponse {
    #[schema(example = "2026-01-01", format = "date", value_type = String)]
    pub month: NaiveDate,
    pub days: Vec<CalendarDay>,
}

fn parse_month(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d").ok()
}

/// for the month grid endpoint
#[utoipa::path(
    get,
    path = "/api/v1/calendar",
    params(MonthQuery),
    responses(
        (status = 200, description = "Month grid padded to Monday-start weeks plus a trailing week", body = CalendarResponse),
        (status = 400, description = "Unparseable month"),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Calendar"
)]
pub async fn month_view(
    auth: AuthUser,
    store: web::Data<LeaveStore>,
    query: web::Query<MonthQuery>,
) -> actix_web::Result<impl Responder> {
    let month = match &query.month {
        Some(raw) => match parse_month(raw) {
            Some(month) => month,
            None => {
                return Ok(HttpResponse::BadRequest().json(serde_json::json!({
                    "message": "month must be formatted as YYYY-MM"
                })));
            }
        },
        None => Utc::now().date_naive().with_day(1).unwrap(),
    };

    let user = auth.as_user();
    let snapshot = store.snapshot();
    let scoped = policy::calendar_scope(&user, query.store_id.as_deref(), &snapshot);

    let days = calendar_days(month)
        .into_iter()
        .map(|date| CalendarDay {
            date,
            in_month: date.month() == month.month() && date.year() == month.year(),
            requests: requests_on(date, &scoped, None)
                .into_iter()
                .cloned()
                .collect(),
        })
        .collect();

    Ok(HttpResponse::Ok().json(CalendarResponse { month, days }))
}

/// for the single day membership endpoint
#[utoipa::path(
    get,
    path = "/api/v1/calendar/day",
    params(DayQuery),
    responses(
        (status = 200, description = "Requests whose inclusive range covers the day", body = CalendarDay),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Calendar"
)]
pub async fn day_view(
    auth: AuthUser,
    store: web::Data<LeaveStore>,
    query: web::Query<DayQuery>,
) -> actix_web::Result<impl Responder> {
    let user = auth.as_user();
    let snapshot = store.snapshot();
    let scoped = policy::calendar_scope(&user, query.store_id.as_deref(), &snapshot);

    let day = CalendarDay {
        date: query.date,
        in_month: true,
        requests: requests_on(query.date, &scoped, None)
            .into_iter()
            .cloned()
            .collect(),
    };

    Ok(HttpResponse::Ok().json(day))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_parsing_accepts_yyyy_mm_only() {
        assert_eq!(
            parse_month("2026-03"),
            Some(NaiveDate::from_ymd_opt(2026, 3, 1).unwrap())
        );
        assert!(parse_month("2026").is_none());
        assert!(parse_month("03-2026").is_none());
        assert!(parse_month("2026-13").is_none());
    }
}
