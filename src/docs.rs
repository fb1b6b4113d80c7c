use crate::api::calendar::{CalendarDay, CalendarResponse, DayQuery, MonthQuery};
use crate::api::dashboard::DashboardResponse;
use crate::api::leave_request::{CreateLeave, LeaveFilter, LeaveListResponse};
use crate::api::stores::StoreListResponse;
use crate::leave::policy::Counters;
use crate::model::leave_request::{LeaveRequest, LeaveStatus};
use crate::model::role::Role;
use crate::model::store::Store;
use crate::model::user::User;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Leave Planner API",
        version = "1.0.0",
        description = r#"
## Retail Leave Planner

This API powers an internal leave planning tool for a multi-store retail
network.

### Key Features
- **Leave Requests**
  - Submit a request, review and approve/reject as a manager or admin
- **Calendar**
  - Month grid with per-day coverage, scoped by store
- **Stores**
  - Store directory with a built-in fallback list
- **Dashboard**
  - Per-user counters

### Security
Endpoints are protected with **JWT Bearer authentication**; the same token
is accepted from the `leave_session` cookie.
Visibility is scoped by role: employees see their store, managers their
store's requests, admins everything.

---
Built with **Rust**, **Actix Web**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::leave_request::leave_list,
        crate::api::leave_request::my_leave_list,
        crate::api::leave_request::create_leave,
        crate::api::leave_request::approve_leave,
        crate::api::leave_request::reject_leave,

        crate::api::calendar::month_view,
        crate::api::calendar::day_view,

        crate::api::stores::list_stores,

        crate::api::dashboard::dashboard,
    ),
    components(
        schemas(
            LeaveRequest,
            LeaveStatus,
            LeaveFilter,
            CreateLeave,
            LeaveListResponse,
            MonthQuery,
            DayQuery,
            CalendarDay,
            CalendarResponse,
            StoreListResponse,
            DashboardResponse,
            Counters,
            Store,
            User,
            Role
        )
    ),
    tags(
        (name = "Leave", description = "Leave request management APIs"),
        (name = "Calendar", description = "Calendar coverage APIs"),
        (name = "Store", description = "Store directory APIs"),
        (name = "Dashboard", description = "Dashboard counter APIs"),
    )
)]
pub struct ApiDoc;
