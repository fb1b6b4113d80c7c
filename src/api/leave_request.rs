use crate::auth::auth::AuthUser;
use crate::auth::directory::UserDirectory;
use crate::leave::policy;
use crate::leave::repository::LeaveRepository;
use crate::leave::store::{LeaveStore, ResolveOutcome};
use crate::model::leave_request::{LeaveAction, LeaveRequest, LeaveStatus};
use crate::model::role::Role;
use crate::model::store::find_store;
use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Deserialize, ToSchema)]
pub struct CreateLeave {
    #[schema(example = "2026-01-05", format = "date", value_type = String)]
    pub start_date: chrono::NaiveDate,
    #[schema(example = "2026-01-09", format = "date", value_type = String)]
    pub end_date: chrono::NaiveDate,
    #[schema(example = "Vacances d'été")]
    pub reason: String,
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct LeaveFilter {
    #[schema(example = "1")]
    /// Narrow the review list to one store (admin only; managers are always
    /// scoped to their own store)
    pub store_id: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[schema(example = json!({
    "data": [
        {
            "id": "1",
            "user_id": "4",
            "user_name": "Employee 1",
            "store_id": "1",
            "store_name": "Paris Store",
            "start_date": "2026-01-05",
            "end_date": "2026-01-09",
            "reason": "Vacances d'été",
            "status": "pending",
            "created_at": "2026-01-01T00:00:00Z"
        }
    ],
    "pending": 1,
    "total": 1
}))]
pub struct LeaveListResponse {
    pub data: Vec<LeaveRequest>,
    /// Pending requests within the returned scope
    #[schema(example = 1)]
    pub pending: usize,
    #[schema(example = 1)]
    pub total: usize,
}

/* =========================
Create leave request
========================= */
/// Swagger doc for create_leave endpoint
#[utoipa::path(
    post,
    path = "/api/v1/leave",
    request_body(
        content = CreateLeave,
        description = "Leave request payload",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Leave request submitted successfully",
         body = Object,
         example = json!({
            "message": "Leave request submitted",
            "status": "pending"
         })
        ),
        (status = 400, description = "Bad request"),
        (status = 401, description = "Unauthorized"),
        (status = 503, description = "Persistence collaborator unavailable")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn create_leave(
    auth: AuthUser,
    store: web::Data<LeaveStore>,
    repository: web::Data<dyn LeaveRepository>,
    directory: web::Data<dyn UserDirectory>,
    payload: web::Json<CreateLeave>,
) -> actix_web::Result<impl Responder> {
    let mut user = auth.as_user();
    // The submission records the store name alongside the id; the session
    // token only carries the id, so look the record up again.
    if let Some(store_id) = user.store_id.clone() {
        user.store = match directory.stores().await {
            Ok(stores) => stores.into_iter().find(|s| s.id == store_id),
            Err(_) => find_store(&store_id),
        };
    }

    // 1. validate and build the pending record
    let request = match LeaveStore::prepare(&user, payload.start_date, payload.end_date, &payload.reason)
    {
        Ok(request) => request,
        Err(e) => {
            return Ok(HttpResponse::BadRequest().json(serde_json::json!({
                "message": e.to_string()
            })));
        }
    };

    // 2. collaborator write goes first so a failure leaves state untouched
    if let Err(e) = repository.insert(&request).await {
        tracing::error!(error = %e, user_id = %user.id, "Failed to persist leave request");
        return Ok(HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "message": "Could not save the leave request"
        })));
    }

    // 3. newest-first insertion into the shared collection
    let id = request.id.clone();
    store.insert_head(request);

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Leave request submitted",
        "status": "pending",
        "id": id
    })))
}

/* =========================
Approve / Reject (Manager/Admin)
========================= */

async fn resolve_leave(
    auth: &AuthUser,
    store: &LeaveStore,
    repository: &dyn LeaveRepository,
    leave_id: &str,
    action: LeaveAction,
) -> actix_web::Result<ResolveOutcome> {
    auth.require_manager_or_admin()?;

    // Managers only act within their own store; anything else is outside
    // their visibility and degrades to the silent no-op.
    if auth.role == Role::Manager {
        let in_scope = match (store.request_store(leave_id), auth.store_id.as_deref()) {
            (Some(request_store), Some(own_store)) => request_store == own_store,
            _ => false,
        };
        if !in_scope {
            return Ok(ResolveOutcome::Unchanged);
        }
    }

    // Unknown ids and already-resolved requests never reach the collaborator.
    if store.peek_resolution(leave_id, action) != ResolveOutcome::Updated {
        return Ok(store.resolve(leave_id, action));
    }

    let status = match action {
        LeaveAction::Approve => LeaveStatus::Approved,
        LeaveAction::Reject => LeaveStatus::Rejected,
    };

    if let Err(e) = repository.set_status(leave_id, status).await {
        tracing::error!(error = %e, leave_id, "Failed to persist status change");
        return Err(actix_web::error::ErrorServiceUnavailable(
            "Could not update the leave request",
        ));
    }

    Ok(store.resolve(leave_id, action))
}

/// Swagger doc for approve_leave endpoint
#[utoipa::path(
    put,
    path = "/api/v1/leave/{leave_id}/approve",
    params(
        ("leave_id" = String, Path, description = "ID of the leave request to approve")
    ),
    responses(
        (status = 200, description = "Leave approved (no-op if unknown or already resolved)", body = Object, example = json!({
            "message": "Leave approved"
        })),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn approve_leave(
    auth: AuthUser,
    store: web::Data<LeaveStore>,
    repository: web::Data<dyn LeaveRepository>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let leave_id = path.into_inner();

    resolve_leave(&auth, &store, &**repository, &leave_id, LeaveAction::Approve).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Leave approved"
    })))
}

/// Swagger doc for reject_leave endpoint
#[utoipa::path(
    put,
    path = "/api/v1/leave/{leave_id}/reject",
    params(
        ("leave_id" = String, Path, description = "ID of the leave request to reject")
    ),
    responses(
        (status = 200, description = "Leave rejected (no-op if unknown or already resolved)", body = Object, example = json!({
            "message": "Leave rejected"
        })),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn reject_leave(
    auth: AuthUser,
    store: web::Data<LeaveStore>,
    repository: web::Data<dyn LeaveRepository>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let leave_id = path.into_inner();

    resolve_leave(&auth, &store, &**repository, &leave_id, LeaveAction::Reject).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Leave rejected"
    })))
}

/* =========================
Review and personal lists
========================= */

/// for the management review list endpoint
#[utoipa::path(
    get,
    path = "/api/v1/leave",
    params(LeaveFilter),
    responses(
        (status = 200, description = "Role-scoped review list, pending first", body = LeaveListResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn leave_list(
    auth: AuthUser,
    store: web::Data<LeaveStore>,
    query: web::Query<LeaveFilter>,
) -> actix_web::Result<impl Responder> {
    auth.require_manager_or_admin()?;

    let user = auth.as_user();
    let snapshot = store.snapshot();

    let mut data = policy::review_scope(&user, query.store_id.as_deref(), &snapshot);
    policy::sort_for_review(&mut data);

    let response = LeaveListResponse {
        pending: policy::pending_count(&data),
        total: data.len(),
        data,
    };

    Ok(HttpResponse::Ok().json(response))
}

/// for the caller's own requests endpoint
#[utoipa::path(
    get,
    path = "/api/v1/leave/mine",
    responses(
        (status = 200, description = "The caller's own requests, newest first", body = LeaveListResponse),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn my_leave_list(
    auth: AuthUser,
    store: web::Data<LeaveStore>,
) -> actix_web::Result<impl Responder> {
    let user = auth.as_user();
    let snapshot = store.snapshot();

    let data = policy::personal_scope(&user, &snapshot);

    let response = LeaveListResponse {
        pending: policy::pending_count(&data),
        total: data.len(),
        data,
    };

    Ok(HttpResponse::Ok().json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::generate_session_token;
    use crate::config::Config;
    use crate::leave::repository::FixtureLeaveRepository;
    use crate::model::leave_request::LeaveStatus;
    use actix_web::{App, test, web::Data};
    use std::sync::Arc;

    fn test_config() -> Config {
        Config {
            server_addr: "127.0.0.1:0".into(),
            jwt_secret: "test-secret".into(),
            session_ttl: 900,
            database_url: None,
            rate_login_per_min: 60,
            rate_protected_per_min: 1000,
            api_prefix: "/api".into(),
        }
    }

    fn token_for(email: &str, config: &Config) -> String {
        let user = crate::auth::directory::MOCK_USERS
            .iter()
            .find(|u| u.email == email)
            .cloned()
            .unwrap();
        generate_session_token(&user, &config.jwt_secret, config.session_ttl).0
    }

    macro_rules! test_app {
        ($store:expr, $config:expr) => {{
            let repository: Arc<dyn LeaveRepository> = Arc::new(FixtureLeaveRepository::empty());
            let directory: Arc<dyn crate::auth::directory::UserDirectory> =
                Arc::new(crate::auth::directory::FixtureDirectory::new());
            test::init_service(
                App::new()
                    .app_data(Data::new($config.clone()))
                    .app_data($store.clone())
                    .app_data(Data::from(repository))
                    .app_data(Data::from(directory))
                    .route("/leave", actix_web::web::post().to(create_leave))
                    .route("/leave", actix_web::web::get().to(leave_list))
                    .route(
                        "/leave/{id}/approve",
                        actix_web::web::put().to(approve_leave),
                    )
                    .route("/leave/{id}/reject", actix_web::web::put().to(reject_leave)),
            )
            .await
        }};
    }

    #[actix_web::test]
    async fn create_then_approve_round_trip() {
        let config = test_config();
        let store = Data::new(LeaveStore::new());
        let app = test_app!(store, config);

        let employee_token = token_for("emp1@example.com", &config);
        let req = test::TestRequest::post()
            .uri("/leave")
            .insert_header(("Authorization", format!("Bearer {employee_token}")))
            .set_json(serde_json::json!({
                "start_date": "2026-03-05",
                "end_date": "2026-03-09",
                "reason": "x"
            }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "pending");
        let id = body["id"].as_str().unwrap().to_string();

        let manager_token = token_for("paris@example.com", &config);
        let req = test::TestRequest::put()
            .uri(&format!("/leave/{id}/approve"))
            .insert_header(("Authorization", format!("Bearer {manager_token}")))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        assert_eq!(store.find(&id).unwrap().status, LeaveStatus::Approved);

        // A later reject is a silent no-op.
        let req = test::TestRequest::put()
            .uri(&format!("/leave/{id}/reject"))
            .insert_header(("Authorization", format!("Bearer {manager_token}")))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
        assert_eq!(store.find(&id).unwrap().status, LeaveStatus::Approved);
    }

    #[actix_web::test]
    async fn inverted_range_is_a_400_and_leaves_state_alone() {
        let config = test_config();
        let store = Data::new(LeaveStore::new());
        let app = test_app!(store, config);

        let token = token_for("emp1@example.com", &config);
        let req = test::TestRequest::post()
            .uri("/leave")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .set_json(serde_json::json!({
                "start_date": "2026-03-09",
                "end_date": "2026-03-05",
                "reason": "x"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
        assert!(store.is_empty());
    }

    #[actix_web::test]
    async fn employees_cannot_open_the_review_list() {
        let config = test_config();
        let store = Data::new(LeaveStore::new());
        let app = test_app!(store, config);

        let token = token_for("emp1@example.com", &config);
        let req = test::TestRequest::get()
            .uri("/leave")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), actix_web::http::StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn managers_cannot_touch_other_stores() {
        let config = test_config();
        let store = Data::new(LeaveStore::with_requests(
            crate::leave::repository::mock_leave_requests(),
        ));
        let app = test_app!(store, config);

        // Request "1" belongs to the Paris store; the Lyon manager's approve
        // quietly changes nothing.
        let token = token_for("lyon@example.com", &config);
        let req = test::TestRequest::put()
            .uri("/leave/1/approve")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert!(resp.status().is_success());
        assert_eq!(store.find("1").unwrap().status, LeaveStatus::Pending);
    }
}
