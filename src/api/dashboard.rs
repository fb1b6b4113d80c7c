use crate::auth::auth::AuthUser;
use crate::auth::directory::UserDirectory;
use crate::leave::policy::{self, Counters};
use crate::leave::store::LeaveStore;
use crate::model::store::DEFAULT_STORES;
use actix_web::{HttpResponse, Responder, web};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct DashboardResponse {
    #[serde(flatten)]
    pub counters: Counters,
    /// Stores in the directory
    #[schema(example = 7)]
    pub stores: usize,
}

/// for the dashboard counters endpoint
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    responses(
        (status = 200, description = "Per-user dashboard counters", body = DashboardResponse),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Dashboard"
)]
pub async fn dashboard(
    auth: AuthUser,
    store: web::Data<LeaveStore>,
    directory: web::Data<dyn UserDirectory>,
) -> actix_web::Result<impl Responder> {
    let user = auth.as_user();
    let snapshot = store.snapshot();

    let stores = match directory.stores().await {
        Ok(stores) => stores.len(),
        Err(_) => DEFAULT_STORES.len(),
    };

    Ok(HttpResponse::Ok().json(DashboardResponse {
        counters: policy::counters(&user, &snapshot),
        stores,
    }))
}
