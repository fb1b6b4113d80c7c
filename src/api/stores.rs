use crate::auth::auth::AuthUser;
use crate::auth::directory::UserDirectory;
use crate::model::store::{DEFAULT_STORES, Store};
use actix_web::{HttpResponse, Responder, web};
use serde::Serialize;
use tracing::warn;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct StoreListResponse {
    pub data: Vec<Store>,
    #[schema(example = 7)]
    pub total: usize,
}

/// for the store directory endpoint
#[utoipa::path(
    get,
    path = "/api/v1/stores",
    responses(
        (status = 200, description = "Ordered store directory", body = StoreListResponse),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Store"
)]
pub async fn list_stores(
    _auth: AuthUser,
    directory: web::Data<dyn UserDirectory>,
) -> actix_web::Result<impl Responder> {
    // Directory failure degrades to the built-in list instead of erroring.
    let data = match directory.stores().await {
        Ok(stores) => stores,
        Err(e) => {
            warn!(error = %e, "Store collaborator unavailable, serving the built-in list");
            DEFAULT_STORES.clone()
        }
    };

    let response = StoreListResponse {
        total: data.len(),
        data,
    };

    Ok(HttpResponse::Ok().json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::directory::{DirectoryError, UserDirectory};
    use crate::auth::jwt::generate_session_token;
    use crate::config::Config;
    use crate::model::user::User;
    use actix_web::{App, test, web::Data};
    use async_trait::async_trait;
    use std::sync::Arc;

    struct DownDirectory;

    #[async_trait]
    impl UserDirectory for DownDirectory {
        async fn authenticate(&self, _: &str, _: &str) -> Result<Option<User>, DirectoryError> {
            Err(DirectoryError::Unavailable("down".into()))
        }

        async fn stores(&self) -> Result<Vec<Store>, DirectoryError> {
            Err(DirectoryError::Unavailable("down".into()))
        }
    }

    #[actix_web::test]
    async fn directory_failure_serves_the_built_in_list() {
        let config = Config {
            server_addr: "127.0.0.1:0".into(),
            jwt_secret: "test-secret".into(),
            session_ttl: 900,
            database_url: None,
            rate_login_per_min: 60,
            rate_protected_per_min: 1000,
            api_prefix: "/api".into(),
        };

        let directory: Arc<dyn UserDirectory> = Arc::new(DownDirectory);
        let app = test::init_service(
            App::new()
                .app_data(Data::new(config.clone()))
                .app_data(Data::from(directory))
                .route("/stores", actix_web::web::get().to(list_stores)),
        )
        .await;

        let user = crate::auth::directory::MOCK_USERS[0].clone();
        let (token, _) = generate_session_token(&user, &config.jwt_secret, config.session_ttl);

        let req = test::TestRequest::get()
            .uri("/stores")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["total"], 7);
        assert_eq!(body["data"][0]["name"], "Paris Store");
    }
}

