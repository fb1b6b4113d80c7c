use crate::{
    auth::{
        auth::{AuthUser, session_token},
        directory::UserDirectory,
        jwt::{generate_session_token, verify_token},
        session,
    },
    config::Config,
    model::user::User,
    models::LoginReqDto,
};
use actix_web::cookie::{Cookie, time::Duration as CookieDuration};
use actix_web::{HttpRequest, HttpResponse, Responder, get, web};
use serde::Serialize;
use serde_json::json;
use tracing::{debug, error, info, instrument};

#[derive(Serialize)]
struct LoginResponse {
    token: String,
    user: User,
}

fn session_cookie(token: &str, ttl: usize) -> Cookie<'static> {
    Cookie::build(session::SESSION_TOKEN, token.to_string())
        .path("/")
        .http_only(true)
        .max_age(CookieDuration::seconds(ttl as i64))
        .finish()
}

#[instrument(
    name = "auth_login",
    skip(directory, config, payload),
    fields(email = %payload.email)
)]
pub async fn login(
    payload: web::Json<LoginReqDto>,
    directory: web::Data<dyn UserDirectory>,
    config: web::Data<Config>,
) -> impl Responder {
    info!("Login request received");

    // 1. Basic validation
    if payload.email.trim().is_empty() || payload.password.is_empty() {
        info!("Validation failed: empty email or password");
        return HttpResponse::BadRequest().body("Email or password required");
    }

    debug!("Asking the identity collaborator");

    // 2. Single request/response call to the collaborator
    let user = match directory
        .authenticate(payload.email.trim(), &payload.password)
        .await
    {
        Ok(Some(user)) => {
            debug!(user_id = %user.id, "Account found");
            user
        }
        Ok(None) => {
            info!("Invalid credentials");
            return HttpResponse::Unauthorized().body("Invalid credentials");
        }
        Err(e) => {
            error!(error = %e, "Identity collaborator failure");
            return HttpResponse::ServiceUnavailable().json(json!({
                "message": "Authentication service unavailable"
            }));
        }
    };

    // 3. Open the session
    let (token, _claims) = generate_session_token(&user, &config.jwt_secret, config.session_ttl);

    info!("Login successful");

    HttpResponse::Ok()
        .cookie(session_cookie(&token, config.session_ttl))
        .json(LoginResponse { token, user })
}

pub async fn logout(req: HttpRequest, config: web::Data<Config>) -> impl Responder {
    // Closing a session is idempotent: missing or invalid tokens still get
    // a success response.
    if let Some(token) = session_token(&req) {
        if let Ok(claims) = verify_token(&token, &config.jwt_secret) {
            session::revoke(&claims.jti);
        }
    }

    let mut removal = Cookie::new(session::SESSION_TOKEN, "");
    removal.make_removal();

    HttpResponse::NoContent().cookie(removal).finish()
}

/// Session introspection: lets a reloading client rebuild its user context
/// from the persisted token.
#[get("/me")]
pub async fn me(auth: AuthUser, directory: web::Data<dyn UserDirectory>) -> impl Responder {
    let mut user = auth.as_user();

    // Re-attach the store record; the session token only carries the id.
    if let Some(store_id) = user.store_id.clone() {
        match directory.stores().await {
            Ok(stores) => user.store = stores.into_iter().find(|s| s.id == store_id),
            Err(e) => debug!(error = %e, "store lookup skipped"),
        }
    }

    HttpResponse::Ok().json(user)
}
