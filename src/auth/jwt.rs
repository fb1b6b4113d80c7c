use std::time::{SystemTime, UNIX_EPOCH};

use crate::model::user::User;
use crate::models::Claims;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

fn now() -> usize {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize
}

pub fn generate_session_token(user: &User, secret: &str, ttl: usize) -> (String, Claims) {
    let claims = Claims {
        user_id: user.id.clone(),
        sub: user.email.clone(),
        name: user.name.clone(),
        role: user.role.id(),
        exp: now() + ttl,
        jti: Uuid::new_v4().to_string(),
        store_id: user.store_id.clone(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap();

    (token, claims)
}

pub fn verify_token(token: &str, secret: &str) -> Result<Claims, String> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::role::Role;

    fn user() -> User {
        User {
            id: "2".into(),
            name: "Paris Manager".into(),
            email: "paris@example.com".into(),
            role: Role::Manager,
            store_id: Some("1".into()),
            store: None,
        }
    }

    #[test]
    fn token_round_trips() {
        let (token, claims) = generate_session_token(&user(), "secret", 900);
        let decoded = verify_token(&token, "secret").unwrap();

        assert_eq!(decoded.user_id, "2");
        assert_eq!(decoded.sub, "paris@example.com");
        assert_eq!(decoded.role, Role::Manager.id());
        assert_eq!(decoded.store_id.as_deref(), Some("1"));
        assert_eq!(decoded.jti, claims.jti);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let (token, _) = generate_session_token(&user(), "secret", 900);
        assert!(verify_token(&token, "other").is_err());
    }
}
