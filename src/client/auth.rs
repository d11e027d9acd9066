use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

use super::{ClientError, LocalStorage};
use crate::services::auth_service::Claims;

const TOKEN_KEY: &str = "id_token";

/// Client-side token holder.
///
/// The client cannot check signatures; it only reads the claims and the
/// expiry. The server verifies every request.
#[derive(Debug, Clone)]
pub struct AuthSession {
    storage: LocalStorage,
}

impl AuthSession {
    pub fn new(storage: LocalStorage) -> Self {
        Self { storage }
    }

    pub fn login(&self, token: &str) -> Result<(), ClientError> {
        self.storage.set_item(TOKEN_KEY, token)
    }

    pub fn logout(&self) -> Result<(), ClientError> {
        self.storage.remove_item(TOKEN_KEY)
    }

    pub fn get_token(&self) -> Option<String> {
        match self.storage.get_item(TOKEN_KEY) {
            Ok(token) => token,
            Err(e) => {
                log::error!("Failed to read stored token: {}", e);
                None
            }
        }
    }

    /// Claims of the stored token, if it is present and unexpired
    pub fn profile(&self) -> Option<Claims> {
        let token = self.get_token()?;
        decode_unverified(&token)
    }

    pub fn logged_in(&self) -> bool {
        self.profile().is_some()
    }

    /// The stored token, only while it is unexpired
    pub fn valid_token(&self) -> Option<String> {
        let token = self.get_token()?;
        decode_unverified(&token).map(|_| token)
    }
}

fn decode_unverified(token: &str) -> Option<Claims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.leeway = 0;

    decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)
        .map(|data| data.claims)
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::JwtConfig;
    use crate::models::User;
    use crate::services::AuthService;
    use mongodb::bson::oid::ObjectId;

    fn token_expiring_at(exp: usize) -> String {
        let claims = Claims {
            sub: ObjectId::new().to_hex(),
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
            iat: exp - 3600,
            exp,
            jti: "jti".to_string(),
        };
        jsonwebtoken::encode(
            &jsonwebtoken::Header::default(),
            &claims,
            &jsonwebtoken::EncodingKey::from_secret(b"server-only-secret"),
        )
        .unwrap()
    }

    fn token(expiration_hours: i64) -> String {
        AuthService::new(&JwtConfig {
            secret: "server-only-secret".to_string(),
            expiration_hours,
        })
        .sign_token(&User {
            id: ObjectId::new(),
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
            password: String::new(),
            saved_books: vec![],
        })
        .unwrap()
    }

    fn session() -> (tempfile::TempDir, AuthSession) {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path().join("storage.json"));
        (dir, AuthSession::new(storage))
    }

    #[test]
    fn test_login_logout() {
        let (_dir, session) = session();
        assert!(!session.logged_in());

        session.login(&token(2)).unwrap();
        assert!(session.logged_in());
        assert_eq!(session.profile().unwrap().username, "alice");

        session.logout().unwrap();
        assert!(!session.logged_in());
        assert_eq!(session.get_token(), None);
    }

    #[test]
    fn test_expired_token_is_not_logged_in() {
        let (_dir, session) = session();
        session.login(&token(-1)).unwrap();

        assert!(session.get_token().is_some());
        assert!(!session.logged_in());
        assert_eq!(session.valid_token(), None);
    }

    #[test]
    fn test_token_expired_seconds_ago_is_not_logged_in() {
        let (_dir, session) = session();
        let now = chrono::Utc::now().timestamp() as usize;
        session.login(&token_expiring_at(now - 30)).unwrap();

        assert!(!session.logged_in());
        assert_eq!(session.valid_token(), None);
    }
}
