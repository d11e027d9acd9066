use super::auth_service::{AuthService, AuthUser};
use crate::database::UserStore;
use crate::models::{NewUser, SavedBook, User};
use crate::utils::AppError;

pub const ME_UNAUTHENTICATED: &str =
    "User not authenticated. Please log in to access your profile.";
pub const SAVE_UNAUTHENTICATED: &str = "User not authenticated. Please log in to save books.";
pub const REMOVE_UNAUTHENTICATED: &str =
    "User not authenticated. Please log in to remove books.";
pub const USER_NOT_FOUND: &str = "User not found. Please check your email or sign up.";
pub const INCORRECT_PASSWORD: &str = "Incorrect password. Please try again.";

/// Token plus the user it was issued for
#[derive(Debug, Clone)]
pub struct AuthPayload {
    pub token: String,
    pub user: User,
}

fn require<'a>(identity: Option<&'a AuthUser>, message: &str) -> Result<&'a AuthUser, AppError> {
    identity.ok_or_else(|| AppError::Unauthenticated(message.to_string()))
}

pub async fn add_user(
    store: &dyn UserStore,
    auth: &AuthService,
    new_user: NewUser,
) -> Result<AuthPayload, AppError> {
    log::info!("📝 addUser - username: {}", new_user.username);

    let user = store.create_user(new_user).await?;
    let token = auth.sign_token(&user)?;

    Ok(AuthPayload {
        token,
        user: user.without_password(),
    })
}

pub async fn login(
    store: &dyn UserStore,
    auth: &AuthService,
    email: &str,
    password: &str,
) -> Result<AuthPayload, AppError> {
    log::info!("🔐 login - email: {}", email);

    let user = store
        .find_by_email(email)
        .await?
        .ok_or_else(|| AppError::NotFound(USER_NOT_FOUND.to_string()))?;

    if !user.is_correct_password(password).await? {
        log::warn!("❌ Login failed: {} - incorrect password", email);
        return Err(AppError::InvalidCredentials(INCORRECT_PASSWORD.to_string()));
    }

    let token = auth.sign_token(&user)?;
    log::info!("✅ Login successful: {}", email);

    Ok(AuthPayload {
        token,
        user: user.without_password(),
    })
}

pub async fn me(store: &dyn UserStore, identity: Option<&AuthUser>) -> Result<Option<User>, AppError> {
    let identity = require(identity, ME_UNAUTHENTICATED)?;
    store.find_by_id(&identity.id).await
}

pub async fn save_book(
    store: &dyn UserStore,
    identity: Option<&AuthUser>,
    book: SavedBook,
) -> Result<Option<User>, AppError> {
    let identity = require(identity, SAVE_UNAUTHENTICATED)?;
    log::info!("📚 saveBook - user: {}, book: {}", identity.username, book.book_id);
    store.push_saved_book(&identity.id, book).await
}

pub async fn remove_book(
    store: &dyn UserStore,
    identity: Option<&AuthUser>,
    book_id: &str,
) -> Result<Option<User>, AppError> {
    let identity = require(identity, REMOVE_UNAUTHENTICATED)?;
    log::info!("🗑️  removeBook - user: {}, book: {}", identity.username, book_id);
    store.pull_saved_book(&identity.id, book_id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::JwtConfig;
    use crate::database::MemoryUserStore;

    fn auth() -> AuthService {
        AuthService::new(&JwtConfig {
            secret: "secret".to_string(),
            expiration_hours: 2,
        })
    }

    fn alice() -> NewUser {
        NewUser {
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
            password: "pw123".to_string(),
        }
    }

    #[tokio::test]
    async fn test_login_outcomes() {
        let store = MemoryUserStore::new();
        let auth = auth();
        let created = add_user(&store, &auth, alice()).await.unwrap();
        assert!(created.user.password.is_empty());

        let err = login(&store, &auth, "nobody@x.com", "pw123").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref m) if m == USER_NOT_FOUND));

        let err = login(&store, &auth, "a@x.com", "wrong").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials(ref m) if m == INCORRECT_PASSWORD));

        let ok = login(&store, &auth, "a@x.com", "pw123").await.unwrap();
        let claims = auth.verify_token(&ok.token).unwrap();
        assert_eq!(claims.sub, created.user.id_hex());
    }

    #[tokio::test]
    async fn test_identity_required() {
        let store = MemoryUserStore::new();
        let book = SavedBook {
            book_id: "b1".to_string(),
            authors: vec![],
            description: None,
            title: "T".to_string(),
            image: None,
            link: None,
        };

        let err = me(&store, None).await.unwrap_err();
        assert_eq!(err.to_string(), ME_UNAUTHENTICATED);
        let err = save_book(&store, None, book).await.unwrap_err();
        assert_eq!(err.to_string(), SAVE_UNAUTHENTICATED);
        let err = remove_book(&store, None, "b1").await.unwrap_err();
        assert_eq!(err.to_string(), REMOVE_UNAUTHENTICATED);
    }
}
