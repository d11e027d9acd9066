use async_trait::async_trait;
use std::sync::RwLock;

use super::UserStore;
use crate::models::{NewUser, SavedBook, User};
use crate::utils::AppError;

/// Process-local user store with the same constraints as the MongoDB one
/// (unique username/email, push/pull on `savedBooks`). Used by tests and
/// local tooling that should not need a database server.
#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<Vec<User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Vec<User>>, AppError> {
        self.users
            .read()
            .map_err(|_| AppError::Internal("user store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Vec<User>>, AppError> {
        self.users
            .write()
            .map_err(|_| AppError::Internal("user store lock poisoned".to_string()))
    }

    fn update<F>(&self, id: &str, apply: F) -> Result<Option<User>, AppError>
    where
        F: FnOnce(&mut Vec<SavedBook>),
    {
        let mut users = self.write()?;
        Ok(users.iter_mut().find(|u| u.id_hex() == id).map(|user| {
            apply(&mut user.saved_books);
            user.clone().without_password()
        }))
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create_user(&self, new_user: NewUser) -> Result<User, AppError> {
        let user = new_user.into_document().await?;
        let mut users = self.write()?;

        if users.iter().any(|u| u.username == user.username) {
            return Err(AppError::Validation(format!(
                "Duplicate key: username \"{}\" already exists",
                user.username
            )));
        }
        if users.iter().any(|u| u.email == user.email) {
            return Err(AppError::Validation(format!(
                "Duplicate key: email \"{}\" already exists",
                user.email
            )));
        }

        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        let users = self.read()?;
        Ok(users
            .iter()
            .find(|u| u.id_hex() == id)
            .map(|u| u.clone().without_password()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let users = self.read()?;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn push_saved_book(&self, id: &str, book: SavedBook) -> Result<Option<User>, AppError> {
        book.validate()?;
        self.update(id, |saved| saved.push(book))
    }

    async fn pull_saved_book(&self, id: &str, book_id: &str) -> Result<Option<User>, AppError> {
        self.update(id, |saved| saved.retain(|b| b.book_id != book_id))
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.read().map(|_| ())
    }
}
