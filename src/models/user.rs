use bcrypt::{hash, verify};
use lazy_static::lazy_static;
use mongodb::bson::oid::ObjectId;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tokio::task;

use super::SavedBook;
use crate::utils::AppError;

/// bcrypt cost used when hashing passwords before they are stored
pub const SALT_ROUNDS: u32 = 10;

lazy_static! {
    static ref EMAIL_PATTERN: Regex = Regex::new(r".+@.+\..+").unwrap();
}

/// User document as stored in the `users` collection
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub username: String,
    pub email: String,
    /// bcrypt hash; empty when the document was loaded with the password projected out
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub password: String,
    #[serde(default)]
    pub saved_books: Vec<SavedBook>,
}

impl User {
    pub fn id_hex(&self) -> String {
        self.id.to_hex()
    }

    pub fn book_count(&self) -> usize {
        self.saved_books.len()
    }

    /// bcrypt verification runs on the blocking pool
    pub async fn is_correct_password(&self, candidate: &str) -> Result<bool, AppError> {
        if self.password.is_empty() {
            return Ok(false);
        }
        let candidate = candidate.to_string();
        let hashed = self.password.clone();
        Ok(task::spawn_blocking(move || verify(candidate, &hashed)).await??)
    }

    /// Copy of this document with the password hash removed
    pub fn without_password(mut self) -> Self {
        self.password.clear();
        self
    }
}

/// Registration payload, validated and hashed before insertion
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl NewUser {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.username.trim().is_empty() {
            return Err(AppError::Validation("Path `username` is required.".to_string()));
        }
        if self.email.is_empty() {
            return Err(AppError::Validation("Path `email` is required.".to_string()));
        }
        if !EMAIL_PATTERN.is_match(&self.email) {
            return Err(AppError::Validation("Must use a valid email address".to_string()));
        }
        if self.password.is_empty() {
            return Err(AppError::Validation("Path `password` is required.".to_string()));
        }
        Ok(())
    }

    /// Validates the payload and builds the document to insert, hashing the password.
    pub async fn into_document(self) -> Result<User, AppError> {
        self.validate()?;
        let plain = self.password;
        let password = task::spawn_blocking(move || hash(plain, SALT_ROUNDS)).await??;

        Ok(User {
            id: ObjectId::new(),
            username: self.username.trim().to_string(),
            email: self.email,
            password,
            saved_books: Vec::new(),
        })
    }
}
