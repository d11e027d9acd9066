use async_trait::async_trait;
use mongodb::bson::{doc, oid::ObjectId, to_bson, Document};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::ReturnDocument;

use super::{MongoDB, USERS_COLLECTION};
use crate::models::{NewUser, SavedBook, User};
use crate::utils::AppError;

const DUPLICATE_KEY: i32 = 11000;

/// Persistence operations the resolvers need from the users collection.
///
/// `find_by_id`, `push_saved_book` and `pull_saved_book` return the document
/// without its password hash. Lookups with an id that does not parse as an
/// ObjectId behave like a missing document.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Validates, hashes the password and inserts. Unique-key clashes are `Validation` errors.
    async fn create_user(&self, new_user: NewUser) -> Result<User, AppError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;

    /// Includes the password hash, for credential checks.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Appends to `savedBooks` (`$push`); duplicates are kept.
    async fn push_saved_book(&self, id: &str, book: SavedBook) -> Result<Option<User>, AppError>;

    /// Removes every entry of `savedBooks` whose `bookId` matches (`$pull`).
    async fn pull_saved_book(&self, id: &str, book_id: &str) -> Result<Option<User>, AppError>;

    async fn health_check(&self) -> Result<(), AppError>;
}

fn profile_projection() -> Document {
    doc! { "password": 0, "__v": 0 }
}

fn map_write_error(e: mongodb::error::Error) -> AppError {
    if let ErrorKind::Write(WriteFailure::WriteError(we)) = e.kind.as_ref() {
        if we.code == DUPLICATE_KEY {
            return AppError::Validation(format!("Duplicate key: {}", we.message));
        }
    }
    AppError::from(e)
}

#[async_trait]
impl UserStore for MongoDB {
    async fn create_user(&self, new_user: NewUser) -> Result<User, AppError> {
        let user = new_user.into_document().await?;

        self.collection::<User>(USERS_COLLECTION)
            .insert_one(&user)
            .await
            .map_err(map_write_error)?;

        log::info!("✅ User created: {} ({})", user.username, user.id_hex());
        Ok(user)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        let Ok(oid) = ObjectId::parse_str(id) else {
            return Ok(None);
        };

        let user = self
            .collection::<User>(USERS_COLLECTION)
            .find_one(doc! { "_id": oid })
            .projection(profile_projection())
            .await?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = self
            .collection::<User>(USERS_COLLECTION)
            .find_one(doc! { "email": email })
            .await?;
        Ok(user)
    }

    async fn push_saved_book(&self, id: &str, book: SavedBook) -> Result<Option<User>, AppError> {
        book.validate()?;
        let Ok(oid) = ObjectId::parse_str(id) else {
            return Ok(None);
        };
        let book = to_bson(&book).map_err(|e| AppError::Internal(e.to_string()))?;

        let user = self
            .collection::<User>(USERS_COLLECTION)
            .find_one_and_update(doc! { "_id": oid }, doc! { "$push": { "savedBooks": book } })
            .projection(profile_projection())
            .return_document(ReturnDocument::After)
            .await?;
        Ok(user)
    }

    async fn pull_saved_book(&self, id: &str, book_id: &str) -> Result<Option<User>, AppError> {
        let Ok(oid) = ObjectId::parse_str(id) else {
            return Ok(None);
        };

        let user = self
            .collection::<User>(USERS_COLLECTION)
            .find_one_and_update(
                doc! { "_id": oid },
                doc! { "$pull": { "savedBooks": { "bookId": book_id } } },
            )
            .projection(profile_projection())
            .return_document(ReturnDocument::After)
            .await?;
        Ok(user)
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.database().run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}
