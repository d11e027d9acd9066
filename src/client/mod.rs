//! Client data layer: talks to the GraphQL API and keeps the local view
//! state (token, bookmarked ids, page models) in step with it.

pub mod api;
pub mod auth;
pub mod bookmarks;
pub mod error;
pub mod google_books;
pub mod pages;
pub mod storage;

pub use api::{AuthData, BookClient, Profile};
pub use auth::AuthSession;
pub use bookmarks::LocalBookmarks;
pub use error::ClientError;
pub use google_books::GoogleBooksClient;
pub use pages::{SavedBooksPage, SavedBooksView, SearchBooksPage};
pub use storage::LocalStorage;
