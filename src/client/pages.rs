//! View models for the saved-books and search screens.

use super::{AuthSession, BookClient, GoogleBooksClient, LocalBookmarks, Profile};
use crate::models::SavedBook;

pub const LOADING_MESSAGE: &str = "Loading...";
pub const ERROR_MESSAGE: &str = "Error loading your books. Please try again later.";
pub const NO_DATA_MESSAGE: &str =
    "No data found. Please log in again or check if you have saved books.";
pub const NO_SAVED_BOOKS: &str = "You have no saved books!";

#[derive(Debug, Clone, PartialEq)]
pub enum SavedBooksView {
    Loading,
    Error,
    NoData,
    Loaded(Profile),
}

impl SavedBooksView {
    pub fn render(&self) -> String {
        match self {
            SavedBooksView::Loading => LOADING_MESSAGE.to_string(),
            SavedBooksView::Error => ERROR_MESSAGE.to_string(),
            SavedBooksView::NoData => NO_DATA_MESSAGE.to_string(),
            SavedBooksView::Loaded(profile) => render_saved_books(&profile.saved_books),
        }
    }
}

fn render_saved_books(books: &[SavedBook]) -> String {
    let mut out = String::from("Viewing saved books!\n");

    if books.is_empty() {
        out.push_str(NO_SAVED_BOOKS);
        return out;
    }

    let noun = if books.len() == 1 { "book" } else { "books" };
    out.push_str(&format!("Viewing {} saved {}:", books.len(), noun));

    for book in books {
        out.push_str(&format!("\n- {} (Authors: {})", book.title, book.authors.join(", ")));
        if let Some(description) = book.description.as_deref().filter(|d| !d.is_empty()) {
            out.push_str(&format!("\n  {}", description));
        }
    }
    out
}

/// The current user's saved books
pub struct SavedBooksPage {
    client: BookClient,
    session: AuthSession,
    bookmarks: LocalBookmarks,
    view: SavedBooksView,
}

impl SavedBooksPage {
    pub fn new(client: BookClient, session: AuthSession, bookmarks: LocalBookmarks) -> Self {
        Self {
            client,
            session,
            bookmarks,
            view: SavedBooksView::Loading,
        }
    }

    pub fn view(&self) -> &SavedBooksView {
        &self.view
    }

    /// Fetches `me` from the network. Failures are logged and shown as the
    /// generic error state; nothing is retried. The view reads `Loading`
    /// only until the first load completes.
    pub async fn load(&mut self) -> &SavedBooksView {
        let token = self.session.get_token();
        self.view = match self.client.me(token.as_deref()).await {
            Ok(Some(profile)) => SavedBooksView::Loaded(profile),
            Ok(None) => SavedBooksView::NoData,
            Err(e) => {
                log::error!("GraphQL query error: {}", e);
                SavedBooksView::Error
            }
        };
        &self.view
    }

    /// Removes a book on the server, then refetches and drops the id from
    /// the local bookmarks. Returns whether the removal went through.
    pub async fn handle_delete_book(&mut self, book_id: &str) -> bool {
        let Some(token) = self.session.valid_token() else {
            log::error!("User must be logged in to delete a book.");
            return false;
        };

        if let Err(e) = self.client.remove_book(&token, book_id).await {
            log::error!("Error removing book: {}", e);
            return false;
        }

        self.load().await;

        if let Err(e) = self.bookmarks.remove_book_id(book_id) {
            log::warn!("Failed to update local bookmarks: {}", e);
        }
        true
    }
}

/// Google Books search with save-to-list
pub struct SearchBooksPage {
    client: BookClient,
    google: GoogleBooksClient,
    session: AuthSession,
    bookmarks: LocalBookmarks,
    results: Vec<SavedBook>,
    saved_book_ids: Vec<String>,
}

impl SearchBooksPage {
    pub fn new(
        client: BookClient,
        google: GoogleBooksClient,
        session: AuthSession,
        bookmarks: LocalBookmarks,
    ) -> Self {
        let saved_book_ids = bookmarks.saved_book_ids().unwrap_or_else(|e| {
            log::warn!("Failed to read local bookmarks: {}", e);
            Vec::new()
        });

        Self {
            client,
            google,
            session,
            bookmarks,
            results: Vec::new(),
            saved_book_ids,
        }
    }

    pub fn results(&self) -> &[SavedBook] {
        &self.results
    }

    pub fn saved_book_ids(&self) -> &[String] {
        &self.saved_book_ids
    }

    pub fn is_saved(&self, book_id: &str) -> bool {
        self.saved_book_ids.iter().any(|id| id == book_id)
    }

    /// Replaces the results. On failure the previous results stay.
    pub async fn search(&mut self, query: &str) -> &[SavedBook] {
        match self.google.search(query).await {
            Ok(books) => self.results = books,
            Err(e) => log::error!("Book search failed: {}", e),
        }
        &self.results
    }

    /// Saves one of the current results to the user's list
    pub async fn handle_save_book(&mut self, book_id: &str) -> bool {
        let Some(book) = self.results.iter().find(|b| b.book_id == book_id).cloned() else {
            log::warn!("Book {} is not in the current results", book_id);
            return false;
        };

        let Some(token) = self.session.valid_token() else {
            log::error!("User must be logged in to save a book.");
            return false;
        };

        if let Err(e) = self.client.save_book(&token, &book).await {
            log::error!("Error saving book: {}", e);
            return false;
        }

        self.saved_book_ids.push(book.book_id);
        if let Err(e) = self.bookmarks.save_book_ids(&self.saved_book_ids) {
            log::warn!("Failed to update local bookmarks: {}", e);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(book_id: &str, title: &str, authors: &[&str]) -> SavedBook {
        SavedBook {
            book_id: book_id.to_string(),
            authors: authors.iter().map(|a| a.to_string()).collect(),
            description: None,
            title: title.to_string(),
            image: None,
            link: None,
        }
    }

    fn profile(books: Vec<SavedBook>) -> Profile {
        Profile {
            id: "id".to_string(),
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
            book_count: books.len(),
            saved_books: books,
        }
    }

    #[test]
    fn test_distinct_states() {
        assert_eq!(SavedBooksView::Loading.render(), LOADING_MESSAGE);
        assert_eq!(SavedBooksView::Error.render(), ERROR_MESSAGE);
        assert_eq!(SavedBooksView::NoData.render(), NO_DATA_MESSAGE);

        let empty = SavedBooksView::Loaded(profile(vec![])).render();
        assert!(empty.ends_with(NO_SAVED_BOOKS));
    }

    #[test]
    fn test_loaded_headline_pluralisation() {
        let one = SavedBooksView::Loaded(profile(vec![book("b1", "Dune", &["Frank Herbert"])]));
        assert!(one.render().contains("Viewing 1 saved book:"));
        assert!(one.render().contains("- Dune (Authors: Frank Herbert)"));

        let two = SavedBooksView::Loaded(profile(vec![
            book("b1", "Dune", &["Frank Herbert"]),
            book("b2", "Emma", &["Jane Austen"]),
        ]));
        assert!(two.render().contains("Viewing 2 saved books:"));
    }

    #[tokio::test]
    async fn test_delete_without_token_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let storage = crate::client::LocalStorage::new(dir.path().join("storage.json"));
        let bookmarks = LocalBookmarks::new(storage.clone());
        bookmarks.save_book_ids(&["b1".to_string()]).unwrap();

        // Unroutable server: a request would turn into an error, not a no-op
        let mut page = SavedBooksPage::new(
            BookClient::new("http://127.0.0.1:9"),
            AuthSession::new(storage),
            bookmarks.clone(),
        );

        assert!(!page.handle_delete_book("b1").await);
        assert_eq!(page.view(), &SavedBooksView::Loading);
        assert_eq!(bookmarks.saved_book_ids().unwrap(), vec!["b1".to_string()]);
    }

    #[tokio::test]
    async fn test_failed_delete_leaves_view_and_bookmarks() {
        let dir = tempfile::tempdir().unwrap();
        let storage = crate::client::LocalStorage::new(dir.path().join("storage.json"));
        let session = AuthSession::new(storage.clone());
        let bookmarks = LocalBookmarks::new(storage);
        bookmarks.save_book_ids(&["b1".to_string()]).unwrap();

        let token = crate::services::AuthService::new(&crate::config::JwtConfig {
            secret: "secret".to_string(),
            expiration_hours: 2,
        })
        .sign_token(&crate::models::User {
            id: mongodb::bson::oid::ObjectId::new(),
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
            password: String::new(),
            saved_books: vec![],
        })
        .unwrap();
        session.login(&token).unwrap();

        let mut page = SavedBooksPage::new(
            BookClient::new("http://127.0.0.1:9"),
            session,
            bookmarks.clone(),
        );

        assert!(!page.handle_delete_book("b1").await);
        assert_eq!(page.view(), &SavedBooksView::Loading);
        assert_eq!(bookmarks.saved_book_ids().unwrap(), vec!["b1".to_string()]);
    }
}
