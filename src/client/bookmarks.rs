use super::{ClientError, LocalStorage};

const SAVED_BOOKS_KEY: &str = "saved_books";

/// Local list of bookmarked book ids. A convenience cache for the UI; the
/// server's `savedBooks` is the source of truth.
#[derive(Debug, Clone)]
pub struct LocalBookmarks {
    storage: LocalStorage,
}

impl LocalBookmarks {
    pub fn new(storage: LocalStorage) -> Self {
        Self { storage }
    }

    pub fn saved_book_ids(&self) -> Result<Vec<String>, ClientError> {
        match self.storage.get_item(SAVED_BOOKS_KEY)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    /// Replaces the list. An empty list clears the key.
    pub fn save_book_ids(&self, ids: &[String]) -> Result<(), ClientError> {
        if ids.is_empty() {
            return self.storage.remove_item(SAVED_BOOKS_KEY);
        }
        self.storage
            .set_item(SAVED_BOOKS_KEY, &serde_json::to_string(ids)?)
    }

    /// Returns false when there was nothing stored to remove from.
    pub fn remove_book_id(&self, book_id: &str) -> Result<bool, ClientError> {
        let Some(raw) = self.storage.get_item(SAVED_BOOKS_KEY)? else {
            return Ok(false);
        };
        let ids: Vec<String> = serde_json::from_str(&raw)?;
        let remaining: Vec<String> = ids.into_iter().filter(|id| id != book_id).collect();
        self.storage
            .set_item(SAVED_BOOKS_KEY, &serde_json::to_string(&remaining)?)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bookmarks() -> (tempfile::TempDir, LocalBookmarks) {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path().join("storage.json"));
        (dir, LocalBookmarks::new(storage))
    }

    #[test]
    fn test_save_and_remove_ids() {
        let (_dir, bookmarks) = bookmarks();
        assert!(bookmarks.saved_book_ids().unwrap().is_empty());
        assert!(!bookmarks.remove_book_id("b1").unwrap());

        let ids = vec!["b1".to_string(), "b2".to_string(), "b1".to_string()];
        bookmarks.save_book_ids(&ids).unwrap();

        assert!(bookmarks.remove_book_id("b1").unwrap());
        assert_eq!(bookmarks.saved_book_ids().unwrap(), vec!["b2".to_string()]);
    }

    #[test]
    fn test_empty_list_clears_key() {
        let (_dir, bookmarks) = bookmarks();
        bookmarks.save_book_ids(&["b1".to_string()]).unwrap();
        bookmarks.save_book_ids(&[]).unwrap();
        assert!(!bookmarks.remove_book_id("b1").unwrap());
    }
}
