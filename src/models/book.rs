use serde::{Deserialize, Serialize};

use crate::utils::AppError;

/// A book bookmarked by a user, embedded in the user document.
///
/// Entries are never edited in place: they are appended with `$push` and
/// removed with `$pull` on `bookId`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedBook {
    /// Identifier from the external catalogue (Google Books volume id)
    pub book_id: String,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub title: String,
    /// Cover image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl SavedBook {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.book_id.trim().is_empty() {
            return Err(AppError::Validation("Path `bookId` is required.".to_string()));
        }
        if self.title.trim().is_empty() {
            return Err(AppError::Validation("Path `title` is required.".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(book_id: &str, title: &str) -> SavedBook {
        SavedBook {
            book_id: book_id.to_string(),
            authors: vec![],
            description: None,
            title: title.to_string(),
            image: None,
            link: None,
        }
    }

    #[test]
    fn test_required_fields() {
        assert!(book("b1", "T").validate().is_ok());
        assert!(matches!(book("  ", "T").validate(), Err(AppError::Validation(_))));
        assert!(matches!(book("b1", "").validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_stored_field_names() {
        let json = serde_json::to_value(book("b1", "T")).unwrap();
        assert_eq!(json["bookId"], "b1");
        assert_eq!(json["authors"], serde_json::json!([]));
        assert!(json.get("description").is_none());
    }
}
