use async_graphql::{InputObject, Object, SimpleObject, ID};

use crate::models::{self, SavedBook};

/// A saved book as exposed over GraphQL
#[derive(Debug, Clone, SimpleObject)]
pub struct Book {
    pub book_id: String,
    pub authors: Vec<String>,
    pub description: Option<String>,
    pub title: String,
    pub image: Option<String>,
    pub link: Option<String>,
}

impl From<SavedBook> for Book {
    fn from(book: SavedBook) -> Self {
        Self {
            book_id: book.book_id,
            authors: book.authors,
            description: book.description,
            title: book.title,
            image: book.image,
            link: book.link,
        }
    }
}

/// Book payload accepted by `saveBook`
#[derive(Debug, Clone, InputObject)]
pub struct BookInput {
    pub book_id: String,
    pub authors: Option<Vec<String>>,
    pub description: Option<String>,
    pub title: String,
    pub image: Option<String>,
    pub link: Option<String>,
}

impl From<BookInput> for SavedBook {
    fn from(input: BookInput) -> Self {
        Self {
            book_id: input.book_id,
            authors: input.authors.unwrap_or_default(),
            description: input.description,
            title: input.title,
            image: input.image,
            link: input.link,
        }
    }
}

/// User profile. Never carries the password hash.
pub struct User(pub models::User);

#[Object]
impl User {
    #[graphql(name = "_id")]
    async fn id(&self) -> ID {
        ID(self.0.id_hex())
    }

    async fn username(&self) -> &str {
        &self.0.username
    }

    async fn email(&self) -> &str {
        &self.0.email
    }

    /// Number of saved books, computed at resolve time
    async fn book_count(&self) -> i32 {
        self.0.book_count() as i32
    }

    async fn saved_books(&self) -> Vec<Book> {
        self.0.saved_books.iter().cloned().map(Book::from).collect()
    }
}

#[derive(SimpleObject)]
pub struct Auth {
    pub token: ID,
    pub user: User,
}
