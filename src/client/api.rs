use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::ClientError;
use crate::models::SavedBook;

pub const GET_ME: &str = r#"
query GetMe {
  me {
    _id
    username
    email
    bookCount
    savedBooks { bookId authors description title image link }
  }
}"#;

pub const LOGIN_USER: &str = r#"
mutation Login($email: String!, $password: String!) {
  login(email: $email, password: $password) {
    token
    user { _id username email bookCount savedBooks { bookId authors description title image link } }
  }
}"#;

pub const ADD_USER: &str = r#"
mutation AddUser($username: String!, $email: String!, $password: String!) {
  addUser(username: $username, email: $email, password: $password) {
    token
    user { _id username email bookCount savedBooks { bookId authors description title image link } }
  }
}"#;

pub const SAVE_BOOK: &str = r#"
mutation SaveBook($newBook: BookInput!) {
  saveBook(newBook: $newBook) {
    _id
    username
    email
    bookCount
    savedBooks { bookId authors description title image link }
  }
}"#;

pub const REMOVE_BOOK: &str = r#"
mutation RemoveBook($bookId: String!) {
  removeBook(bookId: $bookId) {
    _id
    username
    email
    bookCount
    savedBooks { bookId authors description title image link }
  }
}"#;

/// User as returned by the API
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    pub email: String,
    pub book_count: usize,
    pub saved_books: Vec<SavedBook>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthData {
    pub token: String,
    pub user: Profile,
}

#[derive(Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: Value,
}

#[derive(Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Deserialize)]
struct GraphQlResponse {
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

/// GraphQL client for the book search API
#[derive(Clone)]
pub struct BookClient {
    http: reqwest::Client,
    endpoint: String,
}

impl BookClient {
    /// `base_url` is the server origin, e.g. `http://localhost:3001`
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: format!("{}/graphql", base_url.trim_end_matches('/')),
        }
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Value,
        token: Option<&str>,
        field: &str,
    ) -> Result<T, ClientError> {
        let mut request = self
            .http
            .post(&self.endpoint)
            .json(&GraphQlRequest { query, variables });
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response: GraphQlResponse = request.send().await?.error_for_status()?.json().await?;

        if !response.errors.is_empty() {
            return Err(ClientError::GraphQl(
                response.errors.into_iter().map(|e| e.message).collect(),
            ));
        }

        let value = response
            .data
            .and_then(|mut data| data.get_mut(field).map(Value::take))
            .ok_or_else(|| ClientError::MissingData(field.to_string()))?;

        serde_json::from_value(value).map_err(|_| ClientError::MissingData(field.to_string()))
    }

    /// Fetches the current user from the server, bypassing any local state
    pub async fn me(&self, token: Option<&str>) -> Result<Option<Profile>, ClientError> {
        self.execute(GET_ME, json!({}), token, "me").await
    }

    pub async fn add_user(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthData, ClientError> {
        let variables = json!({ "username": username, "email": email, "password": password });
        self.execute(ADD_USER, variables, None, "addUser").await
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthData, ClientError> {
        let variables = json!({ "email": email, "password": password });
        self.execute(LOGIN_USER, variables, None, "login").await
    }

    pub async fn save_book(
        &self,
        token: &str,
        book: &SavedBook,
    ) -> Result<Option<Profile>, ClientError> {
        let variables = json!({ "newBook": book });
        self.execute(SAVE_BOOK, variables, Some(token), "saveBook").await
    }

    pub async fn remove_book(
        &self,
        token: &str,
        book_id: &str,
    ) -> Result<Option<Profile>, ClientError> {
        let variables = json!({ "bookId": book_id });
        self.execute(REMOVE_BOOK, variables, Some(token), "removeBook").await
    }
}
