use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("GraphQL error: {}", .0.join("; "))]
    GraphQl(Vec<String>),
    #[error("Response is missing `{0}`")]
    MissingData(String),
    #[error("Local storage error: {0}")]
    Storage(String),
}

impl From<std::io::Error> for ClientError {
    fn from(e: std::io::Error) -> Self {
        ClientError::Storage(e.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::Storage(e.to_string())
    }
}
