#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected gateway response status: {0}")]
    UnexpectedStatus(reqwest::StatusCode),
}
