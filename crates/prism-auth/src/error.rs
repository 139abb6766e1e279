use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("not authenticated — run `prism auth login`")]
    NotAuthenticated,

    #[error("credential store error: {0}")]
    StoreError(String),
}
