//! # Client Errors
//!
//! Every failure below the "application said no" level ends up here. The
//! middleware does not distinguish between variants when talking to the user:
//! all of them are shown as "<operation>: <message>".

/// Errors raised while collecting input or performing a request.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("campo '{0}' não encontrado no formulário")]
    MissingField(&'static str),
    #[error("falha na requisição: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("resposta inválida: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("resposta sem o campo '{0}'")]
    MissingData(&'static str),
    #[error("URL inválida: {0}")]
    InvalidUrl(String),
}

pub type ClientResult<T> = std::result::Result<T, ClientError>;
