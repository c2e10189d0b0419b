use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

pub const EXIT_INVALID_INPUT: i32 = 1;
pub const EXIT_TOKEN: i32 = 2;
pub const EXIT_MAIL: i32 = 3;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),
    #[error("token error: {0}")]
    Token(String),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("url parse error: {0}")]
    Url(#[from] url::ParseError),
    #[error("smtp error: {0}")]
    Mail(String),
    #[error("smtp protocol error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
    #[error("message build error: {0}")]
    Message(#[from] lettre::error::Error),
}

impl AppError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidInput(_) | Self::Address(_) => EXIT_INVALID_INPUT,
            Self::Token(_) | Self::Http(_) | Self::Json(_) | Self::Url(_) => EXIT_TOKEN,
            Self::Mail(_) | Self::Smtp(_) | Self::Message(_) => EXIT_MAIL,
        }
    }
}
