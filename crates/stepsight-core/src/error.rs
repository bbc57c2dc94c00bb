use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("please enter both email and password")]
    MissingCredentials,

    #[error("please enter a valid email address: {0}")]
    InvalidEmail(String),

    #[error("unknown gender: {0}")]
    UnknownGender(String),

    #[error("unknown role: {0}")]
    UnknownRole(String),

    #[error("{action} requires a {required} account")]
    Forbidden {
        action: &'static str,
        required: &'static str,
    },
}
