use thiserror::Error;

pub type AqResult<T> = Result<T, AqError>;

#[derive(Error, Debug)]
pub enum AqError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}
