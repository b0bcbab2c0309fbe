use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum UnitError {
    #[error("Unsupported unit prefix '{prefix}' in token '{token}'")]
    UnknownPrefix { prefix: char, token: String },

    #[error("Invalid target unit '{0}' (expected one of f, p, n, u, m, k, M, G or none)")]
    InvalidTarget(String),
}
