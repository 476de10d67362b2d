use thiserror::Error;

/// Failures reported by [`integrate`](crate::integrate::integrate).
///
/// `E` is the observer's error type; it is passed through untouched as the
/// source of `Observer`.
#[derive(Error, Debug)]
pub enum IntegrateError<E: std::error::Error + 'static> {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("observer failed")]
    Observer(#[source] E),
}
