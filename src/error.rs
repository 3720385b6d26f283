use thiserror::Error;

/// Failure taxonomy shared by the serveme.tf, logs.tf and demos.tf gateways.
///
/// `InvalidFormat` is raised before any network call is attempted. `Gateway`
/// covers both transport-level failures (timeout, DNS, refused connection,
/// reported with status 0) and responses whose body is not JSON.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("invalid date or time format")]
    InvalidFormat,
    #[error("gateway failure (status {status}): {body}")]
    Gateway { status: u16, body: String },
    #[error("update rejected (status {status}): {body}")]
    UpdateRejected { status: u16, body: String },
    #[error("reservation not found")]
    NotFound,
}
