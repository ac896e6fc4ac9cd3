use crate::error::AppError;
use crate::infra::http::dtos::responses::StatusResponse;
use tracing::warn;

/// Checks a write acknowledgement. An empty 2xx body counts as success;
/// `success: false` becomes `AppError::Rejected`.
pub fn ensure_acknowledged(body: &str) -> Result<(), AppError> {
    if body.trim().is_empty() {
        return Ok(());
    }

    let status: StatusResponse = serde_json::from_str(body)?;
    if status.success {
        Ok(())
    } else {
        let reason = status.error
            .or(status.message)
            .unwrap_or_else(|| "The server reported a failure".to_string());
        warn!("Write rejected by server: {}", reason);
        Err(AppError::Rejected(reason))
    }
}
