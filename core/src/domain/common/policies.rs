use crate::domain::common::entities::app_errors::CoreError;

/// Turns a policy decision into a `Result`, mapping a denial to the given error.
pub fn ensure_policy(
    decision: Result<bool, CoreError>,
    denial: CoreError,
) -> Result<(), CoreError> {
    match decision {
        Ok(true) => Ok(()),
        Ok(false) => Err(denial),
        Err(e) => {
            tracing::error!("policy check failed: {}", e);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allowed_decision_passes() {
        assert!(ensure_policy(Ok(true), CoreError::PaymentRequired).is_ok());
    }

    #[test]
    fn denied_decision_maps_to_denial() {
        let err = ensure_policy(Ok(false), CoreError::PaymentRequired).unwrap_err();
        assert_eq!(err, CoreError::PaymentRequired);
    }

    #[test]
    fn failed_check_keeps_original_error() {
        let err = ensure_policy(
            Err(CoreError::ExternalServiceError("billing down".into())),
            CoreError::PaymentRequired,
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::ExternalServiceError(_)));
    }
}
