use formflow_api::ApiError;
use tracing::error;

/// Converts repository failures into `ApiError`.
///
/// A repository may raise a boxed `ApiError` itself (a unique violation
/// surfaces as `Conflict`); that error is passed through unchanged. Anything
/// else is logged and reported as `DependencyFailure` without the driver
/// detail.
pub trait StoreResultExt<T> {
    fn or_dependency_failure(self, context: &str) -> Result<T, ApiError>;
}

impl<T> StoreResultExt<T> for Result<T, Box<dyn std::error::Error + Send + Sync>> {
    fn or_dependency_failure(self, context: &str) -> Result<T, ApiError> {
        self.map_err(|err| match err.downcast::<ApiError>() {
            Ok(api_error) => *api_error,
            Err(err) => {
                error!(error = %err, "{context} failed");
                ApiError::DependencyFailure(format!("{context} failed"))
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passes_through_api_error() {
        let result: Result<(), Box<dyn std::error::Error + Send + Sync>> =
            Err(Box::new(ApiError::Conflict("already validated".into())));
        assert_eq!(
            result.or_dependency_failure("create validation"),
            Err(ApiError::Conflict("already validated".into()))
        );
    }

    #[test]
    fn test_hides_driver_error() {
        let result: Result<(), Box<dyn std::error::Error + Send + Sync>> =
            Err("connection reset by peer".into());
        assert_eq!(
            result.or_dependency_failure("load completion"),
            Err(ApiError::DependencyFailure("load completion failed".into()))
        );
    }
}
