use crate::helpers::JsonResponse;
use crate::models;
use crate::services::access_policy::{Decision, NOT_AUTHENTICATED, PERMISSION_DENIED};

/// Turns a policy decision into the HTTP failure a denied caller receives.
pub(crate) fn enforce(decision: Decision) -> Result<(), actix_web::Error> {
    match decision {
        Decision::Allow => Ok(()),
        Decision::NotAuthenticated => {
            Err(JsonResponse::<models::Product>::build().unauthorized(NOT_AUTHENTICATED))
        }
        Decision::Forbidden => {
            Err(JsonResponse::<models::Product>::build().forbidden(PERMISSION_DENIED))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn allow_passes() {
        assert!(enforce(Decision::Allow).is_ok());
    }

    #[test]
    fn denials_map_to_status() {
        let err = enforce(Decision::Forbidden).unwrap_err();
        assert_eq!(err.as_response_error().status_code(), StatusCode::FORBIDDEN);
        assert_eq!(err.to_string(), PERMISSION_DENIED);

        let err = enforce(Decision::NotAuthenticated).unwrap_err();
        assert_eq!(err.as_response_error().status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.to_string(), NOT_AUTHENTICATED);
    }
}
