use axum::response::{IntoResponse, Response};
use koveo_errors::{ErrDef, Problem};
use koveo_security::ResourceKind;

macro_rules! err_def {
    ($name:ident, $status:expr, $title:expr) => {
        pub const $name: ErrDef = ErrDef {
            status: $status,
            title: $title,
            code: stringify!($name),
            type_url: concat!("https://errors.koveo.dev/access/", stringify!($name)),
        };
    };
}

/// Stable codes clients branch on.
pub mod codes {
    use super::ErrDef;

    err_def!(AUTH_REQUIRED, 401, "Unauthorized");
    err_def!(MISSING_ORGANIZATION_ID, 400, "Bad Request");
    err_def!(MISSING_BUILDING_ID, 400, "Bad Request");
    err_def!(MISSING_RESIDENCE_ID, 400, "Bad Request");
    err_def!(ORGANIZATION_ACCESS_DENIED, 403, "Forbidden");
    err_def!(BUILDING_ACCESS_DENIED, 403, "Forbidden");
    err_def!(RESIDENCE_ACCESS_DENIED, 403, "Forbidden");
    err_def!(WRITE_ACCESS_DENIED, 403, "Forbidden");
    err_def!(AUTHORIZATION_ERROR, 500, "Internal Server Error");
}

/// Why the gate refused a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GateRejection {
    #[error("authentication required")]
    Unauthenticated,

    #[error("missing {0} id")]
    MissingId(ResourceKind),

    #[error("{0} access denied")]
    Denied(ResourceKind),

    #[error("write access denied")]
    WriteDenied,

    /// The decision could not be made; never treated as an allow.
    #[error("authorization could not be evaluated")]
    Failed,
}

impl GateRejection {
    #[must_use]
    pub fn err_def(self) -> &'static ErrDef {
        match self {
            GateRejection::Unauthenticated => &codes::AUTH_REQUIRED,
            GateRejection::MissingId(ResourceKind::Organization) => &codes::MISSING_ORGANIZATION_ID,
            GateRejection::MissingId(ResourceKind::Building) => &codes::MISSING_BUILDING_ID,
            GateRejection::MissingId(ResourceKind::Residence) => &codes::MISSING_RESIDENCE_ID,
            GateRejection::Denied(ResourceKind::Organization) => &codes::ORGANIZATION_ACCESS_DENIED,
            GateRejection::Denied(ResourceKind::Building) => &codes::BUILDING_ACCESS_DENIED,
            GateRejection::Denied(ResourceKind::Residence) => &codes::RESIDENCE_ACCESS_DENIED,
            GateRejection::WriteDenied => &codes::WRITE_ACCESS_DENIED,
            GateRejection::Failed => &codes::AUTHORIZATION_ERROR,
        }
    }

    #[must_use]
    pub fn code(self) -> &'static str {
        self.err_def().code
    }

    fn detail(self) -> String {
        match self {
            GateRejection::Unauthenticated => "Authentication required".to_owned(),
            GateRejection::MissingId(kind) => format!("Request does not carry a valid {kind} id"),
            GateRejection::Denied(kind) => format!("Access to this {kind} is not allowed"),
            GateRejection::WriteDenied => "Write access is not allowed".to_owned(),
            GateRejection::Failed => "Authorization could not be evaluated".to_owned(),
        }
    }

    /// Problem body; `instance` is the request path.
    pub fn to_problem(self, instance: &str) -> Problem {
        let trace_id = tracing::Span::current()
            .id()
            .map(|id| id.into_u64().to_string());
        self.err_def()
            .with_context(self.detail(), instance, trace_id)
    }
}

impl IntoResponse for GateRejection {
    fn into_response(self) -> Response {
        self.to_problem("").into_response()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn every_rejection_has_stable_code() {
        let cases = [
            (GateRejection::Unauthenticated, 401, "AUTH_REQUIRED"),
            (
                GateRejection::MissingId(ResourceKind::Organization),
                400,
                "MISSING_ORGANIZATION_ID",
            ),
            (
                GateRejection::MissingId(ResourceKind::Building),
                400,
                "MISSING_BUILDING_ID",
            ),
            (
                GateRejection::MissingId(ResourceKind::Residence),
                400,
                "MISSING_RESIDENCE_ID",
            ),
            (
                GateRejection::Denied(ResourceKind::Organization),
                403,
                "ORGANIZATION_ACCESS_DENIED",
            ),
            (
                GateRejection::Denied(ResourceKind::Building),
                403,
                "BUILDING_ACCESS_DENIED",
            ),
            (
                GateRejection::Denied(ResourceKind::Residence),
                403,
                "RESIDENCE_ACCESS_DENIED",
            ),
            (GateRejection::WriteDenied, 403, "WRITE_ACCESS_DENIED"),
            (GateRejection::Failed, 500, "AUTHORIZATION_ERROR"),
        ];
        for (rejection, status, code) in cases {
            let problem = rejection.to_problem("/x");
            assert_eq!(problem.status.as_u16(), status, "{rejection}");
            assert_eq!(problem.code, code);
            assert_eq!(problem.type_url, format!("https://errors.koveo.dev/access/{code}"));
            assert_eq!(problem.instance, "/x");
        }
    }

    #[test]
    fn response_carries_problem_content_type() {
        let resp = GateRejection::Failed.into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            resp.headers()
                .get(axum::http::header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok()),
            Some(koveo_errors::APPLICATION_PROBLEM_JSON)
        );
    }
}
