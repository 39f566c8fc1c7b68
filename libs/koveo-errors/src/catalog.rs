//! Static error catalog entries.

use crate::problem::Problem;
use http::StatusCode;

/// Static error definition from a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrDef {
    pub status: u16,
    pub title: &'static str,
    pub code: &'static str,
    pub type_url: &'static str,
}

impl ErrDef {
    /// Convert this error definition into a Problem with the given detail.
    #[inline]
    pub fn as_problem(&self, detail: impl Into<String>) -> Problem {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        Problem::new(status, self.title, detail.into())
            .with_code(self.code)
            .with_type(self.type_url)
    }

    /// Same as [`ErrDef::as_problem`], also attaching the request path and trace id.
    pub fn with_context(
        &self,
        detail: impl Into<String>,
        instance: &str,
        trace_id: Option<String>,
    ) -> Problem {
        let p = self.as_problem(detail).with_instance(instance);
        match trace_id {
            Some(tid) => p.with_trace_id(tid),
            None => p,
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    const DENIED: ErrDef = ErrDef {
        status: 403,
        title: "Forbidden",
        code: "ORGANIZATION_ACCESS_DENIED",
        type_url: "https://errors.koveo.dev/ORGANIZATION_ACCESS_DENIED",
    };

    #[test]
    fn err_def_to_problem() {
        let problem = DENIED.as_problem("Access to organization denied");
        assert_eq!(problem.status, StatusCode::FORBIDDEN);
        assert_eq!(problem.code, "ORGANIZATION_ACCESS_DENIED");
        assert_eq!(
            problem.type_url,
            "https://errors.koveo.dev/ORGANIZATION_ACCESS_DENIED"
        );
    }

    #[test]
    fn context_is_attached() {
        let problem = DENIED.with_context("denied", "/organizations/1", Some("42".to_owned()));
        assert_eq!(problem.instance, "/organizations/1");
        assert_eq!(problem.trace_id.as_deref(), Some("42"));
    }

    #[test]
    fn invalid_status_falls_back_to_500() {
        let def = ErrDef {
            status: 42,
            ..DENIED
        };
        assert_eq!(def.as_problem("x").status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
