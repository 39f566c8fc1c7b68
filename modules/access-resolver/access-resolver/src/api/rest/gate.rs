//! Access Gate: one check per resource kind plus the write gate.
//!
//! ```rust,ignore
//! let gate = AccessGate::new(client, Arc::new(RoleCapabilityPolicy));
//! let router = Router::new()
//!     .route("/buildings/{building_id}", get(show_building))
//!     .route_layer(middleware::from_fn_with_state(
//!         gate.guard(Requirement::building("building_id")),
//!         enforce,
//!     ));
//! ```
//!
//! Use `route_layer` so path parameters are available to the guard.

use std::sync::Arc;

use access_resolver_sdk::AccessResolverClient;
use axum::body::{Body, to_bytes};
use axum::extract::{FromRequestParts, RawPathParams, Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use koveo_security::{Action, PolicyEngineRef, Principal, ResourceKind};
use tracing::{debug, error, warn};
use uuid::Uuid;

use super::error::GateRejection;
use super::ids::RequestIds;

/// Upper bound on a JSON body buffered to look for an id.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// What a route demands before its handler runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// The principal must reach the resource whose id sits in `field`.
    Access {
        kind: ResourceKind,
        field: &'static str,
    },
    Write {
        resource: ResourceKind,
        action: Action,
    },
}

impl Requirement {
    #[must_use]
    pub fn organization(field: &'static str) -> Self {
        Self::Access {
            kind: ResourceKind::Organization,
            field,
        }
    }

    #[must_use]
    pub fn building(field: &'static str) -> Self {
        Self::Access {
            kind: ResourceKind::Building,
            field,
        }
    }

    #[must_use]
    pub fn residence(field: &'static str) -> Self {
        Self::Access {
            kind: ResourceKind::Residence,
            field,
        }
    }

    #[must_use]
    pub fn write(resource: ResourceKind, action: Action) -> Self {
        Self::Write { resource, action }
    }
}

/// Stateless adapter from resolver answers to proceed / reject.
#[derive(Clone)]
pub struct AccessGate {
    resolver: Arc<dyn AccessResolverClient>,
    policy: PolicyEngineRef,
}

impl AccessGate {
    #[must_use]
    pub fn new(resolver: Arc<dyn AccessResolverClient>, policy: PolicyEngineRef) -> Self {
        Self { resolver, policy }
    }

    /// Middleware state pairing this gate with a route requirement.
    #[must_use]
    pub fn guard(&self, requirement: Requirement) -> GateGuard {
        GateGuard {
            gate: self.clone(),
            requirement,
        }
    }

    /// # Errors
    /// The [`GateRejection`] to send instead of running the handler.
    pub async fn require_organization_access(
        &self,
        principal: Option<&Principal>,
        ids: &RequestIds,
        field: &str,
    ) -> Result<Uuid, GateRejection> {
        self.require(ResourceKind::Organization, principal, ids, field)
            .await
    }

    /// # Errors
    /// The [`GateRejection`] to send instead of running the handler.
    pub async fn require_building_access(
        &self,
        principal: Option<&Principal>,
        ids: &RequestIds,
        field: &str,
    ) -> Result<Uuid, GateRejection> {
        self.require(ResourceKind::Building, principal, ids, field)
            .await
    }

    /// # Errors
    /// The [`GateRejection`] to send instead of running the handler.
    pub async fn require_residence_access(
        &self,
        principal: Option<&Principal>,
        ids: &RequestIds,
        field: &str,
    ) -> Result<Uuid, GateRejection> {
        self.require(ResourceKind::Residence, principal, ids, field)
            .await
    }

    /// Read-only cohort first, then the capability policy.
    ///
    /// # Errors
    /// The [`GateRejection`] to send instead of running the handler.
    pub async fn require_write_access(
        &self,
        principal: Option<&Principal>,
        resource: ResourceKind,
        action: Action,
    ) -> Result<(), GateRejection> {
        let principal = principal.ok_or(GateRejection::Unauthenticated)?;
        let principal_id = principal.id();

        match self
            .resolver
            .can_perform_write_operation(principal_id, action)
            .await
        {
            Ok(true) => {}
            Ok(false) => {
                warn!(%principal_id, %action, "write blocked for read-only cohort");
                return Err(GateRejection::WriteDenied);
            }
            Err(e) => {
                error!(%principal_id, %action, error = ?e, "write check failed");
                return Err(GateRejection::Failed);
            }
        }

        if !self.policy.allows(principal, resource, action) {
            warn!(
                %principal_id,
                role = %principal.role(),
                resource = %resource,
                %action,
                "action not permitted for role"
            );
            return Err(GateRejection::WriteDenied);
        }
        Ok(())
    }

    async fn require(
        &self,
        kind: ResourceKind,
        principal: Option<&Principal>,
        ids: &RequestIds,
        field: &str,
    ) -> Result<Uuid, GateRejection> {
        let principal = principal.ok_or(GateRejection::Unauthenticated)?;
        let principal_id = principal.id();
        let id = ids.lookup(field).ok_or(GateRejection::MissingId(kind))?;

        let decision = match kind {
            ResourceKind::Organization => {
                self.resolver
                    .can_access_organization(principal_id, id)
                    .await
            }
            ResourceKind::Building => self.resolver.can_access_building(principal_id, id).await,
            ResourceKind::Residence => self.resolver.can_access_residence(principal_id, id).await,
        };

        match decision {
            Ok(true) => {
                debug!(%principal_id, resource = %kind, resource_id = %id, "access granted");
                Ok(id)
            }
            Ok(false) => {
                warn!(%principal_id, resource = %kind, resource_id = %id, "access denied");
                Err(GateRejection::Denied(kind))
            }
            Err(e) => {
                error!(
                    %principal_id,
                    resource = %kind,
                    resource_id = %id,
                    error = ?e,
                    "access check failed"
                );
                Err(GateRejection::Failed)
            }
        }
    }

    /// Run the requirement against a request, handing the request back
    /// (body restored) when it may proceed.
    ///
    /// # Errors
    /// The [`GateRejection`] to send instead of running the handler.
    pub async fn check(
        &self,
        requirement: Requirement,
        request: Request,
    ) -> Result<Request, GateRejection> {
        let principal = request.extensions().get::<Principal>().cloned();
        let Some(principal) = principal else {
            debug!(uri = %request.uri(), "request without principal");
            return Err(GateRejection::Unauthenticated);
        };

        match requirement {
            Requirement::Write { resource, action } => {
                self.require_write_access(Some(&principal), resource, action)
                    .await?;
                Ok(request)
            }
            Requirement::Access { kind, field } => {
                let (request, ids) = collect_ids(request, field).await?;
                self.require(kind, Some(&principal), &ids, field).await?;
                Ok(request)
            }
        }
    }
}

fn is_json(parts: &Parts) -> bool {
    parts
        .headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| {
            let mime = ct.split(';').next().unwrap_or_default().trim();
            mime.eq_ignore_ascii_case("application/json") || mime.ends_with("+json")
        })
}

/// Gather id candidates. The body is only buffered when the path does not
/// already carry a valid id, and is put back for the handler.
async fn collect_ids(
    request: Request,
    field: &str,
) -> Result<(Request, RequestIds), GateRejection> {
    let (mut parts, body) = request.into_parts();

    let path: Vec<(String, String)> = match RawPathParams::from_request_parts(&mut parts, &()).await
    {
        Ok(params) => params
            .iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect(),
        Err(_) => Vec::new(),
    };
    let ids = RequestIds::new()
        .with_path(path)
        .with_query(parts.uri.query().unwrap_or_default());

    if ids.path_id(field).is_some() || !is_json(&parts) {
        return Ok((Request::from_parts(parts, body), ids));
    }

    let bytes = to_bytes(body, MAX_BODY_BYTES).await.map_err(|e| {
        error!(error = %e, "failed to buffer request body");
        GateRejection::Failed
    })?;
    let ids = ids.with_body(serde_json::from_slice(&bytes).ok());
    Ok((Request::from_parts(parts, Body::from(bytes)), ids))
}

/// State for [`enforce`].
#[derive(Clone)]
pub struct GateGuard {
    gate: AccessGate,
    requirement: Requirement,
}

/// `axum::middleware::from_fn_with_state` entry point.
pub async fn enforce(State(guard): State<GateGuard>, request: Request, next: Next) -> Response {
    let instance = request.uri().path().to_owned();
    match guard.gate.check(guard.requirement, request).await {
        Ok(request) => next.run(request).await,
        Err(rejection) => rejection.to_problem(&instance).into_response(),
    }
}
