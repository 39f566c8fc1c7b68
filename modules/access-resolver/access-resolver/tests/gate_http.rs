#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Access gate as axum middleware.

mod common;

use std::collections::HashSet;
use std::sync::Arc;

use access_resolver::api::rest::{AccessGate, Requirement, enforce};
use access_resolver::config::AccessResolverConfig;
use access_resolver::{AccessResolverClient, AccessResolverError, AccessResolverModule};
use access_resolver_sdk::{BuildingId, OrganizationId, PrincipalId, ResidenceId};
use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request, StatusCode};
use axum::middleware::from_fn_with_state;
use axum::routing::{delete, get, post};
use common::Campus;
use http_body_util::BodyExt;
use koveo_errors::{APPLICATION_PROBLEM_JSON, Problem};
use koveo_security::{Action, Principal, ResourceKind, Role, RoleCapabilityPolicy};
use tower::ServiceExt;
use uuid::Uuid;

async fn ok() -> &'static str {
    "ok"
}

async fn echo(body: String) -> String {
    body
}

fn guarded(gate: &AccessGate, router: Router, requirement: Requirement) -> Router {
    router.route_layer(from_fn_with_state(gate.guard(requirement), enforce))
}

fn app(gate: &AccessGate) -> Router {
    Router::new()
        .merge(guarded(
            gate,
            Router::new().route("/organizations/{organization_id}", get(ok)),
            Requirement::organization("organization_id"),
        ))
        .merge(guarded(
            gate,
            Router::new()
                .route("/buildings/{building_id}", get(ok))
                .route("/buildings", get(ok)),
            Requirement::building("building_id"),
        ))
        .merge(guarded(
            gate,
            Router::new().route("/maintenance-requests", post(echo)),
            Requirement::residence("residence_id"),
        ))
        .merge(guarded(
            gate,
            Router::new().route("/notices", post(echo)),
            Requirement::write(ResourceKind::Building, Action::Create),
        ))
        .merge(guarded(
            gate,
            Router::new().route("/notices/{notice_id}", delete(ok)),
            Requirement::write(ResourceKind::Building, Action::Delete),
        ))
}

fn module_app(campus: &Campus) -> Router {
    let module = AccessResolverModule::new(
        campus.store.clone(),
        AccessResolverConfig::default(),
        Arc::new(RoleCapabilityPolicy),
    );
    app(module.gate())
}

fn request(
    method: Method,
    uri: &str,
    principal: Option<Principal>,
) -> axum::http::request::Builder {
    let builder = Request::builder().method(method).uri(uri);
    match principal {
        Some(p) => builder.extension(p),
        None => builder,
    }
}

async fn send(router: Router, req: Request<Body>) -> (StatusCode, Option<String>, Vec<u8>) {
    let response = router.oneshot(req).await.unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_owned());
    let body = response.into_body().collect().await.unwrap().to_bytes().to_vec();
    (status, content_type, body)
}

async fn expect_problem(
    router: Router,
    req: Request<Body>,
    status: StatusCode,
    code: &str,
) -> Problem {
    let (actual, content_type, body) = send(router, req).await;
    assert_eq!(actual, status);
    assert_eq!(content_type.as_deref(), Some(APPLICATION_PROBLEM_JSON));
    let problem: Problem = serde_json::from_slice(&body).unwrap();
    assert_eq!(problem.code, code);
    assert_eq!(problem.status, status);
    problem
}

struct Member {
    campus: Campus,
    manager: Principal,
    tenant: Principal,
}

fn member() -> Member {
    let campus = Campus::new();
    let manager_id = campus.principal(Role::Manager);
    campus.join(manager_id, campus.maple);
    let tenant_id = campus.principal(Role::Tenant);
    campus.join(tenant_id, campus.maple);
    campus.occupy(tenant_id, campus.north_101, true);
    Member {
        campus,
        manager: Principal::new(manager_id, Role::Manager),
        tenant: Principal::new(tenant_id, Role::Tenant),
    }
}

#[tokio::test]
async fn missing_principal_is_unauthorized() {
    let m = member();
    let uri = format!("/buildings/{}", m.campus.maple_north);
    let req = request(Method::GET, &uri, None).body(Body::empty()).unwrap();

    let problem = expect_problem(
        module_app(&m.campus),
        req,
        StatusCode::UNAUTHORIZED,
        "AUTH_REQUIRED",
    )
    .await;
    assert_eq!(problem.instance, uri);
}

#[tokio::test]
async fn path_id_grants_and_denies() {
    let m = member();

    let uri = format!("/buildings/{}", m.campus.maple_north);
    let req = request(Method::GET, &uri, Some(m.manager.clone()))
        .body(Body::empty())
        .unwrap();
    let (status, _, body) = send(module_app(&m.campus), req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"ok");

    let uri = format!("/buildings/{}", m.campus.harbour_tower);
    let req = request(Method::GET, &uri, Some(m.manager.clone()))
        .body(Body::empty())
        .unwrap();
    expect_problem(
        module_app(&m.campus),
        req,
        StatusCode::FORBIDDEN,
        "BUILDING_ACCESS_DENIED",
    )
    .await;

    let uri = format!("/organizations/{}", m.campus.harbour);
    let req = request(Method::GET, &uri, Some(m.manager))
        .body(Body::empty())
        .unwrap();
    expect_problem(
        module_app(&m.campus),
        req,
        StatusCode::FORBIDDEN,
        "ORGANIZATION_ACCESS_DENIED",
    )
    .await;
}

#[tokio::test]
async fn malformed_or_absent_id_is_bad_request() {
    let m = member();

    let req = request(Method::GET, "/buildings/not-a-uuid", Some(m.manager.clone()))
        .body(Body::empty())
        .unwrap();
    expect_problem(
        module_app(&m.campus),
        req,
        StatusCode::BAD_REQUEST,
        "MISSING_BUILDING_ID",
    )
    .await;

    let req = request(Method::GET, "/buildings", Some(m.manager))
        .body(Body::empty())
        .unwrap();
    expect_problem(
        module_app(&m.campus),
        req,
        StatusCode::BAD_REQUEST,
        "MISSING_BUILDING_ID",
    )
    .await;
}

#[tokio::test]
async fn query_string_is_the_last_fallback() {
    let m = member();
    let uri = format!("/buildings?building_id={}", m.campus.maple_north);
    let req = request(Method::GET, &uri, Some(m.manager))
        .body(Body::empty())
        .unwrap();
    let (status, _, _) = send(module_app(&m.campus), req).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn body_id_is_read_and_restored_for_the_handler() {
    let m = member();
    let payload = serde_json::json!({
        "residence_id": m.campus.north_101,
        "summary": "leaking tap",
    })
    .to_string();

    let req = request(Method::POST, "/maintenance-requests", Some(m.tenant.clone()))
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(payload.clone()))
        .unwrap();
    let (status, _, body) = send(module_app(&m.campus), req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(String::from_utf8(body).unwrap(), payload);

    let payload = serde_json::json!({ "residence_id": m.campus.north_102 }).to_string();
    let req = request(Method::POST, "/maintenance-requests", Some(m.tenant))
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(payload))
        .unwrap();
    expect_problem(
        module_app(&m.campus),
        req,
        StatusCode::FORBIDDEN,
        "RESIDENCE_ACCESS_DENIED",
    )
    .await;
}

#[tokio::test]
async fn non_json_body_is_not_inspected() {
    let m = member();
    let payload = format!("residence_id={}", m.campus.north_101);
    let req = request(Method::POST, "/maintenance-requests", Some(m.tenant))
        .header(CONTENT_TYPE, "text/plain")
        .body(Body::from(payload))
        .unwrap();
    expect_problem(
        module_app(&m.campus),
        req,
        StatusCode::BAD_REQUEST,
        "MISSING_RESIDENCE_ID",
    )
    .await;
}

#[tokio::test]
async fn write_gate_combines_cohort_and_capabilities() {
    let m = member();

    let req = request(Method::POST, "/notices", Some(m.manager.clone()))
        .body(Body::from("{}"))
        .unwrap();
    let (status, _, _) = send(module_app(&m.campus), req).await;
    assert_eq!(status, StatusCode::OK);

    let uri = format!("/notices/{}", Uuid::new_v4());
    let req = request(Method::DELETE, &uri, Some(m.tenant))
        .body(Body::empty())
        .unwrap();
    expect_problem(module_app(&m.campus), req, StatusCode::FORBIDDEN, "WRITE_ACCESS_DENIED").await;

    let open_demo = m.campus.add_organization("Open Demo", true);
    m.campus.join(m.manager.id(), open_demo);
    let req = request(Method::POST, "/notices", Some(m.manager))
        .body(Body::from("{}"))
        .unwrap();
    expect_problem(module_app(&m.campus), req, StatusCode::FORBIDDEN, "WRITE_ACCESS_DENIED").await;
}

#[tokio::test]
async fn demo_roles_cannot_write() {
    let campus = Campus::new();
    let id = campus.principal(Role::DemoManager);
    campus.join(id, campus.maple);
    let req = request(Method::POST, "/notices", Some(Principal::new(id, Role::DemoManager)))
        .body(Body::from("{}"))
        .unwrap();
    expect_problem(module_app(&campus), req, StatusCode::FORBIDDEN, "WRITE_ACCESS_DENIED").await;
}

/// Resolver that cannot reach its store.
struct Unreachable;

#[async_trait]
impl AccessResolverClient for Unreachable {
    async fn accessible_organizations(
        &self,
        _principal_id: PrincipalId,
    ) -> Result<HashSet<OrganizationId>, AccessResolverError> {
        Err(AccessResolverError::unavailable("connection refused"))
    }

    async fn can_access_organization(
        &self,
        _principal_id: PrincipalId,
        _organization_id: OrganizationId,
    ) -> Result<bool, AccessResolverError> {
        Err(AccessResolverError::unavailable("connection refused"))
    }

    async fn can_access_building(
        &self,
        _principal_id: PrincipalId,
        _building_id: BuildingId,
    ) -> Result<bool, AccessResolverError> {
        Err(AccessResolverError::unavailable("connection refused"))
    }

    async fn can_access_residence(
        &self,
        _principal_id: PrincipalId,
        _residence_id: ResidenceId,
    ) -> Result<bool, AccessResolverError> {
        Err(AccessResolverError::unavailable("connection refused"))
    }

    async fn can_perform_write_operation(
        &self,
        _principal_id: PrincipalId,
        _action: Action,
    ) -> Result<bool, AccessResolverError> {
        Err(AccessResolverError::unavailable("connection refused"))
    }
}

#[tokio::test]
async fn resolver_failure_is_a_server_error_not_an_allow() {
    let gate = AccessGate::new(Arc::new(Unreachable), Arc::new(RoleCapabilityPolicy));
    let admin = Principal::new(Uuid::new_v4(), Role::Admin);

    let uri = format!("/buildings/{}", Uuid::new_v4());
    let req = request(Method::GET, &uri, Some(admin.clone()))
        .body(Body::empty())
        .unwrap();
    let problem = expect_problem(
        app(&gate),
        req,
        StatusCode::INTERNAL_SERVER_ERROR,
        "AUTHORIZATION_ERROR",
    )
    .await;
    assert!(!problem.detail.contains("connection refused"));

    let req = request(Method::POST, "/notices", Some(admin))
        .body(Body::from("{}"))
        .unwrap();
    expect_problem(app(&gate), req, StatusCode::INTERNAL_SERVER_ERROR, "AUTHORIZATION_ERROR").await;
}

#[tokio::test]
async fn store_outage_behind_the_local_client_is_a_server_error() {
    let m = member();
    m.campus.store.set_unavailable(true);
    let uri = format!("/organizations/{}", m.campus.maple);
    let req = request(Method::GET, &uri, Some(m.manager))
        .body(Body::empty())
        .unwrap();
    expect_problem(
        module_app(&m.campus),
        req,
        StatusCode::INTERNAL_SERVER_ERROR,
        "AUTHORIZATION_ERROR",
    )
    .await;
}
