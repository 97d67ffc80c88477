//! HTTP request handlers for the Sakhi content API
//!
//! Creation endpoints validate payloads, hand them to the verification
//! workflow, and return the pending record immediately; the caller polls the
//! record to observe the verdict. Only approved records are publicly listed.

use crate::auth::AuthUser;
use crate::session::{Role, SessionManager};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, patch, post},
    Router,
};
use sakhi_domain::traits::{ContentQuery, ContentStore, FeedbackStore, UpdateOutcome};
use sakhi_domain::{
    ContentBody, ContentKind, ContentRecord, ContentStatus, FeedbackDraft, FeedbackRecord,
    LocalizedText, RecordId,
};
use sakhi_store::{SqliteContentStore, StoreError};
use sakhi_workflow::VerificationWorkflow;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Content and feedback store
    pub store: Arc<SqliteContentStore>,
    /// Creation + background verification workflow
    pub workflow: VerificationWorkflow<SqliteContentStore>,
    /// Session manager for JWT token operations
    pub sessions: Arc<SessionManager>,
}

/// Error response envelope
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Application error type, mapped onto HTTP status codes
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Malformed or incomplete payload
    #[error("{0}")]
    Validation(String),

    /// Missing or invalid credentials
    #[error("{0}")]
    Unauthorized(String),

    /// Authenticated but not allowed
    #[error("{0}")]
    Forbidden(String),

    /// No such record
    #[error("Not found")]
    NotFound,

    /// Uniqueness constraint violated
    #[error("Content with this title already exists: {0}")]
    Duplicate(String),

    /// Storage failure
    #[error("Storage error: {0}")]
    Store(String),

    /// Anything else
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Duplicate(_) => StatusCode::CONFLICT,
            ApiError::Store(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Duplicate(title) => ApiError::Duplicate(title),
            other => ApiError::Store(other.to_string()),
        }
    }
}

/// Content record as returned by the API
#[derive(Debug, Serialize)]
pub struct ContentResponse {
    /// Record identifier
    pub id: RecordId,

    /// Kind tag plus the type-specific fields
    #[serde(flatten)]
    pub body: ContentBody,

    /// Publication status
    pub status: ContentStatus,

    /// Verification result tag
    pub ai_verification_result: String,

    /// Verification notes
    pub ai_verification_notes: String,

    /// Authoring principal
    pub created_by: String,

    /// Creation time (Unix epoch seconds)
    pub created_at: u64,

    /// Last update time (Unix epoch seconds)
    pub updated_at: u64,
}

impl From<ContentRecord> for ContentResponse {
    fn from(record: ContentRecord) -> Self {
        Self {
            id: record.id,
            status: record.status,
            ai_verification_result: record.verification.result_str().to_string(),
            ai_verification_notes: record.verification.notes().to_string(),
            body: record.body,
            created_by: record.created_by,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// Session establishment request
#[derive(Debug, Deserialize)]
pub struct SessionRequest {
    /// Principal identifier
    pub user_id: String,

    /// Requested role (defaults to `user`)
    #[serde(default = "default_role")]
    pub role: Role,
}

fn default_role() -> Role {
    Role::User
}

/// Session establishment response
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    /// Bearer token for subsequent requests
    pub token: String,

    /// Token lifetime in seconds
    pub expires_in: u64,
}

/// Law creation request
#[derive(Debug, Deserialize)]
pub struct CreateLawRequest {
    /// Short title of the law, both languages
    pub title: LocalizedText,

    /// Full description, both languages
    pub description: LocalizedText,
}

/// Scheme creation request
#[derive(Debug, Deserialize)]
pub struct CreateSchemeRequest {
    /// Official scheme name, both languages
    pub name: LocalizedText,

    /// Eligibility criteria, both languages
    pub eligibility: LocalizedText,

    /// Benefits, both languages
    pub benefits: LocalizedText,
}

/// Listing query parameters
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    /// Status filter (admins only; everyone else sees approved records)
    pub status: Option<String>,
}

/// Manual review request
#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    /// The decision to apply
    pub action: ReviewAction,
}

/// Manual review decision
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewAction {
    /// Publish the record
    Approve,

    /// Withdraw the record
    Reject,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall health status
    pub status: String,

    /// Number of stored content records
    pub content_count: usize,
}

/// POST /auth/session - Issue a session token
async fn establish_session(
    State(state): State<AppState>,
    Json(request): Json<SessionRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    if request.user_id.trim().is_empty() {
        return Err(ApiError::Validation("user_id must not be empty".to_string()));
    }

    let token = state
        .sessions
        .generate_token(&request.user_id, request.role)
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok(Json(SessionResponse {
        token,
        expires_in: state.sessions.token_expiry_secs(),
    }))
}

/// POST /laws - Create a law entry and schedule its verification
async fn create_law(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<CreateLawRequest>,
) -> Result<(StatusCode, Json<ContentResponse>), ApiError> {
    let body = ContentBody::Law {
        title: request.title,
        description: request.description,
    };
    submit_content(&state, &user, body).await
}

/// POST /schemes - Create a scheme entry and schedule its verification
async fn create_scheme(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<CreateSchemeRequest>,
) -> Result<(StatusCode, Json<ContentResponse>), ApiError> {
    let body = ContentBody::Scheme {
        name: request.name,
        eligibility: request.eligibility,
        benefits: request.benefits,
    };
    submit_content(&state, &user, body).await
}

/// Shared creation path: validate, submit, return the pending record
///
/// Validation happens here, before the workflow is invoked; the workflow
/// itself never sees incomplete payloads.
async fn submit_content(
    state: &AppState,
    user: &AuthUser,
    body: ContentBody,
) -> Result<(StatusCode, Json<ContentResponse>), ApiError> {
    if !body.is_complete() {
        return Err(ApiError::Validation(
            "All text fields are required in both languages".to_string(),
        ));
    }

    let record = state.workflow.submit(body, user.user_id.clone())?;
    Ok((StatusCode::CREATED, Json(record.into())))
}

/// GET /laws - List law entries
async fn list_laws(
    State(state): State<AppState>,
    user: Option<AuthUser>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<ContentResponse>>, ApiError> {
    list_content(&state, user.as_ref(), &params, ContentKind::Law)
}

/// GET /schemes - List scheme entries
async fn list_schemes(
    State(state): State<AppState>,
    user: Option<AuthUser>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<ContentResponse>>, ApiError> {
    list_content(&state, user.as_ref(), &params, ContentKind::Scheme)
}

fn list_content(
    state: &AppState,
    user: Option<&AuthUser>,
    params: &ListParams,
    kind: ContentKind,
) -> Result<Json<Vec<ContentResponse>>, ApiError> {
    // Public callers always see approved records only; the status filter is
    // an admin affordance.
    let status = match (&params.status, user) {
        (Some(s), Some(u)) if u.is_admin() => Some(
            ContentStatus::from_str(s).map_err(ApiError::Validation)?,
        ),
        _ => Some(ContentStatus::Approved),
    };

    let records = state.store.query(&ContentQuery {
        kind: Some(kind),
        status,
        ..Default::default()
    })?;

    Ok(Json(records.into_iter().map(Into::into).collect()))
}

fn parse_record_id(raw: &str) -> Result<RecordId, ApiError> {
    RecordId::from_string(raw).map_err(ApiError::Validation)
}

/// GET /content/{id} - Fetch one record
///
/// Approved records are public. Anything else is visible only to its author
/// and to admins (the author polls this endpoint to observe the verdict);
/// everyone else gets 404 so unpublished records are not discoverable.
async fn get_content(
    State(state): State<AppState>,
    user: Option<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<ContentResponse>, ApiError> {
    let id = parse_record_id(&id)?;
    let record = state.store.find_by_id(id)?.ok_or(ApiError::NotFound)?;

    let visible = record.status == ContentStatus::Approved
        || user
            .as_ref()
            .map(|u| u.is_admin() || u.user_id == record.created_by)
            .unwrap_or(false);

    if !visible {
        return Err(ApiError::NotFound);
    }

    Ok(Json(record.into()))
}

/// PATCH /content/{id}/review - Manual administrative approve/reject
///
/// Allowed at any time, including while verification is in flight; whichever
/// write lands last wins (no version token by design).
async fn review_content(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(request): Json<ReviewRequest>,
) -> Result<Json<ContentResponse>, ApiError> {
    user.require_admin()?;
    let id = parse_record_id(&id)?;

    let status = match request.action {
        ReviewAction::Approve => ContentStatus::Approved,
        ReviewAction::Reject => ContentStatus::Rejected,
    };

    match state.store.set_status(id, status)? {
        UpdateOutcome::Updated(record) => Ok(Json(record.into())),
        UpdateOutcome::NotFound => Err(ApiError::NotFound),
    }
}

/// DELETE /content/{id} - Remove a record
///
/// Permitted at any time, including mid-verification; the orphaned
/// verification task discards its verdict.
async fn delete_content(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    user.require_admin()?;
    let id = parse_record_id(&id)?;

    if state.store.delete_by_id(id)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}

/// POST /feedback - Submit a feedback entry (no authentication required)
async fn submit_feedback(
    State(state): State<AppState>,
    Json(draft): Json<FeedbackDraft>,
) -> Result<(StatusCode, Json<FeedbackRecord>), ApiError> {
    if draft.subject.trim().is_empty() || draft.message.trim().is_empty() {
        return Err(ApiError::Validation(
            "Feedback subject and message must not be empty".to_string(),
        ));
    }

    let record = state.store.create_feedback(draft)?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /feedback - List feedback entries
async fn list_feedback(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<FeedbackRecord>>, ApiError> {
    user.require_admin()?;
    Ok(Json(state.store.list_feedback()?))
}

/// DELETE /feedback/{id} - Remove a feedback entry
async fn delete_feedback(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    user.require_admin()?;
    let id = parse_record_id(&id)?;

    if state.store.delete_feedback(id)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}

/// GET /health - Liveness and store reachability
async fn health_check(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    let records = state.store.query(&ContentQuery::default())?;

    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        content_count: records.len(),
    }))
}

/// Create the axum router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/auth/session", post(establish_session))
        .route("/laws", post(create_law).get(list_laws))
        .route("/schemes", post(create_scheme).get(list_schemes))
        .route("/content/:id", get(get_content).delete(delete_content))
        .route("/content/:id/review", patch(review_content))
        .route("/feedback", post(submit_feedback).get(list_feedback))
        .route("/feedback/:id", axum::routing::delete(delete_feedback))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use sakhi_domain::traits::VerificationOracle;
    use sakhi_oracle::MockOracle;
    use serde_json::{json, Value};
    use std::time::Duration;
    use tower::ServiceExt; // for oneshot

    fn create_test_state(oracle: Arc<MockOracle>) -> AppState {
        let store = Arc::new(SqliteContentStore::new(":memory:").unwrap());
        let workflow = VerificationWorkflow::new(
            Arc::clone(&store),
            oracle as Arc<dyn VerificationOracle>,
        );
        let sessions = Arc::new(SessionManager::new("test-secret", 3600));

        AppState {
            store,
            workflow,
            sessions,
        }
    }

    fn bearer(state: &AppState, user_id: &str, role: Role) -> String {
        format!(
            "Bearer {}",
            state.sessions.generate_token(user_id, role).unwrap()
        )
    }

    fn law_payload(title: &str) -> Value {
        json!({
            "title": { "en": title, "hi": format!("{} (hi)", title) },
            "description": { "en": "Description", "hi": "विवरण" }
        })
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn post_json(uri: &str, auth: Option<&str>, body: &Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json");
        if let Some(auth) = auth {
            builder = builder.header("authorization", auth);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn get_req(uri: &str, auth: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(auth) = auth {
            builder = builder.header("authorization", auth);
        }
        builder.body(Body::empty()).unwrap()
    }

    /// Poll until the record with the given id leaves AiVerifying
    async fn wait_for_terminal(state: &AppState, id: &str) {
        let id = RecordId::from_string(id).unwrap();
        for _ in 0..500 {
            if let Some(record) = state.store.find_by_id(id).unwrap() {
                if record.is_terminal() {
                    return;
                }
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("record never reached a terminal state");
    }

    #[tokio::test]
    async fn test_health_check() {
        let state = create_test_state(Arc::new(MockOracle::new()));
        let app = create_router(state);

        let (status, body) = send(&app, get_req("/health", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["content_count"], 0);
    }

    #[tokio::test]
    async fn test_establish_session() {
        let state = create_test_state(Arc::new(MockOracle::new()));
        let app = create_router(state);

        let (status, body) = send(
            &app,
            post_json(
                "/auth/session",
                None,
                &json!({ "user_id": "user-1", "role": "admin" }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["token"].as_str().unwrap().len() > 20);
        assert_eq!(body["expires_in"], 3600);
    }

    #[tokio::test]
    async fn test_create_law_requires_auth() {
        let state = create_test_state(Arc::new(MockOracle::new()));
        let app = create_router(state);

        let (status, _) = send(&app, post_json("/laws", None, &law_payload("Some Act"))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_create_law_returns_pending_record() {
        let oracle = Arc::new(MockOracle::new());
        let gate = oracle.hold("Some Act");
        let state = create_test_state(oracle);
        let app = create_router(state.clone());
        let auth = bearer(&state, "author-1", Role::User);

        let (status, body) = send(
            &app,
            post_json("/laws", Some(&auth), &law_payload("Some Act")),
        )
        .await;

        // The response must arrive while verification is still held open.
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["kind"], "law");
        assert_eq!(body["status"], "ai_verifying");
        assert_eq!(body["ai_verification_result"], "pending");
        assert_eq!(body["ai_verification_notes"], "Verification in progress");
        assert_eq!(body["created_by"], "author-1");

        gate.notify_one();
        wait_for_terminal(&state, body["id"].as_str().unwrap()).await;
    }

    #[tokio::test]
    async fn test_create_law_validates_both_languages() {
        let state = create_test_state(Arc::new(MockOracle::new()));
        let app = create_router(state.clone());
        let auth = bearer(&state, "author-1", Role::User);

        let payload = json!({
            "title": { "en": "Some Act", "hi": "  " },
            "description": { "en": "Description", "hi": "विवरण" }
        });

        let (status, body) = send(&app, post_json("/laws", Some(&auth), &payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("both languages"));
    }

    #[tokio::test]
    async fn test_duplicate_title_conflicts() {
        let state = create_test_state(Arc::new(MockOracle::new()));
        let app = create_router(state.clone());
        let auth = bearer(&state, "author-1", Role::User);

        let (status, body) = send(
            &app,
            post_json("/laws", Some(&auth), &law_payload("Same Act")),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        wait_for_terminal(&state, body["id"].as_str().unwrap()).await;

        let (status, _) = send(
            &app,
            post_json("/laws", Some(&auth), &law_payload("Same Act")),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_public_listing_shows_only_approved() {
        let oracle = Arc::new(MockOracle::new());
        oracle.script_verdict("Good Act", true, "ok");
        oracle.script_verdict("Bad Act", false, "no");
        let state = create_test_state(oracle);
        let app = create_router(state.clone());
        let auth = bearer(&state, "author-1", Role::User);

        for title in ["Good Act", "Bad Act"] {
            let (status, body) =
                send(&app, post_json("/laws", Some(&auth), &law_payload(title))).await;
            assert_eq!(status, StatusCode::CREATED);
            wait_for_terminal(&state, body["id"].as_str().unwrap()).await;
        }

        // Anonymous listing: approved only
        let (status, body) = send(&app, get_req("/laws", None)).await;
        assert_eq!(status, StatusCode::OK);
        let listed = body.as_array().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0]["title"]["en"], "Good Act");

        // Status filter is ignored for non-admins
        let (_, body) = send(&app, get_req("/laws?status=rejected", Some(&auth))).await;
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["title"]["en"], "Good Act");

        // Admins may filter by any status
        let admin = bearer(&state, "admin-1", Role::Admin);
        let (_, body) = send(&app, get_req("/laws?status=rejected", Some(&admin))).await;
        let listed = body.as_array().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0]["title"]["en"], "Bad Act");
    }

    #[tokio::test]
    async fn test_get_content_visibility() {
        let oracle = Arc::new(MockOracle::new());
        oracle.script_verdict("Hidden Act", false, "no");
        let state = create_test_state(oracle);
        let app = create_router(state.clone());
        let author = bearer(&state, "author-1", Role::User);

        let (_, body) = send(
            &app,
            post_json("/laws", Some(&author), &law_payload("Hidden Act")),
        )
        .await;
        let id = body["id"].as_str().unwrap().to_string();
        wait_for_terminal(&state, &id).await;
        let uri = format!("/content/{}", id);

        // Anonymous: rejected records are not discoverable
        let (status, _) = send(&app, get_req(&uri, None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        // Another user: same
        let other = bearer(&state, "someone-else", Role::User);
        let (status, _) = send(&app, get_req(&uri, Some(&other))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        // The author polls and sees the verdict
        let (status, body) = send(&app, get_req(&uri, Some(&author))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "rejected");
        assert_eq!(body["ai_verification_result"], "not_verified");

        // Admins see everything
        let admin = bearer(&state, "admin-1", Role::Admin);
        let (status, _) = send(&app, get_req(&uri, Some(&admin))).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_manual_review() {
        let oracle = Arc::new(MockOracle::new());
        oracle.script_verdict("Borderline Act", false, "unsure");
        let state = create_test_state(oracle);
        let app = create_router(state.clone());
        let author = bearer(&state, "author-1", Role::User);
        let admin = bearer(&state, "admin-1", Role::Admin);

        let (_, body) = send(
            &app,
            post_json("/laws", Some(&author), &law_payload("Borderline Act")),
        )
        .await;
        let id = body["id"].as_str().unwrap().to_string();
        wait_for_terminal(&state, &id).await;
        let uri = format!("/content/{}/review", id);

        // Non-admin review is forbidden
        let request = Request::builder()
            .method("PATCH")
            .uri(&uri)
            .header("content-type", "application/json")
            .header("authorization", &author)
            .body(Body::from(json!({ "action": "approve" }).to_string()))
            .unwrap();
        let (status, _) = send(&app, request).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        // Admin overrides the verdict; the verification result is untouched
        let request = Request::builder()
            .method("PATCH")
            .uri(&uri)
            .header("content-type", "application/json")
            .header("authorization", &admin)
            .body(Body::from(json!({ "action": "approve" }).to_string()))
            .unwrap();
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "approved");
        assert_eq!(body["ai_verification_result"], "not_verified");

        // Unknown records 404
        let request = Request::builder()
            .method("PATCH")
            .uri(format!("/content/{}/review", RecordId::new()))
            .header("content-type", "application/json")
            .header("authorization", &admin)
            .body(Body::from(json!({ "action": "reject" }).to_string()))
            .unwrap();
        let (status, _) = send(&app, request).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_content() {
        let state = create_test_state(Arc::new(MockOracle::new()));
        let app = create_router(state.clone());
        let author = bearer(&state, "author-1", Role::User);
        let admin = bearer(&state, "admin-1", Role::Admin);

        let (_, body) = send(
            &app,
            post_json("/laws", Some(&author), &law_payload("Short-lived Act")),
        )
        .await;
        let id = body["id"].as_str().unwrap().to_string();
        let uri = format!("/content/{}", id);

        let request = Request::builder()
            .method("DELETE")
            .uri(&uri)
            .header("authorization", &admin)
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(&app, request).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        // Second delete 404s
        let request = Request::builder()
            .method("DELETE")
            .uri(&uri)
            .header("authorization", &admin)
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(&app, request).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_feedback_cycle() {
        let state = create_test_state(Arc::new(MockOracle::new()));
        let app = create_router(state.clone());
        let admin = bearer(&state, "admin-1", Role::Admin);

        // Anyone may submit feedback
        let (status, body) = send(
            &app,
            post_json(
                "/feedback",
                None,
                &json!({ "subject": "Broken link", "message": "Schemes page 404s" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = body["id"].as_str().unwrap().to_string();

        // Empty feedback is rejected
        let (status, _) = send(
            &app,
            post_json("/feedback", None, &json!({ "subject": " ", "message": "" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        // Listing requires admin
        let (status, _) = send(&app, get_req("/feedback", None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, body) = send(&app, get_req("/feedback", Some(&admin))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);

        let request = Request::builder()
            .method("DELETE")
            .uri(format!("/feedback/{}", id))
            .header("authorization", &admin)
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(&app, request).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }
}
