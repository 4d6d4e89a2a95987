//! Axum web server with WebSocket streaming for the tree map.

use std::sync::Arc;
use tokio::sync::RwLock;

use axum::{
    extract::{Path, Query, State, ws::{WebSocket, WebSocketUpgrade, Message}},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use greentrace_network::{NetworkSnapshot, NetworkStats, TreeId, TreeRecord};
use greentrace_registry::{
    ContributorScore, Documented, InMemoryService, Receipt, Redemption, RewardItem, SpeciesProfile,
    TokenBalance, CATALOGUE, REWARD_CATALOGUE,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared application state.
pub struct AppState {
    service: RwLock<InMemoryService>,
}

/// Map and dashboard API server.
pub struct VisServer {
    state: Arc<AppState>,
}

impl VisServer {
    /// Create a server around a documentation service.
    pub fn new(service: InMemoryService) -> Self {
        Self {
            state: Arc::new(AppState {
                service: RwLock::new(service),
            }),
        }
    }

    /// Build the router for the server.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/api/status", get(status_handler))
            // Records
            .route("/api/trees", get(list_trees_handler).post(submit_tree_handler))
            .route("/api/trees/{id}", get(get_tree_handler))
            .route("/api/trees/{id}/receipt", get(receipt_handler))
            .route("/api/trees/{id}/verify", post(verify_handler))
            // Map and dashboard
            .route("/api/network", get(network_handler))
            .route("/api/stats", get(stats_handler))
            .route("/api/score/{user}", get(score_handler))
            .route("/api/species", get(species_handler))
            // Tokens
            .route("/api/wallet/{account}", get(wallet_handler))
            .route("/api/rewards", get(rewards_handler))
            .route("/api/rewards/redeem", post(redeem_handler))
            // WebSocket for live map updates
            .route("/ws", get(ws_handler))
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .with_state(self.state.clone())
    }

    /// Run the server on the given address.
    pub async fn serve(self, addr: std::net::SocketAddr) -> Result<(), std::io::Error> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("GreenTrace API running on http://{}", addr);
        axum::serve(listener, self.router()).await
    }
}

/// Registry failures as HTTP responses.
#[derive(Debug)]
pub struct ApiError(greentrace_registry::Error);

impl From<greentrace_registry::Error> for ApiError {
    fn from(e: greentrace_registry::Error) -> Self {
        Self(e)
    }
}

impl From<greentrace_network::Error> for ApiError {
    fn from(e: greentrace_network::Error) -> Self {
        Self(e.into())
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        use greentrace_registry::Error;

        let status = match &self.0 {
            Error::Network(_) | Error::InvalidInput(_) | Error::Classification(_) => {
                StatusCode::BAD_REQUEST
            }
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::DuplicateRecord(_) | Error::InsufficientBalance { .. } => StatusCode::CONFLICT,
        };
        if status != StatusCode::NOT_FOUND {
            tracing::warn!("Request rejected: {}", self.0);
        }
        (status, Json(ErrorBody { error: self.0.to_string() })).into_response()
    }
}

/// Server status response.
#[derive(Serialize)]
struct StatusResponse {
    status: &'static str,
    tree_count: usize,
    max_distance: f64,
}

async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let service = state.service.read().await;
    Json(StatusResponse {
        status: "ok",
        tree_count: service.records().len(),
        max_distance: service.max_distance(),
    })
}

async fn list_trees_handler(State(state): State<Arc<AppState>>) -> Json<Vec<TreeRecord>> {
    let service = state.service.read().await;
    Json(service.records())
}

async fn get_tree_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<TreeRecord>, ApiError> {
    let service = state.service.read().await;
    service
        .record(&TreeId(id.clone()))
        .map(Json)
        .ok_or_else(|| greentrace_registry::Error::NotFound(format!("tree {id}")).into())
}

async fn receipt_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Receipt>, ApiError> {
    let service = state.service.read().await;
    service
        .receipt(&TreeId(id.clone()))
        .map(Json)
        .ok_or_else(|| greentrace_registry::Error::NotFound(format!("receipt {id}")).into())
}

async fn verify_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<TreeRecord>, ApiError> {
    let mut service = state.service.write().await;
    Ok(Json(service.verify(&TreeId(id))?))
}

#[derive(Debug, Deserialize)]
struct SubmitTreeRequest {
    latitude: f64,
    longitude: f64,
    submitted_by: String,
    /// Photo payload, e.g. a base64 data URL. Hashed, not stored.
    image: String,
}

async fn submit_tree_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SubmitTreeRequest>,
) -> Result<(StatusCode, Json<Documented>), ApiError> {
    let mut service = state.service.write().await;
    let documented = service.submit(
        req.image.as_bytes(),
        req.latitude,
        req.longitude,
        &req.submitted_by,
    )?;
    Ok((StatusCode::CREATED, Json(documented)))
}

#[derive(Debug, Default, Deserialize)]
struct NetworkQuery {
    user: Option<String>,
    max_distance: Option<f64>,
}

async fn network_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<NetworkQuery>,
) -> Result<Json<NetworkSnapshot>, ApiError> {
    let service = state.service.read().await;
    Ok(Json(service.network(query.user.as_deref(), query.max_distance)?))
}

#[derive(Debug, Default, Deserialize)]
struct StatsQuery {
    user: Option<String>,
}

async fn stats_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<StatsQuery>,
) -> Json<NetworkStats> {
    let service = state.service.read().await;
    Json(service.stats(query.user.as_deref()))
}

async fn score_handler(
    State(state): State<Arc<AppState>>,
    Path(user): Path<String>,
) -> Json<ContributorScore> {
    let service = state.service.read().await;
    Json(service.score(&user))
}

async fn species_handler() -> Json<&'static [SpeciesProfile]> {
    Json(CATALOGUE)
}

async fn wallet_handler(
    State(state): State<Arc<AppState>>,
    Path(account): Path<String>,
) -> Json<TokenBalance> {
    let service = state.service.read().await;
    Json(service.balance(&account))
}

async fn rewards_handler() -> Json<&'static [RewardItem]> {
    Json(REWARD_CATALOGUE)
}

#[derive(Debug, Deserialize)]
struct RedeemRequest {
    account: String,
    reward_id: String,
}

async fn redeem_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RedeemRequest>,
) -> Result<Json<Redemption>, ApiError> {
    let mut service = state.service.write().await;
    Ok(Json(service.redeem(&req.account, &req.reward_id)?))
}

async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws(socket, state))
}

async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
    // Send the anonymous network view on connect
    let initial = handle_ws_command(&state, WsCommand::GetNetwork { user: None, max_distance: None }).await;
    if let Ok(json) = serde_json::to_string(&initial) {
        let _ = socket.send(Message::Text(json.into())).await;
    }

    while let Some(Ok(msg)) = socket.recv().await {
        match msg {
            Message::Text(text) => {
                let response = match serde_json::from_str::<WsCommand>(&text) {
                    Ok(cmd) => handle_ws_command(&state, cmd).await,
                    Err(e) => WsResponse::Error { message: e.to_string() },
                };
                if let Ok(json) = serde_json::to_string(&response) {
                    let _ = socket.send(Message::Text(json.into())).await;
                }
            }
            Message::Close(_) => break,
            _ => {}
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum WsCommand {
    GetNetwork {
        #[serde(default)]
        user: Option<String>,
        #[serde(default)]
        max_distance: Option<f64>,
    },
    GetStats {
        #[serde(default)]
        user: Option<String>,
    },
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum WsResponse {
    Network(NetworkSnapshot),
    Stats(NetworkStats),
    Error { message: String },
}

async fn handle_ws_command(state: &Arc<AppState>, cmd: WsCommand) -> WsResponse {
    let service = state.service.read().await;
    match cmd {
        WsCommand::GetNetwork { user, max_distance } => {
            match service.network(user.as_deref(), max_distance) {
                Ok(snapshot) => WsResponse::Network(snapshot),
                Err(e) => WsResponse::Error { message: e.to_string() },
            }
        }
        WsCommand::GetStats { user } => WsResponse::Stats(service.stats(user.as_deref())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use greentrace_registry::{
        CatalogueClassifier, DocumentationService, InMemoryLedger, InMemoryRepository,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn server() -> VisServer {
        let service = DocumentationService::new(
            InMemoryRepository::new(),
            CatalogueClassifier::seeded(42),
            InMemoryLedger::new(),
        )
        .with_community_seed()
        .unwrap();
        VisServer::new(service)
    }

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn status_reports_seed() {
        let (status, body) = send(server().router(), get("/api/status")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["tree_count"], 6);
        assert_eq!(body["max_distance"], 0.005);
    }

    #[tokio::test]
    async fn network_snapshot_for_seed() {
        let (status, body) = send(server().router(), get("/api/network")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_connections"], 15);
        assert_eq!(body["markers"].as_array().unwrap().len(), 6);
        assert_eq!(body["markers"][2]["kind"], "at_risk");
    }

    #[tokio::test]
    async fn network_rejects_negative_threshold() {
        let (status, body) = send(server().router(), get("/api/network?max_distance=-1")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("threshold"));
    }

    #[tokio::test]
    async fn submit_then_query_as_user() {
        let server = server();

        let (status, body) = send(
            server.router(),
            post_json(
                "/api/trees",
                json!({
                    "latitude": -1.2922,
                    "longitude": 36.7854,
                    "submitted_by": "alice",
                    "image": "data:image/jpeg;base64,AAAA"
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["record"]["submitted_by"], "alice");
        assert_eq!(body["record"]["verified"], false);
        let id = body["record"]["id"].as_str().unwrap().to_string();

        let (status, _) = send(server.router(), get(&format!("/api/trees/{id}"))).await;
        assert_eq!(status, StatusCode::OK);

        let (_, network) = send(server.router(), get("/api/network?user=alice")).await;
        assert_eq!(network["user_connections"], 6);

        let (_, stats) = send(server.router(), get("/api/stats?user=alice")).await;
        assert_eq!(stats["total_trees"], 7);
        assert_eq!(stats["user_contributions"], 1);

        let (_, wallet) = send(server.router(), get("/api/wallet/alice")).await;
        assert_eq!(wallet["total_submissions"], 1);

        let (_, score) = send(server.router(), get("/api/score/alice")).await;
        assert_eq!(score["badge"], "new_mapper");
    }

    #[tokio::test]
    async fn submit_rejects_bad_coordinates() {
        let (status, _) = send(
            server().router(),
            post_json(
                "/api/trees",
                json!({ "latitude": 123.0, "longitude": 0.0, "submitted_by": "alice", "image": "x" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_tree_is_not_found() {
        let (status, _) = send(server().router(), get("/api/trees/missing")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn redeem_without_tokens_conflicts() {
        let (status, body) = send(
            server().router(),
            post_json("/api/rewards/redeem", json!({ "account": "bob", "reward_id": "airtime-50" })),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert!(body["error"].as_str().unwrap().contains("Insufficient"));

        let (status, _) = send(
            server().router(),
            post_json("/api/rewards/redeem", json!({ "account": "bob", "reward_id": "yacht" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn catalogues_are_listed() {
        let (_, rewards) = send(server().router(), get("/api/rewards")).await;
        assert_eq!(rewards.as_array().unwrap().len(), REWARD_CATALOGUE.len());

        let (_, species) = send(server().router(), get("/api/species")).await;
        assert_eq!(species.as_array().unwrap().len(), CATALOGUE.len());
    }

    #[tokio::test]
    async fn ws_commands() {
        let server = server();

        let response = handle_ws_command(&server.state, WsCommand::GetStats { user: None }).await;
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["type"], "stats");
        assert_eq!(json["total_trees"], 6);

        let cmd: WsCommand = serde_json::from_str(r#"{"type":"get_network","max_distance":-1}"#).unwrap();
        let json = serde_json::to_value(handle_ws_command(&server.state, cmd).await).unwrap();
        assert_eq!(json["type"], "error");
    }

    #[tokio::test]
    async fn seed_receipt_is_served() {
        let (status, body) = send(server().router(), get("/api/trees/3/receipt")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["block_number"], 18_456_791);
        assert_eq!(body["verified"], true);
        assert!(body["transaction_hash"].as_str().unwrap().starts_with("0x"));

        let (status, _) = send(server().router(), get("/api/trees/missing/receipt")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn verify_flips_record_and_receipt() {
        let server = server();
        let (_, body) = send(
            server.router(),
            post_json(
                "/api/trees",
                json!({ "latitude": 0.0, "longitude": 0.0, "submitted_by": "alice", "image": "x" }),
            ),
        )
        .await;
        let id = body["record"]["id"].as_str().unwrap().to_string();

        let request = Request::builder()
            .method("POST")
            .uri(format!("/api/trees/{id}/verify"))
            .body(Body::empty())
            .unwrap();
        let (status, record) = send(server.router(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(record["verified"], true);

        let (_, record) = send(server.router(), get(&format!("/api/trees/{id}"))).await;
        let (_, receipt) = send(server.router(), get(&format!("/api/trees/{id}/receipt"))).await;
        assert_eq!(record["verified"], true);
        assert_eq!(receipt["verified"], true);
    }
}
