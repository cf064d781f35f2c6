use axum::{
    Json, Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{delete, get, post},
};
use gapchin::config::CONFIG;
use gapchin::error::GapchinError;
use gapchin::models::{AppLog, Expense, Participant, SettlementResult};
use gapchin::service::GapchinService;
use gapchin::{InMemoryCache, InMemoryLogging, InMemoryStorage, TemplateSummary};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

type AppService = GapchinService<InMemoryLogging, InMemoryStorage, InMemoryCache, TemplateSummary>;

// Request structs for JSON payloads
#[derive(Deserialize)]
struct AddParticipantRequest {
    name: String,
}

#[derive(Deserialize)]
struct LinkPayerRequest {
    linked_payer_id: Option<String>,
}

#[derive(Deserialize)]
struct SetBirthdayRequest {
    is_birthday: bool,
}

#[derive(Deserialize)]
struct AddExpenseRequest {
    title: String,
    amount: f64,
    payer_id: String,
    involved_user_ids: Option<Vec<String>>,
}

#[derive(Serialize)]
struct SummaryResponse {
    message: String,
}

// Error response struct
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

// Newtype wrapper for GapchinError to implement IntoResponse
struct ApiError(GapchinError);

impl From<GapchinError> for ApiError {
    fn from(err: GapchinError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.0 {
            GapchinError::ParticipantNotFound(_) | GapchinError::ExpenseNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            GapchinError::SelfLink(_)
            | GapchinError::HasDependents(_)
            | GapchinError::InvalidInput(_, _) => StatusCode::BAD_REQUEST,
            GapchinError::LinkedPayerUnavailable(_) => StatusCode::CONFLICT,
            GapchinError::InternalServerError(_)
            | GapchinError::StorageError(_)
            | GapchinError::LoggingError(_)
            | GapchinError::CacheError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(ErrorResponse {
            error: self.0.to_string(),
        });
        (status, body).into_response()
    }
}

async fn add_participant(
    State(service): State<Arc<AppService>>,
    Json(req): Json<AddParticipantRequest>,
) -> Result<(StatusCode, Json<Participant>), ApiError> {
    let participant = service.add_participant(req.name).await?;
    Ok((StatusCode::CREATED, Json(participant)))
}

async fn list_participants(
    State(service): State<Arc<AppService>>,
) -> Result<Json<Vec<Participant>>, ApiError> {
    let participants = service.list_participants().await?;
    Ok(Json(participants))
}

async fn get_participant(
    State(service): State<Arc<AppService>>,
    Path(participant_id): Path<String>,
) -> Result<Json<Participant>, ApiError> {
    let participant = service
        .get_participant(&participant_id)
        .await?
        .ok_or_else(|| GapchinError::ParticipantNotFound(participant_id))?;
    Ok(Json(participant))
}

async fn remove_participant(
    State(service): State<Arc<AppService>>,
    Path(participant_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    service.remove_participant(&participant_id).await?;
    Ok(StatusCode::OK)
}

async fn set_linked_payer(
    State(service): State<Arc<AppService>>,
    Path(participant_id): Path<String>,
    Json(req): Json<LinkPayerRequest>,
) -> Result<Json<Participant>, ApiError> {
    let participant = service
        .set_linked_payer(&participant_id, req.linked_payer_id)
        .await?;
    Ok(Json(participant))
}

async fn set_birthday(
    State(service): State<Arc<AppService>>,
    Path(participant_id): Path<String>,
    Json(req): Json<SetBirthdayRequest>,
) -> Result<Json<Participant>, ApiError> {
    let participant = service.set_birthday(&participant_id, req.is_birthday).await?;
    Ok(Json(participant))
}

async fn add_expense(
    State(service): State<Arc<AppService>>,
    Json(req): Json<AddExpenseRequest>,
) -> Result<(StatusCode, Json<Expense>), ApiError> {
    let expense = service
        .add_expense(req.title, req.amount, &req.payer_id, req.involved_user_ids)
        .await?;
    Ok((StatusCode::CREATED, Json(expense)))
}

async fn list_expenses(
    State(service): State<Arc<AppService>>,
) -> Result<Json<Vec<Expense>>, ApiError> {
    let expenses = service.list_expenses().await?;
    Ok(Json(expenses))
}

async fn remove_expense(
    State(service): State<Arc<AppService>>,
    Path(expense_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    service.remove_expense(&expense_id).await?;
    Ok(StatusCode::OK)
}

async fn get_settlement(
    State(service): State<Arc<AppService>>,
) -> Result<Json<SettlementResult>, ApiError> {
    let result = service.get_settlement().await?;
    Ok(Json(result))
}

async fn generate_summary(
    State(service): State<Arc<AppService>>,
) -> Result<Json<SummaryResponse>, ApiError> {
    let message = service.generate_summary().await?;
    Ok(Json(SummaryResponse { message }))
}

async fn get_app_logs(
    State(service): State<Arc<AppService>>,
) -> Result<Json<Vec<AppLog>>, ApiError> {
    let logs = service.get_app_logs().await?;
    Ok(Json(logs))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(CONFIG.log_level.as_str())
        .init();

    if CONFIG.summary_api_key.is_none() {
        info!("No summary credential configured, using the built-in template");
    }

    // Initialize storage, logging, cache and the summary fallback
    let service = Arc::new(GapchinService::new(
        InMemoryStorage::new(),
        InMemoryLogging::new(),
        InMemoryCache::new(),
        TemplateSummary::new(),
    ));

    // Define API routes
    let app = Router::new()
        // add / route with a simple health check
        .route("/", get(|| async { "OK" }))
        .route("/participants", post(add_participant).get(list_participants))
        .route(
            "/participants/{participant_id}",
            get(get_participant).delete(remove_participant),
        )
        .route("/participants/{participant_id}/link", post(set_linked_payer))
        .route("/participants/{participant_id}/birthday", post(set_birthday))
        .route("/expenses", post(add_expense).get(list_expenses))
        .route("/expenses/{expense_id}", delete(remove_expense))
        .route("/settlement", get(get_settlement))
        .route("/summary", get(generate_summary))
        .route("/logs", get(get_app_logs))
        .layer(CompressionLayer::new()) // Gzip compression
        .layer(TimeoutLayer::new(Duration::from_secs(30))) // 30-second timeout
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([http::Method::GET, http::Method::POST, http::Method::DELETE])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(TraceLayer::new_for_http()) // Request tracing
        .with_state(service);

    // Start server
    let addr = SocketAddr::from(([127, 0, 0, 1], CONFIG.port));
    info!("Server running at http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
