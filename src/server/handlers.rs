use super::types::{ErrorResponse, ServiceInfo};
use crate::{Error, Result, pipeline::InferenceService};
use axum::{
    body::Bytes,
    extract::{
        Multipart, State,
        multipart::MultipartRejection,
        rejection::JsonRejection,
    },
    http::StatusCode,
    response::Json,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

pub type Catalog = Arc<Vec<ServiceInfo>>;

type ErrorReply = (StatusCode, Json<ErrorResponse>);

fn reject(service: &str, request_id: &Uuid, err: Error) -> ErrorReply {
    let status = if err.is_client_error() {
        warn!("[{}] Rejected request for {}: {}", request_id, service, err);
        StatusCode::BAD_REQUEST
    } else {
        error!("[{}] Prediction failed for {}: {}", request_id, service, err);
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (status, Json(ErrorResponse::from(&err)))
}

/// Runs CPU-bound pipeline work off the async executor.
async fn run_blocking<F>(work: F) -> Result<Value>
where
    F: FnOnce() -> Result<Value> + Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| Error::internal(format!("prediction worker failed: {}", e)))?
}

pub async fn home(State(catalog): State<Catalog>) -> String {
    let names: Vec<&str> = catalog.iter().map(|s| s.name.as_str()).collect();
    format!(
        "Welcome to the tabular prediction API! Services: {}",
        names.join(", ")
    )
}

pub async fn models(State(catalog): State<Catalog>) -> Json<Vec<ServiceInfo>> {
    Json(catalog.as_ref().clone())
}

pub async fn predict_single(
    State(service): State<Arc<InferenceService>>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> std::result::Result<Json<Value>, ErrorReply> {
    let request_id = Uuid::new_v4();
    info!(
        "[{}] Received single prediction request for {}",
        request_id,
        service.name()
    );

    let Json(payload) = payload
        .map_err(|e| reject(service.name(), &request_id, Error::malformed(e.body_text())))?;

    let worker = Arc::clone(&service);
    match run_blocking(move || worker.predict_single(&payload)).await {
        Ok(body) => {
            info!("[{}] Single prediction served by {}", request_id, service.name());
            Ok(Json(body))
        }
        Err(e) => Err(reject(service.name(), &request_id, e)),
    }
}

pub async fn predict_batch(
    State(service): State<Arc<InferenceService>>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> std::result::Result<Json<Value>, ErrorReply> {
    let request_id = Uuid::new_v4();
    info!(
        "[{}] Received batch prediction request for {}",
        request_id,
        service.name()
    );

    let mut multipart = multipart
        .map_err(|e| reject(service.name(), &request_id, Error::malformed(e.body_text())))?;
    let upload = read_upload(&mut multipart, &service.config().upload_field)
        .await
        .map_err(|e| reject(service.name(), &request_id, e))?;

    info!(
        "[{}] Uploaded file for {} is {} bytes",
        request_id,
        service.name(),
        upload.len()
    );

    let worker = Arc::clone(&service);
    match run_blocking(move || worker.predict_batch(&upload)).await {
        Ok(body) => {
            info!("[{}] Batch prediction served by {}", request_id, service.name());
            Ok(Json(body))
        }
        Err(e) => Err(reject(service.name(), &request_id, e)),
    }
}

async fn read_upload(multipart: &mut Multipart, field_name: &str) -> Result<Bytes> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::malformed(e.body_text()))?
    {
        if field.name() == Some(field_name) {
            return field
                .bytes()
                .await
                .map_err(|e| Error::malformed(e.body_text()));
        }
    }

    Err(Error::MissingFile {
        field: field_name.to_string(),
    })
}
