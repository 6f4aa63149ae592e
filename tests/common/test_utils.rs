use super::mocks::MockModel;
use axum::{
    Router,
    body::Body,
    http::{Request, Response},
};
use serde_json::{Value, json};
use std::{collections::BTreeMap, sync::Arc};
use tabserve::{
    config::{OutputConfig, ServiceConfig, TaskKind},
    pipeline::{BatchShape, InferenceService},
    schema::{FeatureKind, FeatureSchema, FeatureSpec},
    server,
};

pub const BOUNDARY: &str = "tabserve-test-boundary";

pub fn manifest_path(relative: &str) -> String {
    format!("{}/{}", env!("CARGO_MANIFEST_DIR"), relative)
}

/// Churn classifier service shaped like the legacy churn API
pub fn churn_service_config() -> ServiceConfig {
    ServiceConfig {
        name: "customer-churn".to_string(),
        model_path: manifest_path("models/customer_churn.json"),
        single_route: "/v1/customer".to_string(),
        batch_route: "/v1/customerbatch".to_string(),
        upload_field: "file".to_string(),
        features: FeatureSchema::new(vec![
            FeatureSpec::new("CreditScore", FeatureKind::Integer),
            FeatureSpec::new("Geography", FeatureKind::Category),
            FeatureSpec::new("Age", FeatureKind::Integer),
            FeatureSpec::new("Tenure", FeatureKind::Integer),
            FeatureSpec::new("Balance", FeatureKind::Number),
            FeatureSpec::new("NumOfProducts", FeatureKind::Integer),
            FeatureSpec::new("HasCrCard", FeatureKind::Boolean),
            FeatureSpec::new("IsActiveMember", FeatureKind::Boolean),
            FeatureSpec::new("EstimatedSalary", FeatureKind::Number),
        ])
        .unwrap(),
        identifier_columns: vec!["CustomerId".to_string()],
        batch_shape: BatchShape::Map,
        output: OutputConfig {
            kind: TaskKind::Classification,
            field: "Prediction".to_string(),
            precision: 2,
            labels: BTreeMap::from([(0, "not churn".to_string()), (1, "churn".to_string())]),
            batch_labels: Some(BTreeMap::from([
                (0, "Not Churn".to_string()),
                (1, "Churn".to_string()),
            ])),
        },
    }
}

/// Sales regressor service shaped like the SuperKart API
pub fn sales_service_config() -> ServiceConfig {
    ServiceConfig {
        name: "superkart-sales".to_string(),
        model_path: manifest_path("models/superkart_sales.json"),
        single_route: "/v1/predict".to_string(),
        batch_route: "/v1/predict/batch".to_string(),
        upload_field: "file".to_string(),
        features: FeatureSchema::new(vec![
            FeatureSpec::new("Product_Weight", FeatureKind::Number),
            FeatureSpec::new("Product_Sugar_Content", FeatureKind::Category),
            FeatureSpec::new("Product_MRP", FeatureKind::Number),
            FeatureSpec::new("Store_Id", FeatureKind::Category),
        ])
        .unwrap(),
        identifier_columns: vec!["Product_Id".to_string()],
        batch_shape: BatchShape::List,
        output: OutputConfig {
            kind: TaskKind::Regression,
            field: "predicted_product_store_sales".to_string(),
            precision: 2,
            labels: BTreeMap::new(),
            batch_labels: None,
        },
    }
}

pub fn churn_payload() -> Value {
    json!({
        "CreditScore": 650,
        "Geography": "France",
        "Age": 40,
        "Tenure": 3,
        "Balance": 0.0,
        "NumOfProducts": 2,
        "HasCrCard": 1,
        "IsActiveMember": 1,
        "EstimatedSalary": 50000
    })
}

pub fn sales_payload() -> Value {
    json!({
        "Product_Weight": 12.5,
        "Product_Sugar_Content": "Low Sugar",
        "Product_MRP": 147.32,
        "Store_Id": "OUT004"
    })
}

pub fn churn_csv() -> &'static str {
    "CustomerId,CreditScore,Geography,Age,Tenure,Balance,NumOfProducts,HasCrCard,IsActiveMember,EstimatedSalary\n\
     15634602,619,France,42,2,0.0,1,1,1,101348.88\n\
     15647311,608,Spain,41,1,83807.86,1,0,1,112542.58\n\
     15619304,502,France,42,8,159660.8,3,1,0,113931.57\n"
}

pub fn service_with(config: ServiceConfig, model: MockModel) -> Arc<InferenceService> {
    Arc::new(InferenceService::new(config, Arc::new(model)))
}

pub fn test_app(services: Vec<Arc<InferenceService>>) -> Router {
    server::router(services, 1024 * 1024)
}

pub fn json_request(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn multipart_request(uri: &str, field: &str, csv: &str) -> Request<Body> {
    let body = format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"{field}\"; filename=\"batch.csv\"\r\n\
         Content-Type: text/csv\r\n\r\n\
         {csv}\r\n\
         --{BOUNDARY}--\r\n"
    );

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
