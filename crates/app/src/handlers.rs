use crate::AppState;
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse, Result as ActixResult};
use futures_util::TryStreamExt;
use medchat_core::{ChatError, IngestError, SubQuery, UploadMetadata, UploadedFile};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

pub async fn health() -> HttpResponse {
    HttpResponse::Ok().body("PDF Route Working")
}

/// Multipart upload: any field whose name starts with `pdf` and carries a
/// filename is a PDF binary; `patientName`, `reportType` and `duration` are
/// optional text fields. The `count` field is informational only.
pub async fn upload_pdf(
    mut payload: Multipart,
    state: web::Data<AppState>,
) -> ActixResult<HttpResponse> {
    let mut files: Vec<UploadedFile> = Vec::new();
    let mut metadata = UploadMetadata::default();

    while let Some(mut field) = payload.try_next().await? {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field
            .content_disposition()
            .and_then(|disposition| disposition.get_filename())
            .map(str::to_string);

        let mut bytes = Vec::new();
        while let Some(chunk) = field.try_next().await? {
            bytes.extend_from_slice(&chunk);
        }

        if name.starts_with("pdf") {
            if let Some(file_name) = file_name {
                files.push(UploadedFile { file_name, bytes });
            }
            continue;
        }

        let value = String::from_utf8_lossy(&bytes).trim().to_string();
        if value.is_empty() {
            continue;
        }
        match name.as_str() {
            "patientName" => metadata.patient_name = Some(value),
            "reportType" => metadata.report_type = Some(value),
            "duration" => metadata.duration = Some(value),
            _ => {}
        }
    }

    let provided = metadata.clone();

    match state.pipeline.ingest(&files, &metadata).await {
        Ok(report) => Ok(HttpResponse::Ok().json(json!({
            "message": format!(
                "{} PDF file(s) processed successfully",
                report.files_processed.len()
            ),
            "collectionName": report.collection_name,
            "filesProcessed": report.files_processed,
            "metadata": {
                "patientName": provided.patient_name.unwrap_or_else(|| "Not provided".to_string()),
                "reportType": provided.report_type.unwrap_or_else(|| "Not provided".to_string()),
                "duration": provided.duration.unwrap_or_else(|| "Not provided".to_string()),
            },
            "totalChunks": report.total_chunks,
        }))),
        Err(IngestError::NoFilesUploaded) => Ok(HttpResponse::BadRequest().json(json!({
            "error": "No PDF files uploaded",
        }))),
        Err(err) => {
            error!(%err, "error processing PDFs");
            Ok(HttpResponse::InternalServerError().json(json!({
                "error": "Failed to process PDF files",
                "details": err.to_string(),
            })))
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    query: Option<String>,
    #[serde(rename = "collectionName")]
    collection_name: Option<String>,
}

pub async fn chat_with_pdf(
    request: web::Json<ChatRequest>,
    state: web::Data<AppState>,
) -> ActixResult<HttpResponse> {
    let (query, collection) = match (
        request.query.as_deref(),
        request.collection_name.as_deref(),
    ) {
        (Some(query), Some(collection))
            if !query.trim().is_empty() && !collection.trim().is_empty() =>
        {
            (query, collection)
        }
        _ => {
            return Ok(HttpResponse::BadRequest().json(json!({
                "error": "Query and collection name are required",
            })));
        }
    };

    match state.coordinator.answer(query, collection).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "message": "Chat completed successfully",
            "response": response,
        }))),
        Err(ChatError::NoRelevantContent) => Ok(HttpResponse::NotFound().json(json!({
            "error": "No relevant content found in PDF",
        }))),
        Err(err) => {
            error!(%err, "chat request failed");
            Ok(HttpResponse::InternalServerError().json(json!({
                "error": "Failed to process PDF",
                "details": err.to_string(),
            })))
        }
    }
}

/// The body is taken as raw JSON so that a missing, non-array, or malformed
/// `subQueries` all get the same fixed 400 body instead of the framework's
/// deserialize error.
pub async fn kg_navigate(
    request: web::Json<serde_json::Value>,
    state: web::Data<AppState>,
) -> ActixResult<HttpResponse> {
    let invalid = || {
        HttpResponse::BadRequest().json(json!({
            "error": "Valid subQueries array is required",
        }))
    };

    let Some(raw) = request.get("subQueries").filter(|value| value.is_array()) else {
        return Ok(invalid());
    };

    let Ok(sub_queries) = serde_json::from_value::<Vec<SubQuery>>(raw.clone()) else {
        return Ok(invalid());
    };

    let results = state.navigator.navigate(&sub_queries).await;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "results": results,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};
    use medchat_core::{
        AnswerCoordinator, GeminiEmbedder, GeminiGenerator, IngestionPipeline,
        KnowledgeGraphNavigator, PostgresGraph, QdrantStore,
    };
    use serde_json::Value;
    use sqlx::postgres::PgPoolOptions;

    // Clients are never reached by the 400 paths under test, so they can
    // point at addresses that don't resolve.
    fn test_state() -> web::Data<AppState> {
        let embedder = GeminiEmbedder::new("test-key");
        let vector = QdrantStore::new("http://localhost:1");
        let generator = GeminiGenerator::new("test-key");
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost:1/unused")
            .expect("lazy pool");

        web::Data::new(AppState {
            pipeline: IngestionPipeline::new(embedder.clone(), vector.clone()),
            coordinator: AnswerCoordinator::new(embedder, vector, generator),
            navigator: KnowledgeGraphNavigator::new(PostgresGraph::new(pool)),
        })
    }

    fn routes(cfg: &mut web::ServiceConfig) {
        cfg.route("/", web::get().to(health))
            .route("/upload", web::post().to(upload_pdf))
            .route("/chat", web::post().to(chat_with_pdf))
            .route("/kg/navigate", web::post().to(kg_navigate));
    }

    #[actix_web::test]
    async fn health_reports_the_route_is_working() {
        let app = test::init_service(App::new().app_data(test_state()).configure(routes)).await;

        let request = test::TestRequest::get().uri("/").to_request();
        let body = test::call_and_read_body(&app, request).await;

        assert_eq!(&body[..], b"PDF Route Working");
    }

    #[actix_web::test]
    async fn chat_without_collection_name_is_rejected() {
        let app = test::init_service(App::new().app_data(test_state()).configure(routes)).await;

        let request = test::TestRequest::post()
            .uri("/chat")
            .set_json(json!({ "query": "What is diabetes?" }))
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), 400);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["error"], "Query and collection name are required");
    }

    #[actix_web::test]
    async fn chat_without_query_is_rejected_even_with_a_collection() {
        let app = test::init_service(App::new().app_data(test_state()).configure(routes)).await;

        let request = test::TestRequest::post()
            .uri("/chat")
            .set_json(json!({ "collectionName": "medical-reports-abc" }))
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), 400);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["error"], "Query and collection name are required");
    }

    #[actix_web::test]
    async fn upload_without_files_is_rejected() {
        let app = test::init_service(App::new().app_data(test_state()).configure(routes)).await;

        let boundary = "test-boundary";
        let payload = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"count\"\r\n\r\n\
             0\r\n\
             --{boundary}--\r\n"
        );
        let request = test::TestRequest::post()
            .uri("/upload")
            .insert_header((
                "content-type",
                format!("multipart/form-data; boundary={boundary}"),
            ))
            .set_payload(payload)
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), 400);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["error"], "No PDF files uploaded");
    }

    #[actix_web::test]
    async fn kg_navigate_rejects_a_non_array_sub_queries_value() {
        let app = test::init_service(App::new().app_data(test_state()).configure(routes)).await;

        let request = test::TestRequest::post()
            .uri("/kg/navigate")
            .set_json(json!({ "subQueries": 42 }))
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), 400);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["error"], "Valid subQueries array is required");
    }

    #[actix_web::test]
    async fn kg_navigate_rejects_a_missing_sub_queries_field() {
        let app = test::init_service(App::new().app_data(test_state()).configure(routes)).await;

        let request = test::TestRequest::post()
            .uri("/kg/navigate")
            .set_json(json!({ "questions": [] }))
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), 400);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["error"], "Valid subQueries array is required");
    }

    #[actix_web::test]
    async fn kg_navigate_answers_an_empty_batch_with_empty_results() {
        let app = test::init_service(App::new().app_data(test_state()).configure(routes)).await;

        let request = test::TestRequest::post()
            .uri("/kg/navigate")
            .set_json(json!({ "subQueries": [] }))
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), 200);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["results"], json!([]));
    }
}
