use crate::error::{status_for, ApiError};
use crate::pdf_payload::{ProcessPdfPayload, ProcessPdfResponse};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use quiz_generator::{
    Difficulty, GenerationRequest, GenerationResult, QuestionTypes, SourceFile,
};
use serde_json::{json, Value};

pub async fn generate_questions(
    State(state): State<AppState>,
    payload: Result<Json<GenerationRequest>, JsonRejection>,
) -> Result<Json<GenerationResult>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        log::warn!("Rejected generate-questions body: {}", rejection);
        ApiError::bad_request("Invalid request body")
    })?;

    log::info!("Question generation request received ({} file(s))", request.files.len());
    let result = state.question_service.generate(&request).await?;
    Ok(Json(result))
}

pub async fn process_pdf(
    State(state): State<AppState>,
    payload: Result<Json<ProcessPdfPayload>, JsonRejection>,
) -> (StatusCode, Json<ProcessPdfResponse>) {
    let Ok(Json(payload)) = payload else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ProcessPdfResponse::failure("fileName and fileContent are required")),
        );
    };

    match state
        .document_processor
        .process_upload(&payload.file_name, &payload.file_content)
    {
        Ok(doc) => {
            let message = format!(
                "Successfully processed {} - extracted {} characters from {} pages",
                doc.file_name,
                doc.extracted_text.chars().count(),
                doc.page_count
            );
            (
                StatusCode::OK,
                Json(ProcessPdfResponse {
                    success: true,
                    extracted_text: doc.extracted_text,
                    page_count: doc.page_count,
                    message,
                }),
            )
        }
        Err(e) => {
            log::warn!("Error processing PDF: {}", e);
            (status_for(&e), Json(ProcessPdfResponse::failure(e.to_string())))
        }
    }
}

/// Runs the full pipeline against a fixed sample request.
pub async fn test_questions(
    State(state): State<AppState>,
) -> Result<Json<GenerationResult>, ApiError> {
    let request = GenerationRequest {
        files: vec![SourceFile {
            name: "test-chapter.pdf".to_string(),
            content: "base64encodedcontent".to_string(),
        }],
        question_count: 5,
        question_types: QuestionTypes {
            multiple_choice: true,
            true_false: true,
        },
        difficulty: Difficulty::Medium,
    };

    let result = state.question_service.generate(&request).await?;
    Ok(Json(result))
}

pub async fn ping(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "message": state.settings.ping_message }))
}

pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "environment": state.settings.environment,
    }))
}
