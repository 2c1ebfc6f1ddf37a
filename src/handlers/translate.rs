use axum::{Json, extract::State};

use crate::middleware::ApiJson;
use crate::service::translator::check_language;
use crate::types::translate::{
    BatchTranslateRequest, BatchTranslateResponse, TranslateRequest, TranslateResponse,
};
use crate::{FedpackError, router::FedpackState};

/// POST /api/translate
pub async fn translate_text(
    State(state): State<FedpackState>,
    ApiJson(body): ApiJson<TranslateRequest>,
) -> Result<Json<TranslateResponse>, FedpackError> {
    let (Some(text), Some(lang)) = (
        body.text.filter(|t| !t.is_empty()),
        body.target_lang.filter(|l| !l.is_empty()),
    ) else {
        return Err(FedpackError::BadRequest(
            "Missing text or targetLang".to_string(),
        ));
    };
    check_language(&lang)?;

    let translated_text = state.translator.translate(&text, &lang).await;
    Ok(Json(TranslateResponse { translated_text }))
}

/// POST /api/translate/batch
pub async fn translate_batch(
    State(state): State<FedpackState>,
    ApiJson(body): ApiJson<BatchTranslateRequest>,
) -> Result<Json<BatchTranslateResponse>, FedpackError> {
    let (Some(texts), Some(lang)) = (
        body.texts.filter(|t| !t.is_empty()),
        body.target_lang.filter(|l| !l.is_empty()),
    ) else {
        return Err(FedpackError::BadRequest(
            "Missing texts array or targetLang".to_string(),
        ));
    };
    check_language(&lang)?;

    let translations = state.translator.translate_batch(&texts, &lang).await;
    Ok(Json(BatchTranslateResponse { translations }))
}
