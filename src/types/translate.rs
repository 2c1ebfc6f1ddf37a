use serde::{Deserialize, Serialize};

/// Body of `POST /api/translate`. `targetLanguage` is accepted as an alias.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default, alias = "targetLanguage")]
    pub target_lang: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateResponse {
    pub translated_text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchTranslateRequest {
    #[serde(default)]
    pub texts: Option<Vec<String>>,
    #[serde(default, alias = "targetLanguage")]
    pub target_lang: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BatchTranslateResponse {
    pub translations: Vec<String>,
}

/// LibreTranslate request payload.
#[derive(Debug, Serialize)]
pub struct LibreTranslateRequest<'a> {
    pub q: &'a str,
    pub source: &'a str,
    pub target: &'a str,
    pub format: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibreTranslateResponse {
    #[serde(default)]
    pub translated_text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_language_alias() {
        let a: TranslateRequest =
            serde_json::from_str(r#"{"text":"hi","targetLang":"fr"}"#).unwrap();
        let b: TranslateRequest =
            serde_json::from_str(r#"{"text":"hi","targetLanguage":"fr"}"#).unwrap();
        assert_eq!(a.target_lang.as_deref(), Some("fr"));
        assert_eq!(b.target_lang.as_deref(), Some("fr"));
    }
}
