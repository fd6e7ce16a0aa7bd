use axum::Json;
use polyglot_core::{LanguageEntry, language};

/// Supported languages in display order.
pub async fn list_languages() -> Json<&'static [LanguageEntry]> {
    Json(language::all())
}
