//! HTTP route handlers for the translation widget.
//!
//! Pages and SSE fragments are Askama templates from the `templates` module;
//! the remaining API routes speak JSON.

mod languages;
mod pages;
mod translate;

pub use languages::list_languages;
pub use pages::index;
pub use translate::{translate, translate_stream};

use serde::Deserialize;

/// JSON body for a one-shot batch translation.
#[derive(Deserialize, Debug)]
pub struct TranslateBody {
    pub text: String,
    /// Defaults to the configured source language
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub targets: Vec<String>,
}

/// Query params for the streaming translation endpoint.
#[derive(Deserialize, Debug)]
pub struct StreamQuery {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub from: Option<String>,
    /// Comma separated target codes, in display order
    #[serde(default)]
    pub to: String,
}
