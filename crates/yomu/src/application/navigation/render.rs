use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::domain::entities::image::RenderImage;

use super::action::ActionKind;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    /// Value sent back in `Action::Select`
    pub index: usize,
    pub label: String,
    pub default: bool,
}

/// Everything a front-end needs to draw one view of a session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderRequest {
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<RenderImage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,
    #[serde(default)]
    pub options: Vec<SelectOption>,
    #[serde(default)]
    pub actions: Vec<ActionKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl RenderRequest {
    /// Notice for an action that failed, the session it came from is unchanged
    pub fn failure<E: Display>(err: &E) -> Self {
        Self {
            title: "Something went wrong".to_string(),
            notice: Some(err.to_string()),
            ..Default::default()
        }
    }
}
