//! Request and response bodies for favorite endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::favorite::{AddFavoriteOutcome, Favorite};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddFavoriteRequest {
    pub lesson_id: String,
}

/// Adding an existing favorite answers `inserted: false`, not an error.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddFavoriteResponse {
    pub inserted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favorite: Option<Favorite>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<AddFavoriteOutcome> for AddFavoriteResponse {
    fn from(outcome: AddFavoriteOutcome) -> Self {
        match outcome {
            AddFavoriteOutcome::Added(favorite) => Self {
                inserted: true,
                favorite: Some(favorite),
                message: None,
            },
            AddFavoriteOutcome::AlreadyFavorited => Self {
                inserted: false,
                favorite: None,
                message: Some("Already favorited".to_string()),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FavoriteStatusResponse {
    pub favorited: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_add_serializes_without_favorite() {
        let body = serde_json::to_value(AddFavoriteResponse::from(
            AddFavoriteOutcome::AlreadyFavorited,
        ))
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({"inserted": false, "message": "Already favorited"})
        );
    }
}
