//! Request and response bodies for lesson endpoints.
//!
//! Lessons themselves serialize straight from the domain type; only query
//! strings and the odd acknowledgement need their own shapes.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Email, LessonId};
use crate::domain::lesson::{AccessLevel, Privacy};
use crate::ports::LessonFilter;

/// `GET /lessons` query string. Every field is an equality filter.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonListQuery {
    pub category: Option<String>,
    pub emotional_tone: Option<String>,
    pub access_level: Option<AccessLevel>,
    pub privacy: Option<Privacy>,
    pub creator_email: Option<Email>,
}

impl From<LessonListQuery> for LessonFilter {
    fn from(query: LessonListQuery) -> Self {
        LessonFilter {
            creator_email: query.creator_email,
            category: query.category.filter(|c| !c.trim().is_empty()),
            emotional_tone: query.emotional_tone.filter(|t| !t.trim().is_empty()),
            privacy: query.privacy,
            access_level: query.access_level,
        }
    }
}

/// Optional body of `PATCH /lessons/:id/like`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleLikeRequest {
    pub user_email: Option<Email>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedLessonResponse {
    pub deleted: bool,
    pub id: LessonId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_maps_to_filter_and_drops_blank_strings() {
        let query: LessonListQuery = serde_json::from_value(serde_json::json!({
            "category": "career",
            "emotionalTone": " ",
            "accessLevel": "premium",
            "creatorEmail": "A@X.com"
        }))
        .unwrap();

        let filter = LessonFilter::from(query);
        assert_eq!(filter.category.as_deref(), Some("career"));
        assert_eq!(filter.emotional_tone, None);
        assert_eq!(filter.access_level, Some(AccessLevel::Premium));
        assert_eq!(filter.creator_email.unwrap().as_str(), "a@x.com");
    }

    #[test]
    fn like_body_email_is_optional() {
        let empty: ToggleLikeRequest = serde_json::from_str("{}").unwrap();
        assert!(empty.user_email.is_none());
    }
}
