use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Maintenance date meaning "no maintenance scheduled".
pub const NO_MAINTENANCE_DATE: &str = "2099-12-31";

/// A persisted insight card.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    pub id: i64,
    #[serde(flatten)]
    pub data: InsightData,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Every writable field of an insight. This is the insert payload for the
/// record store and the target shape of a CSV row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InsightData {
    pub creation_number: i64,
    pub subject: String,
    pub insight_id: String,
    pub status: String,
    pub start_date: Option<String>,
    pub update_date: Option<String>,
    pub end_date: Option<String>,
    #[serde(rename = "type")]
    pub insight_type: String,
    pub main_category: String,
    pub sub_category: String,
    pub data_category: String,
    pub target_banks: Vec<String>,
    pub logic_formula: String,
    pub target_tables: Vec<String>,
    pub target_users: String,
    pub related_insight: String,
    pub revenue_category: String,
    pub icon_type: String,
    pub score: Option<String>,
    pub relevance_policy: String,
    pub relevance_score: String,
    pub next_policy: String,
    pub next_value: String,
    pub app_link: String,
    pub external_link: String,
    pub display_count: i64,
    pub select_count: i64,
    pub teaser_image: Option<String>,
    pub story_images: Vec<String>,
    pub maintenance_date: String,
    pub maintenance_reason: String,
    pub remarks: String,
    pub updated_by: String,
}

impl Default for InsightData {
    fn default() -> Self {
        Self {
            creation_number: 1,
            subject: String::new(),
            insight_id: String::new(),
            status: String::new(),
            start_date: None,
            update_date: None,
            end_date: None,
            insight_type: String::new(),
            main_category: String::new(),
            sub_category: String::new(),
            data_category: String::new(),
            target_banks: Vec::new(),
            logic_formula: String::new(),
            target_tables: Vec::new(),
            target_users: String::new(),
            related_insight: String::new(),
            revenue_category: String::new(),
            icon_type: String::new(),
            score: None,
            relevance_policy: String::new(),
            relevance_score: String::new(),
            next_policy: String::new(),
            next_value: String::new(),
            app_link: String::new(),
            external_link: String::new(),
            display_count: 0,
            select_count: 0,
            teaser_image: None,
            story_images: Vec::new(),
            maintenance_date: NO_MAINTENANCE_DATE.to_string(),
            maintenance_reason: String::new(),
            remarks: String::new(),
            updated_by: String::new(),
        }
    }
}

impl InsightData {
    /// Check the fields every stored insight must carry.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::MissingField` when `subject` or `insight_id` is
    /// blank after trimming.
    pub fn validate_required(&self) -> Result<(), CoreError> {
        if self.subject.trim().is_empty() {
            return Err(CoreError::MissingField("Subject"));
        }
        if self.insight_id.trim().is_empty() {
            return Err(CoreError::MissingField("Insight ID"));
        }
        Ok(())
    }

    /// Drop story image entries that are blank after trimming.
    pub fn drop_blank_story_images(&mut self) {
        self.story_images = retain_non_blank(std::mem::take(&mut self.story_images));
    }
}

/// Keep only entries that are non-blank after trimming, preserving order.
#[must_use]
pub fn retain_non_blank(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .filter(|item| !item.trim().is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_match_import_fallbacks() {
        let data = InsightData::default();
        assert_eq!(data.creation_number, 1);
        assert_eq!(data.display_count, 0);
        assert_eq!(data.select_count, 0);
        assert_eq!(data.maintenance_date, NO_MAINTENANCE_DATE);
        assert!(data.target_banks.is_empty());
        assert!(data.teaser_image.is_none());
    }

    #[test]
    fn blank_subject_is_rejected() {
        let data = InsightData {
            subject: "   ".into(),
            insight_id: "INS-1".into(),
            ..Default::default()
        };
        let err = data.validate_required().unwrap_err();
        assert_eq!(err.to_string(), "Subject is required");
    }

    #[test]
    fn blank_insight_id_is_rejected() {
        let data = InsightData {
            subject: "Savings nudge".into(),
            insight_id: "\t".into(),
            ..Default::default()
        };
        let err = data.validate_required().unwrap_err();
        assert_eq!(err.to_string(), "Insight ID is required");
    }

    #[test]
    fn story_images_drop_blanks() {
        let mut data = InsightData {
            story_images: vec!["a.png".into(), " ".into(), String::new(), "b.png".into()],
            ..Default::default()
        };
        data.drop_blank_story_images();
        assert_eq!(data.story_images, vec!["a.png".to_string(), "b.png".to_string()]);
    }
}
