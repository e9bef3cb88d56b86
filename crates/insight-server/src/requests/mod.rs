//! Request bodies and query strings for the insight routes.

mod lenient;

use insight_core::entities::{InsightData, NO_MAINTENANCE_DATE, retain_non_blank};
use insight_db::repos::insight::InsightFilter;
use insight_db::updates::insight::InsightUpdate;
use serde::Deserialize;

use crate::error::ServerError;

/// Body of `POST /api/insights`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInsightRequest {
    #[serde(default, deserialize_with = "lenient::count")]
    pub creation_number: Option<i64>,
    pub subject: Option<String>,
    pub insight_id: Option<String>,
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient::nullable_text")]
    pub start_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "lenient::nullable_text")]
    pub update_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "lenient::nullable_text")]
    pub end_date: Option<Option<String>>,
    #[serde(rename = "type")]
    pub insight_type: Option<String>,
    pub main_category: Option<String>,
    pub sub_category: Option<String>,
    pub data_category: Option<String>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub target_banks: Option<Vec<String>>,
    pub logic_formula: Option<String>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub target_tables: Option<Vec<String>>,
    pub target_users: Option<String>,
    pub related_insight: Option<String>,
    pub revenue_category: Option<String>,
    pub icon_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::score")]
    pub score: Option<Option<String>>,
    pub relevance_policy: Option<String>,
    pub relevance_score: Option<String>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub display_count: Option<i64>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub select_count: Option<i64>,
    pub next_policy: Option<String>,
    pub next_value: Option<String>,
    pub app_link: Option<String>,
    pub external_link: Option<String>,
    #[serde(default, deserialize_with = "lenient::nullable_text")]
    pub teaser_image: Option<Option<String>>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub story_images: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient::nullable_text")]
    pub maintenance_date: Option<Option<String>>,
    pub maintenance_reason: Option<String>,
    pub remarks: Option<String>,
    pub updated_by: Option<String>,
}

impl CreateInsightRequest {
    /// Fill defaults and validate.
    ///
    /// Missing or zero counts default to 1, missing dates to null, and a
    /// missing maintenance date to the "no maintenance" sentinel.
    ///
    /// # Errors
    ///
    /// Returns `ServerError::BadRequest` when subject or insight id is blank.
    pub fn into_data(self) -> Result<InsightData, ServerError> {
        let data = InsightData {
            creation_number: count_or_one(self.creation_number),
            subject: self.subject.unwrap_or_default(),
            insight_id: self.insight_id.unwrap_or_default(),
            status: self.status.unwrap_or_default(),
            start_date: self.start_date.flatten(),
            update_date: self.update_date.flatten(),
            end_date: self.end_date.flatten(),
            insight_type: self.insight_type.unwrap_or_default(),
            main_category: self.main_category.unwrap_or_default(),
            sub_category: self.sub_category.unwrap_or_default(),
            data_category: self.data_category.unwrap_or_default(),
            target_banks: self.target_banks.unwrap_or_default(),
            logic_formula: self.logic_formula.unwrap_or_default(),
            target_tables: self.target_tables.unwrap_or_default(),
            target_users: self.target_users.unwrap_or_default(),
            related_insight: self.related_insight.unwrap_or_default(),
            revenue_category: self.revenue_category.unwrap_or_default(),
            icon_type: self.icon_type.unwrap_or_default(),
            score: self.score.flatten(),
            relevance_policy: self.relevance_policy.unwrap_or_default(),
            relevance_score: self.relevance_score.unwrap_or_default(),
            next_policy: self.next_policy.unwrap_or_default(),
            next_value: self.next_value.unwrap_or_default(),
            app_link: self.app_link.unwrap_or_default(),
            external_link: self.external_link.unwrap_or_default(),
            display_count: count_or_one(self.display_count),
            select_count: count_or_one(self.select_count),
            teaser_image: self.teaser_image.flatten(),
            story_images: retain_non_blank(self.story_images.unwrap_or_default()),
            maintenance_date: self
                .maintenance_date
                .flatten()
                .unwrap_or_else(|| NO_MAINTENANCE_DATE.to_string()),
            maintenance_reason: self.maintenance_reason.unwrap_or_default(),
            remarks: self.remarks.unwrap_or_default(),
            updated_by: self.updated_by.unwrap_or_default(),
        };
        data.validate_required()
            .map_err(|e| ServerError::bad_request(e.to_string()))?;
        Ok(data)
    }
}

/// Body of `PUT /api/insights/:id`. Only keys present in the body change.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInsightRequest {
    #[serde(default, deserialize_with = "lenient::count")]
    pub creation_number: Option<i64>,
    pub subject: Option<String>,
    pub insight_id: Option<String>,
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient::nullable_text")]
    pub start_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "lenient::nullable_text")]
    pub update_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "lenient::nullable_text")]
    pub end_date: Option<Option<String>>,
    #[serde(rename = "type")]
    pub insight_type: Option<String>,
    pub main_category: Option<String>,
    pub sub_category: Option<String>,
    pub data_category: Option<String>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub target_banks: Option<Vec<String>>,
    pub logic_formula: Option<String>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub target_tables: Option<Vec<String>>,
    pub target_users: Option<String>,
    pub related_insight: Option<String>,
    pub revenue_category: Option<String>,
    pub icon_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::score")]
    pub score: Option<Option<String>>,
    pub relevance_policy: Option<String>,
    pub relevance_score: Option<String>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub display_count: Option<i64>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub select_count: Option<i64>,
    pub next_policy: Option<String>,
    pub next_value: Option<String>,
    pub app_link: Option<String>,
    pub external_link: Option<String>,
    #[serde(default, deserialize_with = "lenient::nullable_text")]
    pub teaser_image: Option<Option<String>>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub story_images: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient::nullable_text")]
    pub maintenance_date: Option<Option<String>>,
    pub maintenance_reason: Option<String>,
    pub remarks: Option<String>,
    pub updated_by: Option<String>,
}

impl UpdateInsightRequest {
    /// Convert to a store update. Text fields are stored as sent, blank
    /// included.
    #[must_use]
    pub fn into_update(self) -> InsightUpdate {
        InsightUpdate {
            creation_number: self.creation_number,
            subject: self.subject,
            insight_id: self.insight_id,
            status: self.status,
            start_date: self.start_date,
            update_date: self.update_date,
            end_date: self.end_date,
            insight_type: self.insight_type,
            main_category: self.main_category,
            sub_category: self.sub_category,
            data_category: self.data_category,
            target_banks: self.target_banks,
            logic_formula: self.logic_formula,
            target_tables: self.target_tables,
            target_users: self.target_users,
            related_insight: self.related_insight,
            revenue_category: self.revenue_category,
            icon_type: self.icon_type,
            score: self.score,
            relevance_policy: self.relevance_policy,
            relevance_score: self.relevance_score,
            display_count: self.display_count,
            select_count: self.select_count,
            next_policy: self.next_policy,
            next_value: self.next_value,
            app_link: self.app_link,
            external_link: self.external_link,
            teaser_image: self.teaser_image,
            story_images: self.story_images.map(retain_non_blank),
            maintenance_date: self.maintenance_date,
            maintenance_reason: self.maintenance_reason,
            remarks: self.remarks,
            updated_by: self.updated_by,
        }
    }
}

/// Counts left out of a create body, or sent as zero, start at 1.
fn count_or_one(value: Option<i64>) -> i64 {
    value.filter(|n| *n != 0).unwrap_or(1)
}

/// Build a search filter from `GET /api/insights` query pairs.
///
/// Empty values are ignored. `targetBanks` and `targetTables` may repeat.
///
/// # Errors
///
/// Returns `ServerError::BadRequest` when `creationNumber` is not an integer.
pub fn filter_from_query(pairs: Vec<(String, String)>) -> Result<InsightFilter, ServerError> {
    let mut filter = InsightFilter::default();
    for (key, value) in pairs {
        if value.is_empty() {
            continue;
        }
        match key.as_str() {
            "creationNumber" => {
                let n = value.trim().parse().map_err(|_| {
                    ServerError::bad_request(format!("Invalid creationNumber: {value}"))
                })?;
                filter.creation_number = Some(n);
            }
            "subject" => filter.subject = Some(value),
            "insightId" => filter.insight_id = Some(value),
            "status" => filter.status = Some(value),
            "type" => filter.insight_type = Some(value),
            "mainCategory" => filter.main_category = Some(value),
            "subCategory" => filter.sub_category = Some(value),
            "dataCategory" => filter.data_category = Some(value),
            "logicFormula" => filter.logic_formula = Some(value),
            "relatedInsight" => filter.related_insight = Some(value),
            "targetBanks" => filter.target_banks.push(value),
            "targetTables" => filter.target_tables.push(value),
            _ => {}
        }
    }
    Ok(filter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn create_applies_defaults() {
        let request: CreateInsightRequest = serde_json::from_value(json!({
            "subject": "New card",
            "insightId": "INS-7",
            "startDate": "",
            "score": 85,
            "targetBanks": "not-a-list",
            "storyImages": ["a.png", " ", ""],
            "maintenanceDate": ""
        }))
        .unwrap();
        let data = request.into_data().unwrap();

        assert_eq!(data.creation_number, 1);
        assert_eq!(data.display_count, 1);
        assert_eq!(data.select_count, 1);
        assert_eq!(data.start_date, None);
        assert_eq!(data.score.as_deref(), Some("85"));
        assert!(data.target_banks.is_empty());
        assert_eq!(data.story_images, vec!["a.png"]);
        assert_eq!(data.maintenance_date, NO_MAINTENANCE_DATE);
    }

    #[test]
    fn create_accepts_numeric_strings() {
        let request: CreateInsightRequest = serde_json::from_value(json!({
            "subject": "s",
            "insightId": "i",
            "creationNumber": "3",
            "displayCount": 0,
            "type": "alert"
        }))
        .unwrap();
        let data = request.into_data().unwrap();
        assert_eq!(data.creation_number, 3);
        assert_eq!(data.display_count, 1);
        assert_eq!(data.insight_type, "alert");
    }

    #[test]
    fn create_requires_subject_and_id() {
        let missing_subject = CreateInsightRequest {
            insight_id: Some("INS".into()),
            ..CreateInsightRequest::default()
        };
        assert_eq!(
            missing_subject.into_data().unwrap_err().to_string(),
            "Subject is required"
        );

        let missing_id = CreateInsightRequest {
            subject: Some("S".into()),
            ..CreateInsightRequest::default()
        };
        assert_eq!(
            missing_id.into_data().unwrap_err().to_string(),
            "Insight ID is required"
        );
    }

    #[test]
    fn update_keeps_only_present_fields() {
        let request: UpdateInsightRequest = serde_json::from_value(json!({
            "subject": "Renamed",
            "endDate": null,
            "storyImages": ["", "b.png"]
        }))
        .unwrap();
        let update = request.into_update();

        assert_eq!(update.subject.as_deref(), Some("Renamed"));
        assert_eq!(update.end_date, Some(None));
        assert_eq!(update.start_date, None);
        assert_eq!(update.story_images, Some(vec!["b.png".to_string()]));
        assert_eq!(update.display_count, None);
    }

    #[test]
    fn create_treats_zero_as_unset() {
        let request: CreateInsightRequest = serde_json::from_value(json!({
            "subject": "s",
            "insightId": "i",
            "creationNumber": 0,
            "displayCount": "0",
            "selectCount": 0,
            "score": 0
        }))
        .unwrap();
        let data = request.into_data().unwrap();
        assert_eq!(data.creation_number, 1);
        assert_eq!(data.display_count, 1);
        assert_eq!(data.select_count, 1);
        assert_eq!(data.score, None);
    }

    #[test]
    fn update_stores_blank_text_as_sent() {
        let request: UpdateInsightRequest =
            serde_json::from_value(json!({ "subject": "", "insightId": " ", "score": 0 }))
                .unwrap();
        let update = request.into_update();
        assert_eq!(update.subject.as_deref(), Some(""));
        assert_eq!(update.insight_id.as_deref(), Some(" "));
        assert_eq!(update.score, Some(None));
    }

    #[test]
    fn query_pairs_build_filter() {
        let pairs = vec![
            ("creationNumber".to_string(), "2".to_string()),
            ("subject".to_string(), "sal".to_string()),
            ("type".to_string(), "alert".to_string()),
            ("status".to_string(), String::new()),
            ("targetBanks".to_string(), "bank-a".to_string()),
            ("targetBanks".to_string(), "bank-b".to_string()),
            ("unknown".to_string(), "x".to_string()),
        ];
        let filter = filter_from_query(pairs).unwrap();

        assert_eq!(filter.creation_number, Some(2));
        assert_eq!(filter.subject.as_deref(), Some("sal"));
        assert_eq!(filter.insight_type.as_deref(), Some("alert"));
        assert_eq!(filter.status, None);
        assert_eq!(filter.target_banks, vec!["bank-a", "bank-b"]);
    }

    #[test]
    fn bad_creation_number_is_rejected() {
        let pairs = vec![("creationNumber".to_string(), "abc".to_string())];
        assert!(filter_from_query(pairs).is_err());
    }
}
