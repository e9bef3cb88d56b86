//! Insight update builder.
//!
//! Nullable columns use `Option<Option<_>>`: the outer `None` leaves the
//! column alone, `Some(None)` writes NULL.

use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InsightUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_number: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insight_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_date: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<Option<String>>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub insight_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_banks: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logic_formula: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_tables: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_users: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_insight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revenue_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relevance_policy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relevance_score: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_policy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub select_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teaser_image: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub story_images: Option<Vec<String>>,
    /// `Some(None)` resets to the "no maintenance" sentinel; the column is
    /// never NULL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintenance_date: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintenance_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
}

impl InsightUpdate {
    /// True when no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

pub struct InsightUpdateBuilder(InsightUpdate);

macro_rules! text_setters {
    ($($field:ident),* $(,)?) => {
        $(
            #[must_use]
            pub fn $field(mut self, val: impl Into<String>) -> Self {
                self.0.$field = Some(val.into());
                self
            }
        )*
    };
}

macro_rules! nullable_setters {
    ($($field:ident),* $(,)?) => {
        $(
            #[must_use]
            pub fn $field(mut self, val: Option<String>) -> Self {
                self.0.$field = Some(val);
                self
            }
        )*
    };
}

macro_rules! count_setters {
    ($($field:ident),* $(,)?) => {
        $(
            #[must_use]
            pub fn $field(mut self, val: i64) -> Self {
                self.0.$field = Some(val);
                self
            }
        )*
    };
}

macro_rules! list_setters {
    ($($field:ident),* $(,)?) => {
        $(
            #[must_use]
            pub fn $field(mut self, val: Vec<String>) -> Self {
                self.0.$field = Some(val);
                self
            }
        )*
    };
}

impl InsightUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(InsightUpdate::default())
    }

    text_setters!(
        subject,
        insight_id,
        status,
        insight_type,
        main_category,
        sub_category,
        data_category,
        logic_formula,
        target_users,
        related_insight,
        revenue_category,
        icon_type,
        relevance_policy,
        relevance_score,
        next_policy,
        next_value,
        app_link,
        external_link,
        maintenance_reason,
        remarks,
        updated_by,
    );

    nullable_setters!(
        start_date,
        update_date,
        end_date,
        score,
        teaser_image,
        maintenance_date,
    );

    count_setters!(creation_number, display_count, select_count);

    list_setters!(target_banks, target_tables, story_images);

    #[must_use]
    pub fn build(self) -> InsightUpdate {
        self.0
    }
}

impl Default for InsightUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
