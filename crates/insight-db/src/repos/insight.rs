//! Insight repository: CRUD and filtered listing.

use chrono::Utc;

use insight_core::entities::{Insight, InsightData, NO_MAINTENANCE_DATE};

use crate::InsightDb;
use crate::error::DatabaseError;
use crate::helpers::{encode_list, get_opt_string, opt_text, parse_datetime, parse_list};
use crate::updates::insight::InsightUpdate;

const SELECT_COLS: &str = "id, creation_number, subject, insight_id, status, \
    start_date, update_date, end_date, insight_type, main_category, sub_category, \
    data_category, target_banks, logic_formula, target_tables, target_users, \
    related_insight, revenue_category, icon_type, score, relevance_policy, \
    relevance_score, display_count, select_count, next_policy, next_value, \
    app_link, external_link, teaser_image, story_images, maintenance_date, \
    maintenance_reason, remarks, updated_by, created_at, updated_at";

const INSERT_COLS: &str = "creation_number, subject, insight_id, status, \
    start_date, update_date, end_date, insight_type, main_category, sub_category, \
    data_category, target_banks, logic_formula, target_tables, target_users, \
    related_insight, revenue_category, icon_type, score, relevance_policy, \
    relevance_score, display_count, select_count, next_policy, next_value, \
    app_link, external_link, teaser_image, story_images, maintenance_date, \
    maintenance_reason, remarks, updated_by";

const INSERT_PLACEHOLDERS: &str = "?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, \
    ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22, ?23, ?24, ?25, ?26, \
    ?27, ?28, ?29, ?30, ?31, ?32, ?33";

fn row_to_insight(row: &libsql::Row) -> Result<Insight, DatabaseError> {
    Ok(Insight {
        id: row.get::<i64>(0)?,
        data: InsightData {
            creation_number: row.get::<i64>(1)?,
            subject: row.get::<String>(2)?,
            insight_id: row.get::<String>(3)?,
            status: row.get::<String>(4)?,
            start_date: get_opt_string(row, 5)?,
            update_date: get_opt_string(row, 6)?,
            end_date: get_opt_string(row, 7)?,
            insight_type: row.get::<String>(8)?,
            main_category: row.get::<String>(9)?,
            sub_category: row.get::<String>(10)?,
            data_category: row.get::<String>(11)?,
            target_banks: parse_list(&row.get::<String>(12)?)?,
            logic_formula: row.get::<String>(13)?,
            target_tables: parse_list(&row.get::<String>(14)?)?,
            target_users: row.get::<String>(15)?,
            related_insight: row.get::<String>(16)?,
            revenue_category: row.get::<String>(17)?,
            icon_type: row.get::<String>(18)?,
            score: get_opt_string(row, 19)?,
            relevance_policy: row.get::<String>(20)?,
            relevance_score: row.get::<String>(21)?,
            display_count: row.get::<i64>(22)?,
            select_count: row.get::<i64>(23)?,
            next_policy: row.get::<String>(24)?,
            next_value: row.get::<String>(25)?,
            app_link: row.get::<String>(26)?,
            external_link: row.get::<String>(27)?,
            teaser_image: get_opt_string(row, 28)?,
            story_images: parse_list(&row.get::<String>(29)?)?,
            maintenance_date: row.get::<String>(30)?,
            maintenance_reason: row.get::<String>(31)?,
            remarks: row.get::<String>(32)?,
            updated_by: row.get::<String>(33)?,
        },
        created_at: parse_datetime(&row.get::<String>(34)?)?,
        updated_at: parse_datetime(&row.get::<String>(35)?)?,
    })
}

/// Positional parameters for `INSERT_COLS`, in order.
fn insert_params(data: &InsightData) -> Result<Vec<libsql::Value>, DatabaseError> {
    use libsql::Value::{Integer, Text};

    Ok(vec![
        Integer(data.creation_number),
        Text(data.subject.clone()),
        Text(data.insight_id.clone()),
        Text(data.status.clone()),
        opt_text(data.start_date.as_deref()),
        opt_text(data.update_date.as_deref()),
        opt_text(data.end_date.as_deref()),
        Text(data.insight_type.clone()),
        Text(data.main_category.clone()),
        Text(data.sub_category.clone()),
        Text(data.data_category.clone()),
        Text(encode_list(&data.target_banks)?),
        Text(data.logic_formula.clone()),
        Text(encode_list(&data.target_tables)?),
        Text(data.target_users.clone()),
        Text(data.related_insight.clone()),
        Text(data.revenue_category.clone()),
        Text(data.icon_type.clone()),
        opt_text(data.score.as_deref()),
        Text(data.relevance_policy.clone()),
        Text(data.relevance_score.clone()),
        Integer(data.display_count),
        Integer(data.select_count),
        Text(data.next_policy.clone()),
        Text(data.next_value.clone()),
        Text(data.app_link.clone()),
        Text(data.external_link.clone()),
        opt_text(data.teaser_image.as_deref()),
        Text(encode_list(&data.story_images)?),
        Text(data.maintenance_date.clone()),
        Text(data.maintenance_reason.clone()),
        Text(data.remarks.clone()),
        Text(data.updated_by.clone()),
    ])
}

/// Search criteria for [`InsightDb::list_insights`]. Unset fields do not filter.
#[derive(Debug, Clone, Default)]
pub struct InsightFilter {
    /// Exact match.
    pub creation_number: Option<i64>,
    /// Substring match.
    pub subject: Option<String>,
    /// Substring match.
    pub insight_id: Option<String>,
    /// Exact match.
    pub status: Option<String>,
    /// Exact match.
    pub insight_type: Option<String>,
    /// Exact match.
    pub main_category: Option<String>,
    /// Substring match.
    pub sub_category: Option<String>,
    /// Exact match.
    pub data_category: Option<String>,
    /// Substring match.
    pub logic_formula: Option<String>,
    /// Substring match.
    pub related_insight: Option<String>,
    /// Keep insights targeting any of these banks.
    pub target_banks: Vec<String>,
    /// Keep insights using any of these tables.
    pub target_tables: Vec<String>,
}

impl InsightFilter {
    /// Build the WHERE clause and its parameters for the scalar criteria.
    fn where_clause(&self) -> (String, Vec<libsql::Value>) {
        let mut conditions = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        if let Some(n) = self.creation_number {
            params.push(libsql::Value::Integer(n));
            conditions.push(format!("creation_number = ?{}", params.len()));
        }

        let text_criteria = [
            ("subject", self.subject.as_ref(), true),
            ("insight_id", self.insight_id.as_ref(), true),
            ("status", self.status.as_ref(), false),
            ("insight_type", self.insight_type.as_ref(), false),
            ("main_category", self.main_category.as_ref(), false),
            ("sub_category", self.sub_category.as_ref(), true),
            ("data_category", self.data_category.as_ref(), false),
            ("logic_formula", self.logic_formula.as_ref(), true),
            ("related_insight", self.related_insight.as_ref(), true),
        ];
        for (column, value, substring) in text_criteria {
            let Some(value) = value else { continue };
            params.push(libsql::Value::Text(value.clone()));
            let idx = params.len();
            if substring {
                conditions.push(format!("{column} LIKE '%' || ?{idx} || '%'"));
            } else {
                conditions.push(format!("{column} = ?{idx}"));
            }
        }

        if conditions.is_empty() {
            (String::new(), params)
        } else {
            (format!("WHERE {}", conditions.join(" AND ")), params)
        }
    }

    /// List-column criteria, applied to decoded rows.
    fn matches_lists(&self, insight: &Insight) -> bool {
        let any_of = |wanted: &[String], have: &[String]| {
            wanted.is_empty() || wanted.iter().any(|w| have.contains(w))
        };
        any_of(&self.target_banks, &insight.data.target_banks)
            && any_of(&self.target_tables, &insight.data.target_tables)
    }
}

/// Accumulates `column = ?N` assignments for a dynamic UPDATE.
#[derive(Default)]
struct SetClauses {
    sets: Vec<String>,
    params: Vec<libsql::Value>,
}

impl SetClauses {
    fn push(&mut self, column: &str, value: libsql::Value) {
        self.params.push(value);
        self.sets.push(format!("{column} = ?{}", self.params.len()));
    }

    fn text(&mut self, column: &str, value: Option<&String>) {
        if let Some(v) = value {
            self.push(column, libsql::Value::Text(v.clone()));
        }
    }

    fn nullable(&mut self, column: &str, value: Option<&Option<String>>) {
        if let Some(v) = value {
            self.push(column, opt_text(v.as_deref()));
        }
    }

    fn integer(&mut self, column: &str, value: Option<i64>) {
        if let Some(v) = value {
            self.push(column, libsql::Value::Integer(v));
        }
    }

    fn list(&mut self, column: &str, value: Option<&Vec<String>>) -> Result<(), DatabaseError> {
        if let Some(v) = value {
            self.push(column, libsql::Value::Text(encode_list(v)?));
        }
        Ok(())
    }
}

impl InsightDb {
    /// Insert a new insight and return it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the INSERT fails (e.g. a constraint violation).
    pub async fn create_insight(&self, data: &InsightData) -> Result<Insight, DatabaseError> {
        // The connection is shared, so the new row comes back from the INSERT
        // itself rather than through `last_insert_rowid`.
        let sql = format!(
            "INSERT INTO insights ({INSERT_COLS}) VALUES ({INSERT_PLACEHOLDERS}) \
             RETURNING {SELECT_COLS}"
        );
        let mut rows = self
            .conn()
            .query(&sql, libsql::params_from_iter(insert_params(data)?))
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_insight(&row)
    }

    /// Get an insight by id.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the insight does not exist.
    pub async fn get_insight(&self, id: i64) -> Result<Insight, DatabaseError> {
        let sql = format!("SELECT {SELECT_COLS} FROM insights WHERE id = ?1");
        let mut rows = self.conn().query(&sql, [id]).await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_insight(&row)
    }

    /// List insights matching the filter, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or a row cannot be decoded.
    pub async fn list_insights(&self, filter: &InsightFilter) -> Result<Vec<Insight>, DatabaseError> {
        let (where_sql, params) = filter.where_clause();
        let sql = format!("SELECT {SELECT_COLS} FROM insights {where_sql} ORDER BY id");
        let mut rows = self
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;

        let mut insights = Vec::new();
        while let Some(row) = rows.next().await? {
            let insight = row_to_insight(&row)?;
            if filter.matches_lists(&insight) {
                insights.push(insight);
            }
        }
        Ok(insights)
    }

    /// Every stored insight, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or a row cannot be decoded.
    pub async fn list_all(&self) -> Result<Vec<Insight>, DatabaseError> {
        self.list_insights(&InsightFilter::default()).await
    }

    /// Apply a partial update; only fields set in `update` change.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the insight does not exist, or
    /// `DatabaseError` if the UPDATE fails.
    pub async fn update_insight(
        &self,
        id: i64,
        update: &InsightUpdate,
    ) -> Result<Insight, DatabaseError> {
        if update.is_empty() {
            return self.get_insight(id).await;
        }

        let mut set = SetClauses::default();
        set.integer("creation_number", update.creation_number);
        set.text("subject", update.subject.as_ref());
        set.text("insight_id", update.insight_id.as_ref());
        set.text("status", update.status.as_ref());
        set.nullable("start_date", update.start_date.as_ref());
        set.nullable("update_date", update.update_date.as_ref());
        set.nullable("end_date", update.end_date.as_ref());
        set.text("insight_type", update.insight_type.as_ref());
        set.text("main_category", update.main_category.as_ref());
        set.text("sub_category", update.sub_category.as_ref());
        set.text("data_category", update.data_category.as_ref());
        set.list("target_banks", update.target_banks.as_ref())?;
        set.text("logic_formula", update.logic_formula.as_ref());
        set.list("target_tables", update.target_tables.as_ref())?;
        set.text("target_users", update.target_users.as_ref());
        set.text("related_insight", update.related_insight.as_ref());
        set.text("revenue_category", update.revenue_category.as_ref());
        set.text("icon_type", update.icon_type.as_ref());
        set.nullable("score", update.score.as_ref());
        set.text("relevance_policy", update.relevance_policy.as_ref());
        set.text("relevance_score", update.relevance_score.as_ref());
        set.integer("display_count", update.display_count);
        set.integer("select_count", update.select_count);
        set.text("next_policy", update.next_policy.as_ref());
        set.text("next_value", update.next_value.as_ref());
        set.text("app_link", update.app_link.as_ref());
        set.text("external_link", update.external_link.as_ref());
        set.nullable("teaser_image", update.teaser_image.as_ref());
        set.list("story_images", update.story_images.as_ref())?;
        if let Some(date) = &update.maintenance_date {
            let date = date
                .as_deref()
                .filter(|d| !d.is_empty())
                .unwrap_or(NO_MAINTENANCE_DATE);
            set.push("maintenance_date", libsql::Value::Text(date.to_string()));
        }
        set.text("maintenance_reason", update.maintenance_reason.as_ref());
        set.text("remarks", update.remarks.as_ref());
        set.text("updated_by", update.updated_by.as_ref());
        set.push("updated_at", libsql::Value::Text(Utc::now().to_rfc3339()));

        set.params.push(libsql::Value::Integer(id));
        let sql = format!(
            "UPDATE insights SET {} WHERE id = ?{}",
            set.sets.join(", "),
            set.params.len()
        );

        let changed = self
            .conn()
            .execute(&sql, libsql::params_from_iter(set.params))
            .await?;
        if changed == 0 {
            return Err(DatabaseError::NoResult);
        }

        self.get_insight(id).await
    }

    /// Delete an insight by id. Deleting a missing id is not an error.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the DELETE fails.
    pub async fn delete_insight(&self, id: i64) -> Result<(), DatabaseError> {
        let deleted = self
            .conn()
            .execute("DELETE FROM insights WHERE id = ?1", [id])
            .await?;
        tracing::debug!(id, deleted, "insight delete");
        Ok(())
    }
}
