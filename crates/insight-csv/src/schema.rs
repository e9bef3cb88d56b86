//! The CSV column layout shared by import and export.
//!
//! [`COLUMNS`] is the single source of truth for column order, exported
//! header labels, and how each raw cell is decoded on import. The importer
//! walks it by position; the exporter renders it in order.

use insight_core::entities::{Insight, InsightData, NO_MAINTENANCE_DATE};

use crate::lenient::best_effort_list;

/// Number of columns in a well-formed row.
pub const COLUMN_COUNT: usize = 34;

/// A record field addressed by a CSV column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Id,
    CreationNumber,
    Subject,
    InsightId,
    Status,
    StartDate,
    UpdateDate,
    EndDate,
    InsightType,
    MainCategory,
    SubCategory,
    DataCategory,
    TargetBanks,
    LogicFormula,
    TargetTables,
    TargetUsers,
    RelatedInsight,
    RevenueCategory,
    IconType,
    Score,
    RelevancePolicy,
    RelevanceScore,
    DisplayCount,
    SelectCount,
    NextPolicy,
    NextValue,
    AppLink,
    ExternalLink,
    TeaserImage,
    StoryImages,
    MaintenanceDate,
    MaintenanceReason,
    Remarks,
    UpdatedBy,
}

/// How a raw cell is decoded on import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Read but never stored.
    Ignored,
    /// Taken verbatim, empty allowed.
    Text,
    /// Lenient leading-integer parse; unparseable cells take the default.
    Integer { default: i64 },
    /// Empty becomes null.
    Nullable,
    /// JSON array of strings, decoded best-effort.
    JsonList,
    /// Empty becomes the given placeholder value.
    Sentinel(&'static str),
}

/// A decoded cell, ready to be assigned to its field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Skip,
    Text(String),
    Integer(i64),
    Nullable(Option<String>),
    List(Vec<String>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub field: Field,
    pub header: &'static str,
    pub rule: Rule,
}

const fn col(field: Field, header: &'static str, rule: Rule) -> Column {
    Column {
        field,
        header,
        rule,
    }
}

/// Column layout in CSV order. The index of an entry is its CSV position.
pub const COLUMNS: [Column; COLUMN_COUNT] = [
    col(Field::Id, "ID", Rule::Ignored),
    col(Field::CreationNumber, "作成番号", Rule::Integer { default: 1 }),
    col(Field::Subject, "インサイト件名", Rule::Text),
    col(Field::InsightId, "インサイトID", Rule::Text),
    col(Field::Status, "表示ステータス", Rule::Text),
    col(Field::StartDate, "配信開始日", Rule::Nullable),
    col(Field::UpdateDate, "更新日", Rule::Nullable),
    col(Field::EndDate, "配信停止日", Rule::Nullable),
    col(Field::InsightType, "インサイトタイプ", Rule::Text),
    col(Field::MainCategory, "メインカテゴリ", Rule::Text),
    col(Field::SubCategory, "サブカテゴリ", Rule::Text),
    col(Field::DataCategory, "データカテゴリ", Rule::Text),
    col(Field::TargetBanks, "対象銀行", Rule::JsonList),
    col(Field::LogicFormula, "表示ロジック", Rule::Text),
    col(Field::TargetTables, "使用データテーブル", Rule::JsonList),
    col(Field::TargetUsers, "対象ユーザー", Rule::Text),
    col(Field::RelatedInsight, "関連インサイト", Rule::Text),
    col(Field::RevenueCategory, "収益カテゴリ", Rule::Text),
    col(Field::IconType, "アイコンタイプ", Rule::Text),
    col(Field::Score, "スコア", Rule::Nullable),
    col(Field::RelevancePolicy, "関連性ポリシー", Rule::Text),
    col(Field::RelevanceScore, "関連性スコア", Rule::Text),
    col(Field::DisplayCount, "表示回数", Rule::Integer { default: 0 }),
    col(Field::SelectCount, "選択回数", Rule::Integer { default: 0 }),
    col(Field::NextPolicy, "次回表示ポリシー", Rule::Text),
    col(Field::NextValue, "次回表示設定値", Rule::Text),
    col(Field::AppLink, "アプリ内遷移先", Rule::Text),
    col(Field::ExternalLink, "外部遷移先", Rule::Text),
    col(Field::TeaserImage, "ティーザー画像", Rule::Nullable),
    col(Field::StoryImages, "ストーリー画像", Rule::JsonList),
    col(
        Field::MaintenanceDate,
        "次回メンテナンス日",
        Rule::Sentinel(NO_MAINTENANCE_DATE),
    ),
    col(Field::MaintenanceReason, "メンテナンス理由", Rule::Text),
    col(Field::Remarks, "備考", Rule::Text),
    col(Field::UpdatedBy, "更新者", Rule::Text),
];

/// Header labels in column order.
pub fn headers() -> impl Iterator<Item = &'static str> {
    COLUMNS.iter().map(|column| column.header)
}

/// Apply one import rule to a raw cell.
#[must_use]
pub fn decode_cell(rule: Rule, raw: &str) -> Cell {
    match rule {
        Rule::Ignored => Cell::Skip,
        Rule::Text => Cell::Text(raw.to_string()),
        Rule::Integer { default } => Cell::Integer(parse_leading_int(raw).unwrap_or(default)),
        Rule::Nullable => Cell::Nullable((!raw.is_empty()).then(|| raw.to_string())),
        Rule::JsonList => Cell::List(best_effort_list(raw)),
        Rule::Sentinel(placeholder) => Cell::Text(if raw.is_empty() {
            placeholder.to_string()
        } else {
            raw.to_string()
        }),
    }
}

/// Assign a decoded cell to its field.
pub fn apply(data: &mut InsightData, field: Field, cell: Cell) {
    match (field, cell) {
        (_, Cell::Skip) | (Field::Id, _) => {}
        (Field::CreationNumber, Cell::Integer(n)) => data.creation_number = n,
        (Field::DisplayCount, Cell::Integer(n)) => data.display_count = n,
        (Field::SelectCount, Cell::Integer(n)) => data.select_count = n,
        (Field::Subject, Cell::Text(v)) => data.subject = v,
        (Field::InsightId, Cell::Text(v)) => data.insight_id = v,
        (Field::Status, Cell::Text(v)) => data.status = v,
        (Field::InsightType, Cell::Text(v)) => data.insight_type = v,
        (Field::MainCategory, Cell::Text(v)) => data.main_category = v,
        (Field::SubCategory, Cell::Text(v)) => data.sub_category = v,
        (Field::DataCategory, Cell::Text(v)) => data.data_category = v,
        (Field::LogicFormula, Cell::Text(v)) => data.logic_formula = v,
        (Field::TargetUsers, Cell::Text(v)) => data.target_users = v,
        (Field::RelatedInsight, Cell::Text(v)) => data.related_insight = v,
        (Field::RevenueCategory, Cell::Text(v)) => data.revenue_category = v,
        (Field::IconType, Cell::Text(v)) => data.icon_type = v,
        (Field::RelevancePolicy, Cell::Text(v)) => data.relevance_policy = v,
        (Field::RelevanceScore, Cell::Text(v)) => data.relevance_score = v,
        (Field::NextPolicy, Cell::Text(v)) => data.next_policy = v,
        (Field::NextValue, Cell::Text(v)) => data.next_value = v,
        (Field::AppLink, Cell::Text(v)) => data.app_link = v,
        (Field::ExternalLink, Cell::Text(v)) => data.external_link = v,
        (Field::MaintenanceDate, Cell::Text(v)) => data.maintenance_date = v,
        (Field::MaintenanceReason, Cell::Text(v)) => data.maintenance_reason = v,
        (Field::Remarks, Cell::Text(v)) => data.remarks = v,
        (Field::UpdatedBy, Cell::Text(v)) => data.updated_by = v,
        (Field::StartDate, Cell::Nullable(v)) => data.start_date = v,
        (Field::UpdateDate, Cell::Nullable(v)) => data.update_date = v,
        (Field::EndDate, Cell::Nullable(v)) => data.end_date = v,
        (Field::Score, Cell::Nullable(v)) => data.score = v,
        (Field::TeaserImage, Cell::Nullable(v)) => data.teaser_image = v,
        (Field::TargetBanks, Cell::List(v)) => data.target_banks = v,
        (Field::TargetTables, Cell::List(v)) => data.target_tables = v,
        (Field::StoryImages, Cell::List(v)) => data.story_images = v,
        (field, cell) => {
            tracing::error!(?field, ?cell, "decoded cell does not fit its field");
            debug_assert!(false, "column rule for {field:?} produced {cell:?}");
        }
    }
}

/// Render one field for export. `None` marks a null scalar.
#[must_use]
pub fn render(insight: &Insight, field: Field) -> Option<String> {
    let data = &insight.data;
    let text = |value: &String| Some(value.clone());
    match field {
        Field::Id => Some(insight.id.to_string()),
        Field::CreationNumber => Some(data.creation_number.to_string()),
        Field::DisplayCount => Some(data.display_count.to_string()),
        Field::SelectCount => Some(data.select_count.to_string()),
        Field::Subject => text(&data.subject),
        Field::InsightId => text(&data.insight_id),
        Field::Status => text(&data.status),
        Field::InsightType => text(&data.insight_type),
        Field::MainCategory => text(&data.main_category),
        Field::SubCategory => text(&data.sub_category),
        Field::DataCategory => text(&data.data_category),
        Field::LogicFormula => text(&data.logic_formula),
        Field::TargetUsers => text(&data.target_users),
        Field::RelatedInsight => text(&data.related_insight),
        Field::RevenueCategory => text(&data.revenue_category),
        Field::IconType => text(&data.icon_type),
        Field::RelevancePolicy => text(&data.relevance_policy),
        Field::RelevanceScore => text(&data.relevance_score),
        Field::NextPolicy => text(&data.next_policy),
        Field::NextValue => text(&data.next_value),
        Field::AppLink => text(&data.app_link),
        Field::ExternalLink => text(&data.external_link),
        Field::MaintenanceDate => text(&data.maintenance_date),
        Field::MaintenanceReason => text(&data.maintenance_reason),
        Field::Remarks => text(&data.remarks),
        Field::UpdatedBy => text(&data.updated_by),
        Field::StartDate => data.start_date.clone(),
        Field::UpdateDate => data.update_date.clone(),
        Field::EndDate => data.end_date.clone(),
        Field::Score => data.score.clone(),
        Field::TeaserImage => data.teaser_image.clone(),
        Field::TargetBanks => Some(list_json(&data.target_banks)),
        Field::TargetTables => Some(list_json(&data.target_tables)),
        Field::StoryImages => Some(list_json(&data.story_images)),
    }
}

fn list_json(items: &[String]) -> String {
    serde_json::Value::from(items.to_vec()).to_string()
}

/// Read an optionally signed run of leading ASCII digits, ignoring leading
/// whitespace and anything after the digits. `None` when there are no
/// digits or the value overflows.
fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if end == 0 {
        return None;
    }
    let value: i64 = rest[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}
