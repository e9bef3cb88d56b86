//! Record store integration tests against an on-disk database.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use insight_core::entities::InsightData;
use insight_core::store::InsightStore;
use insight_db::InsightDb;
use insight_db::error::DatabaseError;
use insight_db::repos::insight::InsightFilter;
use insight_db::updates::insight::InsightUpdateBuilder;

fn data(insight_id: &str) -> InsightData {
    InsightData {
        subject: format!("Subject for {insight_id}"),
        insight_id: insight_id.to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn records_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("insights.db");
    let path = path.to_str().unwrap();

    {
        let db = InsightDb::open_local(path).await.unwrap();
        db.create_insight(&data("INS-1")).await.unwrap();
        db.create_insight(&data("INS-2")).await.unwrap();
    }

    let reopened = InsightDb::open_local(path).await.unwrap();
    let all = reopened.list_all().await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[1].data.insight_id, "INS-2");
}

#[tokio::test]
async fn store_trait_inserts_and_selects() {
    let db = InsightDb::open_local(":memory:").await.unwrap();

    let first = db.insert(&data("INS-A")).await.unwrap();
    let second = db.insert(&data("INS-B")).await.unwrap();
    assert!(second.id > first.id);

    let all = db.select_all().await.unwrap();
    assert_eq!(all, vec![first, second]);
}

#[tokio::test]
async fn creation_number_filter_is_exact() {
    let db = InsightDb::open_local(":memory:").await.unwrap();
    db.create_insight(&InsightData {
        creation_number: 12,
        ..data("INS-12")
    })
    .await
    .unwrap();
    db.create_insight(&InsightData {
        creation_number: 1,
        ..data("INS-1")
    })
    .await
    .unwrap();

    let filter = InsightFilter {
        creation_number: Some(12),
        ..Default::default()
    };
    let found = db.list_insights(&filter).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].data.insight_id, "INS-12");
}

#[tokio::test]
async fn update_after_delete_is_no_result() {
    let db = InsightDb::open_local(":memory:").await.unwrap();
    let created = db.create_insight(&data("INS-1")).await.unwrap();
    db.delete_insight(created.id).await.unwrap();

    let update = InsightUpdateBuilder::new().remarks("late edit").build();
    assert!(matches!(
        db.update_insight(created.id, &update).await,
        Err(DatabaseError::NoResult)
    ));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_return_their_own_rows() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("insights.db");
    let db = Arc::new(InsightDb::open_local(path.to_str().unwrap()).await.unwrap());

    let mut handles = Vec::new();
    for task in 0..8 {
        let db = Arc::clone(&db);
        handles.push(tokio::spawn(async move {
            let mut mismatched = Vec::new();
            for n in 0..50 {
                let insight_id = format!("INS-{task}-{n}");
                let created = db.create_insight(&data(&insight_id)).await.unwrap();
                if created.data.insight_id != insight_id {
                    mismatched.push((insight_id, created.data.insight_id));
                }
            }
            mismatched
        }));
    }

    for handle in handles {
        assert_eq!(handle.await.unwrap(), Vec::<(String, String)>::new());
    }
    assert_eq!(db.list_all().await.unwrap().len(), 400);
}
