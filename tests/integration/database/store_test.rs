//! PostgreSQL location store tests

use assert_matches::assert_matches;
use safetrack::backend::location::store::{LocationStore, PgLocationStore, StorageError};
use safetrack::shared::{LocationReport, ProducerId};

use crate::common::{test_pool, unique_producer};

#[tokio::test]
async fn test_persist_and_query_in_timestamp_order() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let store = PgLocationStore::new(pool);
    let producer = unique_producer();

    for timestamp in [3000, 1000, 2000] {
        let report = LocationReport::new(producer.as_str(), "child:1", 10.0, 20.0, timestamp);
        store.persist(&report).await.unwrap();
    }

    let history = store.query_by_producer(&ProducerId::from(producer.as_str())).await.unwrap();
    let timestamps: Vec<i64> = history.iter().map(|r| r.timestamp).collect();
    assert_eq!(timestamps, vec![1000, 2000, 3000]);
}

#[tokio::test]
async fn test_duplicate_key_is_storage_failure() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let store = PgLocationStore::new(pool);
    let producer = unique_producer();
    let report = LocationReport::new(producer.as_str(), "child:1", 10.0, 20.0, 1000);

    store.persist(&report).await.unwrap();
    let err = store.persist(&report).await.unwrap_err();

    assert_matches!(err, StorageError::Duplicate { timestamp: 1000, .. });
}

#[tokio::test]
async fn test_query_unknown_producer_is_empty() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let store = PgLocationStore::new(pool);

    let history = store
        .query_by_producer(&ProducerId::from(unique_producer().as_str()))
        .await
        .unwrap();
    assert!(history.is_empty());
}
