use order_store::mock::{create_mock_client, expect_list, expect_remove, expect_upsert};
use order_store::{Day, OrderRecord, PartitionActor, RecordStore, StoreError, UserId};
use std::time::Duration;

fn day() -> Day {
    "2026-10-16".parse().unwrap()
}

fn record(user: i64, text: &str, second: u32) -> OrderRecord {
    OrderRecord {
        day: day(),
        user_id: UserId(user),
        display_name: format!("User {user}"),
        order_text: text.to_string(),
        written_at: day().date().and_hms_opt(12, 0, second).unwrap(),
    }
}

/// Full lifecycle against the real actor: create, overwrite, list, remove, shutdown.
#[tokio::test]
async fn test_partition_actor_full_lifecycle() {
    let (actor, client) = PartitionActor::new(10, Duration::from_secs(1));
    let handle = tokio::spawn(actor.run());

    // 1. Empty partition
    assert!(client.list(&day()).await.unwrap().is_empty());

    // 2. Two users write
    client.upsert(record(1, "Tacos", 1)).await.unwrap();
    client.upsert(record(2, "Salad", 2)).await.unwrap();

    // 3. First user rewrites
    let mut rewrite = record(1, "Burrito", 3);
    rewrite.display_name = "@renamed".to_string();
    client.upsert(rewrite.clone()).await.unwrap();

    let mut records = client.list(&day()).await.unwrap();
    records.sort_by_key(|r| r.user_id);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0], rewrite);
    assert_eq!(records[1].order_text, "Salad");

    // 4. Remove
    assert!(client.remove(&day(), UserId(2)).await.unwrap());
    assert_eq!(client.list(&day()).await.unwrap(), vec![rewrite]);

    // 5. Shutdown once the last client is gone
    drop(client);
    handle.await.unwrap();
}

/// Many concurrent writers: each user ends with exactly their final write.
#[tokio::test]
async fn test_concurrent_upserts_keep_last_write_per_user() {
    let (actor, client) = PartitionActor::new(8, Duration::from_secs(5));
    tokio::spawn(actor.run());

    let mut handles = vec![];
    for user in 1..=5 {
        let client = client.clone();
        handles.push(tokio::spawn(async move {
            // Sequential per user, interleaved across users.
            for n in 0..20u32 {
                client
                    .upsert(record(user, &format!("order-{n}"), n))
                    .await
                    .unwrap();
                tokio::task::yield_now().await;
            }
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let records = client.list(&day()).await.unwrap();
    assert_eq!(records.len(), 5);
    for record in records {
        assert_eq!(record.order_text, "order-19");
    }
}

/// A closed actor surfaces as StorageUnavailable, not a panic.
#[tokio::test]
async fn test_closed_actor_is_storage_unavailable() {
    let (actor, client) = PartitionActor::new(10, Duration::from_secs(1));
    drop(actor);

    let err = client.upsert(record(1, "Pizza", 0)).await.unwrap_err();
    assert!(matches!(err, StoreError::StorageUnavailable(_)));
}

/// A store that never answers is cut off by the request timeout.
#[tokio::test]
async fn test_stalled_store_times_out() {
    let (sender, _receiver) = tokio::sync::mpsc::channel(10);
    let client = order_store::StoreClient::new(sender, Duration::from_millis(50));

    let err = client.list(&day()).await.unwrap_err();
    match err {
        StoreError::StorageUnavailable(reason) => assert!(reason.contains("50ms")),
        other => panic!("unexpected error: {other:?}"),
    }
}

/// Hand-driven requests: the client sends exactly what the caller passed.
#[tokio::test]
async fn test_client_sends_requests_verbatim() {
    let (client, mut receiver) = create_mock_client(10);

    let task = tokio::spawn({
        let client = client.clone();
        async move {
            client.upsert(record(9, "Ramen", 0)).await.unwrap();
            let removed = client.remove(&day(), UserId(9)).await.unwrap();
            let listed = client.list(&day()).await.unwrap();
            (removed, listed)
        }
    });

    let (sent, responder) = expect_upsert(&mut receiver).await.expect("upsert");
    assert_eq!(sent, record(9, "Ramen", 0));
    responder.send(Ok(())).unwrap();

    let (sent_day, user_id, responder) = expect_remove(&mut receiver).await.expect("remove");
    assert_eq!((sent_day, user_id), (day(), UserId(9)));
    responder.send(Ok(true)).unwrap();

    let (sent_day, responder) = expect_list(&mut receiver).await.expect("list");
    assert_eq!(sent_day, day());
    responder.send(Ok(vec![])).unwrap();

    let (removed, listed) = task.await.unwrap();
    assert!(removed);
    assert!(listed.is_empty());
}
