use chrono::{NaiveDate, NaiveDateTime};
use order_bot::model::{Actor, ResetOutcome, Summary};
use order_bot::service::{ManualClock, OrderError, OrderService};
use order_store::mock::{create_mock_client, expect_list, expect_remove, MockStore};
use order_store::{Day, OrderRecord, StoreError, UserId};
use std::sync::Arc;

fn at(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 16)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

fn record(user_id: i64, name: &str, text: &str, written_at: NaiveDateTime) -> OrderRecord {
    OrderRecord {
        day: Day::of(written_at),
        user_id: UserId(user_id),
        display_name: name.to_string(),
        order_text: text.to_string(),
        written_at,
    }
}

#[tokio::test]
async fn place_order_stores_trimmed_text_and_display_name() {
    let mut mock = MockStore::new();
    mock.expect_upsert().return_ok(());

    let service = OrderService::new(Arc::new(mock.client()), Arc::new(ManualClock::new(at(11, 30))));
    let alice = Actor::new(7).with_handle("alice").with_given_name("Alice");

    let confirmation = service.place_order(&alice, "  Pizza Margherita \n").await.unwrap();
    assert_eq!(confirmation.order_text, "Pizza Margherita");
    assert_eq!(confirmation.display_name, "@alice");

    let stored = mock.upserted();
    assert_eq!(stored, vec![record(7, "@alice", "Pizza Margherita", at(11, 30))]);
    mock.verify();
}

#[tokio::test]
async fn blank_order_never_reaches_the_store() {
    let mock = MockStore::new();
    let service = OrderService::new(Arc::new(mock.client()), Arc::new(ManualClock::new(at(11, 30))));

    let result = service.place_order(&Actor::new(7), "   ").await;
    assert_eq!(result, Err(OrderError::EmptyOrder));
    assert!(mock.upserted().is_empty());
    mock.verify();
}

#[tokio::test]
async fn storage_failure_is_reported_not_retried() {
    let mut mock = MockStore::new();
    mock.expect_upsert()
        .return_err(StoreError::unavailable("connection refused"));

    let service = OrderService::new(Arc::new(mock.client()), Arc::new(ManualClock::new(at(11, 30))));
    let result = service.place_order(&Actor::new(7), "Pizza").await;

    assert_eq!(
        result,
        Err(OrderError::StorageUnavailable("connection refused".into()))
    );
    assert_eq!(mock.upserted().len(), 1);
    mock.verify();
}

#[tokio::test]
async fn summary_sorts_by_write_time_then_user() {
    let mut mock = MockStore::new();
    mock.expect_list().return_ok(vec![
        record(3, "Carol", "Ramen", at(12, 10)),
        record(2, "Bob", "Salad", at(12, 0)),
        record(1, "@alice", "Tacos", at(12, 0)),
    ]);

    let service = OrderService::new(Arc::new(mock.client()), Arc::new(ManualClock::new(at(13, 0))));
    let summary = service.summarize_today().await.unwrap();

    let order: Vec<&str> = summary
        .entries()
        .iter()
        .map(|e| e.order_text.as_str())
        .collect();
    assert_eq!(order, ["Tacos", "Salad", "Ramen"]);
    assert_eq!(summary.day().to_string(), "2026-10-16");
    mock.verify();
}

#[tokio::test]
async fn empty_day_is_reported_explicitly() {
    let mut mock = MockStore::new();
    mock.expect_list().return_ok(Vec::new());

    let service = OrderService::new(Arc::new(mock.client()), Arc::new(ManualClock::new(at(13, 0))));
    let day: Day = "2026-10-01".parse().unwrap();

    assert_eq!(
        service.summarize(day).await.unwrap(),
        Summary::NoOrders { day }
    );
    mock.verify();
}

#[tokio::test]
async fn reset_targets_today_and_the_acting_user() {
    let (client, mut receiver) = create_mock_client(4);
    let service = OrderService::new(Arc::new(client), Arc::new(ManualClock::new(at(9, 0))));

    let responder = tokio::spawn(async move {
        let (day, user_id, respond_to) = expect_remove(&mut receiver).await.unwrap();
        respond_to.send(Ok(false)).unwrap();
        (day, user_id)
    });

    let outcome = service.reset_order(&Actor::new(99)).await.unwrap();
    assert_eq!(outcome, ResetOutcome::NothingToRemove);

    let (day, user_id) = responder.await.unwrap();
    assert_eq!(day.to_string(), "2026-10-16");
    assert_eq!(user_id, UserId(99));
}

#[tokio::test]
async fn summary_asks_for_the_requested_day() {
    let (client, mut receiver) = create_mock_client(4);
    let service = OrderService::new(Arc::new(client), Arc::new(ManualClock::new(at(9, 0))));
    let wanted: Day = "2026-09-30".parse().unwrap();

    let responder = tokio::spawn(async move {
        let (day, respond_to) = expect_list(&mut receiver).await.unwrap();
        respond_to.send(Ok(Vec::new())).unwrap();
        day
    });

    service.summarize(wanted).await.unwrap();
    assert_eq!(responder.await.unwrap(), wanted);
}
