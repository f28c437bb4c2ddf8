mod common;

use common::{naive, seed_current_event, seed_legacy_event, setup_db};
use eventlift_api::axum::http::StatusCode;
use eventlift_api::entity::prelude::{
    LegacyEvent, LegacyEventAttendance, MarketingEvent, MarketingEventAppointments,
    MarketingEventAttendance, MarketingEventDetails, MarketingEventExpenses,
    MarketingEventProduction,
};
use eventlift_api::error::ApiError;
use eventlift_api::metrics;
use eventlift_api::records::resolver::EventResolver;
use eventlift_api::records::write::{self, EventInput, EventPatch};
use eventlift_api::records::{
    EventAppointments, EventAttendance, EventDetails, EventExpenses, EventProduction,
    SchemaGeneration,
};
use eventlift_api::retry::RetryPolicy;
use sea_orm::{EntityTrait, TransactionTrait};

fn base_input(name: &str) -> EventInput {
    EventInput {
        name: name.into(),
        event_date: naive((2025, 5, 20)),
        location: None,
        marketing_type: "seminar".into(),
        topic: None,
        details: EventDetails::default(),
        expenses: EventExpenses::default(),
        attendance: EventAttendance::default(),
        appointments: EventAppointments::default(),
        production: EventProduction::default(),
    }
}

#[tokio::test]
async fn created_events_round_trip_with_derived_metrics() {
    let db = setup_db().await;

    let mut input = base_input("Dinner Seminar");
    input.location = Some("Riverside Grill".into());
    input.topic = Some("Retirement Income".into());
    input.expenses = EventExpenses {
        advertising_cost: Some(500.0),
        food_venue_cost: Some(1000.0),
        ..Default::default()
    };
    input.attendance = EventAttendance {
        registrant_responses: Some(100),
        confirmations: Some(80),
        attendees: Some(60),
        clients_from_event: Some(12),
    };
    input.production = EventProduction {
        annuity_premium: Some(20000.0),
        life_insurance_premium: Some(10000.0),
        aum_total: Some(0.0),
        financial_planning_fees: Some(0.0),
        ..Default::default()
    };

    let event_id = write::insert_event(&db, "user-1", &input).await.unwrap();

    let bundle = EventResolver::new(db.clone(), RetryPolicy::default())
        .bundle_for_event(&event_id, "user-1")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(bundle.event.name, "Dinner Seminar");
    assert_eq!(bundle.event.generation, SchemaGeneration::Current);
    assert_eq!(bundle.attendance.attendees, Some(60));

    let derived = metrics::derive_metrics(&bundle);
    assert_eq!(derived.total_expenses, 1500.0);
    assert_eq!(derived.total_income, 30000.0);
    assert_eq!(derived.roi, 1900.0);
    assert_eq!(derived.registration_to_attendance, 60.0);
    assert_eq!(derived.conversion_rate, 20.0);
    assert_eq!(derived.expense_per_client, 125.0);
}

#[tokio::test]
async fn a_bare_payload_still_creates_every_satellite_row() {
    let db = setup_db().await;

    write::insert_event(&db, "user-1", &base_input("Bare"))
        .await
        .unwrap();

    assert_eq!(MarketingEventDetails::find().all(&db).await.unwrap().len(), 1);
    assert_eq!(MarketingEventExpenses::find().all(&db).await.unwrap().len(), 1);
    assert_eq!(
        MarketingEventAttendance::find().all(&db).await.unwrap().len(),
        1
    );
    assert_eq!(
        MarketingEventAppointments::find()
            .all(&db)
            .await
            .unwrap()
            .len(),
        1
    );
    assert_eq!(
        MarketingEventProduction::find().all(&db).await.unwrap().len(),
        1
    );
}

#[tokio::test]
async fn updates_stay_in_the_owning_generation() {
    let db = setup_db().await;
    seed_legacy_event(&db, "evt-old", "user-1", "Before", (2024, 9, 1)).await;

    let patch = EventPatch {
        name: Some("After".into()),
        attendance: Some(EventAttendance {
            attendees: Some(42),
            ..Default::default()
        }),
        ..Default::default()
    };
    write::update_event(&db, SchemaGeneration::Legacy, "evt-old", &patch)
        .await
        .unwrap();

    let row = LegacyEvent::find_by_id("evt-old")
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.name, "After");

    let stored = LegacyEventAttendance::find().all(&db).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].attendees, Some(42));

    // Nothing was migrated to the current tables.
    assert!(MarketingEvent::find().all(&db).await.unwrap().is_empty());
}

#[tokio::test]
async fn patching_a_missing_satellite_inserts_then_updates_it() {
    let db = setup_db().await;
    seed_current_event(&db, "evt-1", "user-1", "Sparse", (2025, 1, 15)).await;

    let patch = EventPatch {
        expenses: Some(EventExpenses {
            total_cost: Some(750.0),
            ..Default::default()
        }),
        ..Default::default()
    };
    write::update_event(&db, SchemaGeneration::Current, "evt-1", &patch)
        .await
        .unwrap();

    let rows = MarketingEventExpenses::find().all(&db).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].total_cost, Some(750.0));

    let patch = EventPatch {
        expenses: Some(EventExpenses {
            total_cost: Some(900.0),
            ..Default::default()
        }),
        ..Default::default()
    };
    write::update_event(&db, SchemaGeneration::Current, "evt-1", &patch)
        .await
        .unwrap();

    let rows = MarketingEventExpenses::find().all(&db).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].total_cost, Some(900.0));
}

#[tokio::test]
async fn updating_a_vanished_event_reads_as_not_found() {
    let db = setup_db().await;
    seed_current_event(&db, "evt-1", "user-1", "Short Lived", (2025, 4, 2)).await;
    write::delete_event(&db, SchemaGeneration::Current, "evt-1")
        .await
        .unwrap();

    // Same shape as the update handler: the event resolved a moment ago but
    // the row is gone by the time the transaction runs.
    let patch = EventPatch {
        name: Some("Renamed".into()),
        ..Default::default()
    };
    let error = db
        .transaction::<_, (), ApiError>(|txn| {
            Box::pin(async move {
                Ok(write::update_event(txn, SchemaGeneration::Current, "evt-1", &patch).await?)
            })
        })
        .await
        .expect_err("the row is gone");
    assert_eq!(ApiError::from(error).status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_removes_the_event_and_its_satellites() {
    let db = setup_db().await;

    let mut input = base_input("Doomed");
    input.expenses = EventExpenses {
        total_cost: Some(100.0),
        ..Default::default()
    };
    let event_id = write::insert_event(&db, "user-1", &input).await.unwrap();

    let deleted = write::delete_event(&db, SchemaGeneration::Current, &event_id)
        .await
        .unwrap();
    assert_eq!(deleted, 1);

    let resolver = EventResolver::new(db.clone(), RetryPolicy::default());
    assert!(
        resolver
            .resolve_event(&event_id, "user-1")
            .await
            .unwrap()
            .is_none()
    );
    assert!(
        MarketingEventExpenses::find()
            .all(&db)
            .await
            .unwrap()
            .is_empty()
    );
    assert!(
        MarketingEventAttendance::find()
            .all(&db)
            .await
            .unwrap()
            .is_empty()
    );

    // Deleting an id that is already gone is a no-op.
    let deleted = write::delete_event(&db, SchemaGeneration::Current, &event_id)
        .await
        .unwrap();
    assert_eq!(deleted, 0);
}

#[tokio::test]
async fn failed_transactions_leave_no_partial_rows() {
    let db = setup_db().await;
    let input = base_input("Never Committed");

    let result = db
        .transaction::<_, String, ApiError>(|txn| {
            Box::pin(async move {
                write::insert_event(txn, "user-1", &input).await?;
                Err(ApiError::bad_request("forced failure"))
            })
        })
        .await;
    assert!(result.is_err());

    assert!(MarketingEvent::find().all(&db).await.unwrap().is_empty());
    assert!(
        MarketingEventExpenses::find()
            .all(&db)
            .await
            .unwrap()
            .is_empty()
    );
}
