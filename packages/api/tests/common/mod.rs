use chrono::NaiveDate;
use eventlift_api::entity::prelude::*;
use eventlift_api::entity::{legacy_event, marketing_event};
use sea_orm::{
    ActiveModelTrait, ConnectOptions, ConnectionTrait, Database, DatabaseConnection, EntityTrait,
    Schema, Set,
};

/// In-memory database with both table generations created from the entities.
pub async fn setup_db() -> DatabaseConnection {
    // A single connection keeps the in-memory database alive across queries.
    let mut opt = ConnectOptions::new("sqlite::memory:".to_owned());
    opt.max_connections(1).sqlx_logging(false);

    let db = Database::connect(opt).await.expect("in-memory database");

    create_table(&db, MarketingEvent).await;
    create_table(&db, MarketingEventDetails).await;
    create_table(&db, MarketingEventExpenses).await;
    create_table(&db, MarketingEventAttendance).await;
    create_table(&db, MarketingEventAppointments).await;
    create_table(&db, MarketingEventProduction).await;

    create_table(&db, LegacyEvent).await;
    create_table(&db, LegacyEventDetails).await;
    create_table(&db, LegacyEventExpenses).await;
    create_table(&db, LegacyEventAttendance).await;
    create_table(&db, LegacyEventAppointments).await;
    create_table(&db, LegacyEventProduction).await;

    db
}

async fn create_table<E: EntityTrait>(db: &DatabaseConnection, entity: E) {
    let builder = db.get_database_backend();
    let mut table = Schema::new(builder).create_table_from_entity(entity);
    table.if_not_exists();
    db.execute(builder.build(&table)).await.expect("create table");
}

pub fn naive(date: (i32, u32, u32)) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap()
}

pub async fn seed_current_event(
    db: &DatabaseConnection,
    id: &str,
    user_id: &str,
    name: &str,
    date: (i32, u32, u32),
) -> marketing_event::Model {
    marketing_event::ActiveModel {
        id: Set(id.to_string()),
        user_id: Set(user_id.to_string()),
        name: Set(name.to_string()),
        event_date: Set(naive(date)),
        location: Set(None),
        marketing_type: Set("seminar".to_string()),
        topic: Set(None),
        created_at: Set(chrono::Utc::now().naive_utc()),
        updated_at: Set(chrono::Utc::now().naive_utc()),
    }
    .insert(db)
    .await
    .expect("seed current event")
}

pub async fn seed_legacy_event(
    db: &DatabaseConnection,
    id: &str,
    user_id: &str,
    name: &str,
    date: (i32, u32, u32),
) -> legacy_event::Model {
    legacy_event::ActiveModel {
        id: Set(id.to_string()),
        user_id: Set(user_id.to_string()),
        name: Set(name.to_string()),
        date: Set(naive(date)),
        location: Set(None),
        event_type: Set("seminar".to_string()),
        topic: Set(None),
        created_at: Set(chrono::Utc::now().naive_utc()),
    }
    .insert(db)
    .await
    .expect("seed legacy event")
}
