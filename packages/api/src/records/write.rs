//! Write paths for both table generations.
//!
//! New events always land in the current tables. Updates and deletes stay in
//! the generation that owns the row; legacy events are edited in place, never
//! migrated. All helpers take a [`ConnectionTrait`] so handlers can run them
//! inside a transaction.

use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::entity::prelude::*;
use crate::entity::{
    legacy_event, legacy_event_appointments, legacy_event_attendance, legacy_event_details,
    legacy_event_expenses, legacy_event_production, marketing_event, marketing_event_appointments,
    marketing_event_attendance, marketing_event_details, marketing_event_expenses,
    marketing_event_production,
};
use crate::records::{
    EventAppointments, EventAttendance, EventDetails, EventExpenses, EventProduction,
    SchemaGeneration,
};

/// Payload for creating an event. Satellite sections default to empty, so a
/// bare core payload still creates all satellite rows.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventInput {
    pub name: String,
    pub event_date: NaiveDate,
    pub location: Option<String>,
    pub marketing_type: String,
    pub topic: Option<String>,
    #[serde(default)]
    pub details: EventDetails,
    #[serde(default)]
    pub expenses: EventExpenses,
    #[serde(default)]
    pub attendance: EventAttendance,
    #[serde(default)]
    pub appointments: EventAppointments,
    #[serde(default)]
    pub production: EventProduction,
}

/// Partial update. Core fields that are present overwrite the stored value;
/// a satellite section that is present replaces the whole satellite row.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPatch {
    pub name: Option<String>,
    pub event_date: Option<NaiveDate>,
    pub location: Option<String>,
    pub marketing_type: Option<String>,
    pub topic: Option<String>,
    pub details: Option<EventDetails>,
    pub expenses: Option<EventExpenses>,
    pub attendance: Option<EventAttendance>,
    pub appointments: Option<EventAppointments>,
    pub production: Option<EventProduction>,
}

impl EventPatch {
    fn touches_event_row(&self) -> bool {
        self.name.is_some()
            || self.event_date.is_some()
            || self.location.is_some()
            || self.marketing_type.is_some()
            || self.topic.is_some()
    }
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Inserts the event row plus all five satellite rows and returns the new id.
pub async fn insert_event<C>(db: &C, user_id: &str, input: &EventInput) -> Result<String, DbErr>
where
    C: ConnectionTrait,
{
    let event_id = new_id();
    let now = chrono::Utc::now().naive_utc();

    marketing_event::ActiveModel {
        id: Set(event_id.clone()),
        user_id: Set(user_id.to_string()),
        name: Set(input.name.clone()),
        event_date: Set(input.event_date),
        location: Set(input.location.clone()),
        marketing_type: Set(input.marketing_type.clone()),
        topic: Set(input.topic.clone()),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await?;

    insert_current_details(db, &event_id, &input.details).await?;
    insert_current_expenses(db, &event_id, &input.expenses).await?;
    insert_current_attendance(db, &event_id, &input.attendance).await?;
    insert_current_appointments(db, &event_id, &input.appointments).await?;
    insert_current_production(db, &event_id, &input.production).await?;

    Ok(event_id)
}

/// Applies a patch to an event that was already resolved to `generation`.
pub async fn update_event<C>(
    db: &C,
    generation: SchemaGeneration,
    event_id: &str,
    patch: &EventPatch,
) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    match generation {
        SchemaGeneration::Current => update_current_event(db, event_id, patch).await,
        SchemaGeneration::Legacy => update_legacy_event(db, event_id, patch).await,
    }
}

/// Removes the event and its satellite rows. Returns the number of deleted
/// event rows, which is zero when the id was already gone.
pub async fn delete_event<C>(
    db: &C,
    generation: SchemaGeneration,
    event_id: &str,
) -> Result<u64, DbErr>
where
    C: ConnectionTrait,
{
    match generation {
        SchemaGeneration::Current => {
            MarketingEventDetails::delete_many()
                .filter(marketing_event_details::Column::EventId.eq(event_id))
                .exec(db)
                .await?;
            MarketingEventExpenses::delete_many()
                .filter(marketing_event_expenses::Column::EventId.eq(event_id))
                .exec(db)
                .await?;
            MarketingEventAttendance::delete_many()
                .filter(marketing_event_attendance::Column::EventId.eq(event_id))
                .exec(db)
                .await?;
            MarketingEventAppointments::delete_many()
                .filter(marketing_event_appointments::Column::EventId.eq(event_id))
                .exec(db)
                .await?;
            MarketingEventProduction::delete_many()
                .filter(marketing_event_production::Column::EventId.eq(event_id))
                .exec(db)
                .await?;
            let result = MarketingEvent::delete_by_id(event_id).exec(db).await?;
            Ok(result.rows_affected)
        }
        SchemaGeneration::Legacy => {
            LegacyEventDetails::delete_many()
                .filter(legacy_event_details::Column::EventId.eq(event_id))
                .exec(db)
                .await?;
            LegacyEventExpenses::delete_many()
                .filter(legacy_event_expenses::Column::EventId.eq(event_id))
                .exec(db)
                .await?;
            LegacyEventAttendance::delete_many()
                .filter(legacy_event_attendance::Column::EventId.eq(event_id))
                .exec(db)
                .await?;
            LegacyEventAppointments::delete_many()
                .filter(legacy_event_appointments::Column::EventId.eq(event_id))
                .exec(db)
                .await?;
            LegacyEventProduction::delete_many()
                .filter(legacy_event_production::Column::EventId.eq(event_id))
                .exec(db)
                .await?;
            let result = LegacyEvent::delete_by_id(event_id).exec(db).await?;
            Ok(result.rows_affected)
        }
    }
}

async fn update_current_event<C>(db: &C, event_id: &str, patch: &EventPatch) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    // The event row is always touched so updated_at reflects satellite edits.
    let mut event = marketing_event::ActiveModel {
        id: Set(event_id.to_string()),
        updated_at: Set(chrono::Utc::now().naive_utc()),
        ..Default::default()
    };
    if let Some(name) = &patch.name {
        event.name = Set(name.clone());
    }
    if let Some(event_date) = patch.event_date {
        event.event_date = Set(event_date);
    }
    if let Some(location) = &patch.location {
        event.location = Set(Some(location.clone()));
    }
    if let Some(marketing_type) = &patch.marketing_type {
        event.marketing_type = Set(marketing_type.clone());
    }
    if let Some(topic) = &patch.topic {
        event.topic = Set(Some(topic.clone()));
    }
    event.update(db).await?;

    if let Some(details) = &patch.details {
        upsert_current_details(db, event_id, details).await?;
    }
    if let Some(expenses) = &patch.expenses {
        upsert_current_expenses(db, event_id, expenses).await?;
    }
    if let Some(attendance) = &patch.attendance {
        upsert_current_attendance(db, event_id, attendance).await?;
    }
    if let Some(appointments) = &patch.appointments {
        upsert_current_appointments(db, event_id, appointments).await?;
    }
    if let Some(production) = &patch.production {
        upsert_current_production(db, event_id, production).await?;
    }
    Ok(())
}

async fn update_legacy_event<C>(db: &C, event_id: &str, patch: &EventPatch) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    if patch.touches_event_row() {
        let mut event = legacy_event::ActiveModel {
            id: Set(event_id.to_string()),
            ..Default::default()
        };
        if let Some(name) = &patch.name {
            event.name = Set(name.clone());
        }
        if let Some(event_date) = patch.event_date {
            event.date = Set(event_date);
        }
        if let Some(location) = &patch.location {
            event.location = Set(Some(location.clone()));
        }
        if let Some(marketing_type) = &patch.marketing_type {
            event.event_type = Set(marketing_type.clone());
        }
        if let Some(topic) = &patch.topic {
            event.topic = Set(Some(topic.clone()));
        }
        event.update(db).await?;
    }

    if let Some(details) = &patch.details {
        upsert_legacy_details(db, event_id, details).await?;
    }
    if let Some(expenses) = &patch.expenses {
        upsert_legacy_expenses(db, event_id, expenses).await?;
    }
    if let Some(attendance) = &patch.attendance {
        upsert_legacy_attendance(db, event_id, attendance).await?;
    }
    if let Some(appointments) = &patch.appointments {
        upsert_legacy_appointments(db, event_id, appointments).await?;
    }
    if let Some(production) = &patch.production {
        upsert_legacy_production(db, event_id, production).await?;
    }
    Ok(())
}

async fn insert_current_details<C>(
    db: &C,
    event_id: &str,
    details: &EventDetails,
) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    marketing_event_details::ActiveModel {
        id: Set(new_id()),
        event_id: Set(event_id.to_string()),
        age_range: Set(details.age_range.clone()),
        mile_radius: Set(details.mile_radius),
        income_producing_assets: Set(details.income_producing_assets.clone()),
    }
    .insert(db)
    .await?;
    Ok(())
}

async fn upsert_current_details<C>(
    db: &C,
    event_id: &str,
    details: &EventDetails,
) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    let existing = MarketingEventDetails::find()
        .filter(marketing_event_details::Column::EventId.eq(event_id))
        .order_by_desc(marketing_event_details::Column::Id)
        .one(db)
        .await?;
    match existing {
        Some(row) => {
            let mut row: marketing_event_details::ActiveModel = row.into();
            row.age_range = Set(details.age_range.clone());
            row.mile_radius = Set(details.mile_radius);
            row.income_producing_assets = Set(details.income_producing_assets.clone());
            row.update(db).await?;
            Ok(())
        }
        None => insert_current_details(db, event_id, details).await,
    }
}

async fn insert_current_expenses<C>(
    db: &C,
    event_id: &str,
    expenses: &EventExpenses,
) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    marketing_event_expenses::ActiveModel {
        id: Set(new_id()),
        event_id: Set(event_id.to_string()),
        advertising_cost: Set(expenses.advertising_cost),
        food_venue_cost: Set(expenses.food_venue_cost),
        other_costs: Set(expenses.other_costs),
        total_cost: Set(expenses.total_cost),
    }
    .insert(db)
    .await?;
    Ok(())
}

async fn upsert_current_expenses<C>(
    db: &C,
    event_id: &str,
    expenses: &EventExpenses,
) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    let existing = MarketingEventExpenses::find()
        .filter(marketing_event_expenses::Column::EventId.eq(event_id))
        .order_by_desc(marketing_event_expenses::Column::Id)
        .one(db)
        .await?;
    match existing {
        Some(row) => {
            let mut row: marketing_event_expenses::ActiveModel = row.into();
            row.advertising_cost = Set(expenses.advertising_cost);
            row.food_venue_cost = Set(expenses.food_venue_cost);
            row.other_costs = Set(expenses.other_costs);
            row.total_cost = Set(expenses.total_cost);
            row.update(db).await?;
            Ok(())
        }
        None => insert_current_expenses(db, event_id, expenses).await,
    }
}

async fn insert_current_attendance<C>(
    db: &C,
    event_id: &str,
    attendance: &EventAttendance,
) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    marketing_event_attendance::ActiveModel {
        id: Set(new_id()),
        event_id: Set(event_id.to_string()),
        registrant_responses: Set(attendance.registrant_responses),
        confirmations: Set(attendance.confirmations),
        attendees: Set(attendance.attendees),
        clients_from_event: Set(attendance.clients_from_event),
    }
    .insert(db)
    .await?;
    Ok(())
}

async fn upsert_current_attendance<C>(
    db: &C,
    event_id: &str,
    attendance: &EventAttendance,
) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    let existing = MarketingEventAttendance::find()
        .filter(marketing_event_attendance::Column::EventId.eq(event_id))
        .order_by_desc(marketing_event_attendance::Column::Id)
        .one(db)
        .await?;
    match existing {
        Some(row) => {
            let mut row: marketing_event_attendance::ActiveModel = row.into();
            row.registrant_responses = Set(attendance.registrant_responses);
            row.confirmations = Set(attendance.confirmations);
            row.attendees = Set(attendance.attendees);
            row.clients_from_event = Set(attendance.clients_from_event);
            row.update(db).await?;
            Ok(())
        }
        None => insert_current_attendance(db, event_id, attendance).await,
    }
}

async fn insert_current_appointments<C>(
    db: &C,
    event_id: &str,
    appointments: &EventAppointments,
) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    marketing_event_appointments::ActiveModel {
        id: Set(new_id()),
        event_id: Set(event_id.to_string()),
        appointments_set_at_event: Set(appointments.set_at_event),
        appointments_set_after_event: Set(appointments.set_after_event),
        first_appointments_attended: Set(appointments.first_attended),
        first_appointment_no_shows: Set(appointments.first_no_shows),
        second_appointments_attended: Set(appointments.second_attended),
    }
    .insert(db)
    .await?;
    Ok(())
}

async fn upsert_current_appointments<C>(
    db: &C,
    event_id: &str,
    appointments: &EventAppointments,
) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    let existing = MarketingEventAppointments::find()
        .filter(marketing_event_appointments::Column::EventId.eq(event_id))
        .order_by_desc(marketing_event_appointments::Column::Id)
        .one(db)
        .await?;
    match existing {
        Some(row) => {
            let mut row: marketing_event_appointments::ActiveModel = row.into();
            row.appointments_set_at_event = Set(appointments.set_at_event);
            row.appointments_set_after_event = Set(appointments.set_after_event);
            row.first_appointments_attended = Set(appointments.first_attended);
            row.first_appointment_no_shows = Set(appointments.first_no_shows);
            row.second_appointments_attended = Set(appointments.second_attended);
            row.update(db).await?;
            Ok(())
        }
        None => insert_current_appointments(db, event_id, appointments).await,
    }
}

async fn insert_current_production<C>(
    db: &C,
    event_id: &str,
    production: &EventProduction,
) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    marketing_event_production::ActiveModel {
        id: Set(new_id()),
        event_id: Set(event_id.to_string()),
        annuity_premium: Set(production.annuity_premium),
        life_insurance_premium: Set(production.life_insurance_premium),
        aum_total: Set(production.aum_total),
        financial_planning_fees: Set(production.financial_planning_fees),
        annuity_commission: Set(production.annuity_commission),
        life_insurance_commission: Set(production.life_insurance_commission),
        annuities_sold: Set(production.annuities_sold),
        life_policies_sold: Set(production.life_policies_sold),
        total_production: Set(production.total_production),
    }
    .insert(db)
    .await?;
    Ok(())
}

async fn upsert_current_production<C>(
    db: &C,
    event_id: &str,
    production: &EventProduction,
) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    let existing = MarketingEventProduction::find()
        .filter(marketing_event_production::Column::EventId.eq(event_id))
        .order_by_desc(marketing_event_production::Column::Id)
        .one(db)
        .await?;
    match existing {
        Some(row) => {
            let mut row: marketing_event_production::ActiveModel = row.into();
            row.annuity_premium = Set(production.annuity_premium);
            row.life_insurance_premium = Set(production.life_insurance_premium);
            row.aum_total = Set(production.aum_total);
            row.financial_planning_fees = Set(production.financial_planning_fees);
            row.annuity_commission = Set(production.annuity_commission);
            row.life_insurance_commission = Set(production.life_insurance_commission);
            row.annuities_sold = Set(production.annuities_sold);
            row.life_policies_sold = Set(production.life_policies_sold);
            row.total_production = Set(production.total_production);
            row.update(db).await?;
            Ok(())
        }
        None => insert_current_production(db, event_id, production).await,
    }
}

async fn upsert_legacy_details<C>(
    db: &C,
    event_id: &str,
    details: &EventDetails,
) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    let existing = LegacyEventDetails::find()
        .filter(legacy_event_details::Column::EventId.eq(event_id))
        .order_by_desc(legacy_event_details::Column::Id)
        .one(db)
        .await?;
    match existing {
        Some(row) => {
            let mut row: legacy_event_details::ActiveModel = row.into();
            row.age_range = Set(details.age_range.clone());
            row.mile_radius = Set(details.mile_radius);
            row.income_assets = Set(details.income_producing_assets.clone());
            row.update(db).await?;
        }
        None => {
            legacy_event_details::ActiveModel {
                id: Set(new_id()),
                event_id: Set(event_id.to_string()),
                age_range: Set(details.age_range.clone()),
                mile_radius: Set(details.mile_radius),
                income_assets: Set(details.income_producing_assets.clone()),
            }
            .insert(db)
            .await?;
        }
    }
    Ok(())
}

async fn upsert_legacy_expenses<C>(
    db: &C,
    event_id: &str,
    expenses: &EventExpenses,
) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    let existing = LegacyEventExpenses::find()
        .filter(legacy_event_expenses::Column::EventId.eq(event_id))
        .order_by_desc(legacy_event_expenses::Column::Id)
        .one(db)
        .await?;
    match existing {
        Some(row) => {
            let mut row: legacy_event_expenses::ActiveModel = row.into();
            row.advertising = Set(expenses.advertising_cost);
            row.food_venue = Set(expenses.food_venue_cost);
            row.other = Set(expenses.other_costs);
            row.total = Set(expenses.total_cost);
            row.update(db).await?;
        }
        None => {
            legacy_event_expenses::ActiveModel {
                id: Set(new_id()),
                event_id: Set(event_id.to_string()),
                advertising: Set(expenses.advertising_cost),
                food_venue: Set(expenses.food_venue_cost),
                other: Set(expenses.other_costs),
                total: Set(expenses.total_cost),
            }
            .insert(db)
            .await?;
        }
    }
    Ok(())
}

async fn upsert_legacy_attendance<C>(
    db: &C,
    event_id: &str,
    attendance: &EventAttendance,
) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    let existing = LegacyEventAttendance::find()
        .filter(legacy_event_attendance::Column::EventId.eq(event_id))
        .order_by_desc(legacy_event_attendance::Column::Id)
        .one(db)
        .await?;
    match existing {
        Some(row) => {
            let mut row: legacy_event_attendance::ActiveModel = row.into();
            row.responses = Set(attendance.registrant_responses);
            row.confirmations = Set(attendance.confirmations);
            row.attendees = Set(attendance.attendees);
            row.clients = Set(attendance.clients_from_event);
            row.update(db).await?;
        }
        None => {
            legacy_event_attendance::ActiveModel {
                id: Set(new_id()),
                event_id: Set(event_id.to_string()),
                responses: Set(attendance.registrant_responses),
                confirmations: Set(attendance.confirmations),
                attendees: Set(attendance.attendees),
                clients: Set(attendance.clients_from_event),
            }
            .insert(db)
            .await?;
        }
    }
    Ok(())
}

async fn upsert_legacy_appointments<C>(
    db: &C,
    event_id: &str,
    appointments: &EventAppointments,
) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    let existing = LegacyEventAppointments::find()
        .filter(legacy_event_appointments::Column::EventId.eq(event_id))
        .order_by_desc(legacy_event_appointments::Column::Id)
        .one(db)
        .await?;
    match existing {
        Some(row) => {
            let mut row: legacy_event_appointments::ActiveModel = row.into();
            row.set_at_event = Set(appointments.set_at_event);
            row.set_after_event = Set(appointments.set_after_event);
            row.first_attended = Set(appointments.first_attended);
            row.first_no_shows = Set(appointments.first_no_shows);
            row.second_attended = Set(appointments.second_attended);
            row.update(db).await?;
        }
        None => {
            legacy_event_appointments::ActiveModel {
                id: Set(new_id()),
                event_id: Set(event_id.to_string()),
                set_at_event: Set(appointments.set_at_event),
                set_after_event: Set(appointments.set_after_event),
                first_attended: Set(appointments.first_attended),
                first_no_shows: Set(appointments.first_no_shows),
                second_attended: Set(appointments.second_attended),
            }
            .insert(db)
            .await?;
        }
    }
    Ok(())
}

async fn upsert_legacy_production<C>(
    db: &C,
    event_id: &str,
    production: &EventProduction,
) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    let existing = LegacyEventProduction::find()
        .filter(legacy_event_production::Column::EventId.eq(event_id))
        .order_by_desc(legacy_event_production::Column::Id)
        .one(db)
        .await?;
    match existing {
        Some(row) => {
            let mut row: legacy_event_production::ActiveModel = row.into();
            row.fixed_annuity = Set(production.annuity_premium);
            row.life_insurance = Set(production.life_insurance_premium);
            row.aum = Set(production.aum_total);
            row.financial_planning = Set(production.financial_planning_fees);
            row.annuity_commission = Set(production.annuity_commission);
            row.life_commission = Set(production.life_insurance_commission);
            row.annuities_sold = Set(production.annuities_sold);
            row.life_policies_sold = Set(production.life_policies_sold);
            row.total = Set(production.total_production);
            row.update(db).await?;
        }
        None => {
            legacy_event_production::ActiveModel {
                id: Set(new_id()),
                event_id: Set(event_id.to_string()),
                fixed_annuity: Set(production.annuity_premium),
                life_insurance: Set(production.life_insurance_premium),
                aum: Set(production.aum_total),
                financial_planning: Set(production.financial_planning_fees),
                annuity_commission: Set(production.annuity_commission),
                life_commission: Set(production.life_insurance_commission),
                annuities_sold: Set(production.annuities_sold),
                life_policies_sold: Set(production.life_policies_sold),
                total: Set(production.total_production),
            }
            .insert(db)
            .await?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn event_input_accepts_camel_case_payloads() {
        let input: EventInput = serde_json::from_value(json!({
            "name": "Fall Workshop",
            "eventDate": "2025-10-02",
            "marketingType": "workshop",
            "expenses": { "advertisingCost": 500.0, "foodVenueCost": 1000.0 },
            "attendance": { "registrantResponses": 100, "attendees": 60 }
        }))
        .unwrap();

        assert_eq!(input.name, "Fall Workshop");
        assert_eq!(input.expenses.advertising_cost, Some(500.0));
        assert_eq!(input.attendance.attendees, Some(60));
        assert_eq!(input.production, EventProduction::default());
    }

    #[test]
    fn patch_knows_when_the_event_row_is_untouched() {
        let satellite_only = EventPatch {
            expenses: Some(EventExpenses::default()),
            ..Default::default()
        };
        assert!(!satellite_only.touches_event_row());

        let rename = EventPatch {
            name: Some("Renamed".into()),
            ..Default::default()
        };
        assert!(rename.touches_event_row());
    }
}
