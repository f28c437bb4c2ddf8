//! Per-generation table access.
//!
//! Each adapter knows how to read one table generation and map its rows into
//! the canonical records. All fallback and ordering policy lives in the
//! [`resolver`](super::resolver); adapters are plain queries.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder};

use crate::entity::prelude::*;
use crate::entity::{
    legacy_event, legacy_event_appointments, legacy_event_attendance, legacy_event_details,
    legacy_event_expenses, legacy_event_production, marketing_event, marketing_event_appointments,
    marketing_event_attendance, marketing_event_details, marketing_event_expenses,
    marketing_event_production,
};
use crate::records::{
    EventAppointments, EventAttendance, EventDetails, EventExpenses, EventProduction, EventRecord,
    SchemaGeneration,
};

/// Read access to one table generation.
///
/// Satellite lookups resolve duplicates by taking the row with the greatest
/// primary key, so repeated upserts that raced each other stay deterministic.
#[async_trait]
pub trait SchemaAdapter: Send + Sync {
    fn generation(&self) -> SchemaGeneration;

    async fn event_by_id(
        &self,
        db: &DatabaseConnection,
        event_id: &str,
        user_id: &str,
    ) -> Result<Option<EventRecord>, DbErr>;

    /// All events owned by the user, newest event date first.
    async fn events_for_user(
        &self,
        db: &DatabaseConnection,
        user_id: &str,
    ) -> Result<Vec<EventRecord>, DbErr>;

    async fn latest_event_for_user(
        &self,
        db: &DatabaseConnection,
        user_id: &str,
    ) -> Result<Option<EventRecord>, DbErr>;

    async fn details_for_event(
        &self,
        db: &DatabaseConnection,
        event_id: &str,
    ) -> Result<Option<EventDetails>, DbErr>;

    async fn expenses_for_event(
        &self,
        db: &DatabaseConnection,
        event_id: &str,
    ) -> Result<Option<EventExpenses>, DbErr>;

    async fn attendance_for_event(
        &self,
        db: &DatabaseConnection,
        event_id: &str,
    ) -> Result<Option<EventAttendance>, DbErr>;

    async fn appointments_for_event(
        &self,
        db: &DatabaseConnection,
        event_id: &str,
    ) -> Result<Option<EventAppointments>, DbErr>;

    async fn production_for_event(
        &self,
        db: &DatabaseConnection,
        event_id: &str,
    ) -> Result<Option<EventProduction>, DbErr>;
}

pub struct CurrentSchema;

#[async_trait]
impl SchemaAdapter for CurrentSchema {
    fn generation(&self) -> SchemaGeneration {
        SchemaGeneration::Current
    }

    async fn event_by_id(
        &self,
        db: &DatabaseConnection,
        event_id: &str,
        user_id: &str,
    ) -> Result<Option<EventRecord>, DbErr> {
        Ok(MarketingEvent::find_by_id(event_id)
            .filter(marketing_event::Column::UserId.eq(user_id))
            .one(db)
            .await?
            .map(EventRecord::from))
    }

    async fn events_for_user(
        &self,
        db: &DatabaseConnection,
        user_id: &str,
    ) -> Result<Vec<EventRecord>, DbErr> {
        Ok(MarketingEvent::find()
            .filter(marketing_event::Column::UserId.eq(user_id))
            .order_by_desc(marketing_event::Column::EventDate)
            .all(db)
            .await?
            .into_iter()
            .map(EventRecord::from)
            .collect())
    }

    async fn latest_event_for_user(
        &self,
        db: &DatabaseConnection,
        user_id: &str,
    ) -> Result<Option<EventRecord>, DbErr> {
        Ok(MarketingEvent::find()
            .filter(marketing_event::Column::UserId.eq(user_id))
            .order_by_desc(marketing_event::Column::EventDate)
            .order_by_desc(marketing_event::Column::CreatedAt)
            .one(db)
            .await?
            .map(EventRecord::from))
    }

    async fn details_for_event(
        &self,
        db: &DatabaseConnection,
        event_id: &str,
    ) -> Result<Option<EventDetails>, DbErr> {
        Ok(MarketingEventDetails::find()
            .filter(marketing_event_details::Column::EventId.eq(event_id))
            .order_by_desc(marketing_event_details::Column::Id)
            .one(db)
            .await?
            .map(EventDetails::from))
    }

    async fn expenses_for_event(
        &self,
        db: &DatabaseConnection,
        event_id: &str,
    ) -> Result<Option<EventExpenses>, DbErr> {
        Ok(MarketingEventExpenses::find()
            .filter(marketing_event_expenses::Column::EventId.eq(event_id))
            .order_by_desc(marketing_event_expenses::Column::Id)
            .one(db)
            .await?
            .map(EventExpenses::from))
    }

    async fn attendance_for_event(
        &self,
        db: &DatabaseConnection,
        event_id: &str,
    ) -> Result<Option<EventAttendance>, DbErr> {
        Ok(MarketingEventAttendance::find()
            .filter(marketing_event_attendance::Column::EventId.eq(event_id))
            .order_by_desc(marketing_event_attendance::Column::Id)
            .one(db)
            .await?
            .map(EventAttendance::from))
    }

    async fn appointments_for_event(
        &self,
        db: &DatabaseConnection,
        event_id: &str,
    ) -> Result<Option<EventAppointments>, DbErr> {
        Ok(MarketingEventAppointments::find()
            .filter(marketing_event_appointments::Column::EventId.eq(event_id))
            .order_by_desc(marketing_event_appointments::Column::Id)
            .one(db)
            .await?
            .map(EventAppointments::from))
    }

    async fn production_for_event(
        &self,
        db: &DatabaseConnection,
        event_id: &str,
    ) -> Result<Option<EventProduction>, DbErr> {
        Ok(MarketingEventProduction::find()
            .filter(marketing_event_production::Column::EventId.eq(event_id))
            .order_by_desc(marketing_event_production::Column::Id)
            .one(db)
            .await?
            .map(EventProduction::from))
    }
}

pub struct LegacySchema;

#[async_trait]
impl SchemaAdapter for LegacySchema {
    fn generation(&self) -> SchemaGeneration {
        SchemaGeneration::Legacy
    }

    async fn event_by_id(
        &self,
        db: &DatabaseConnection,
        event_id: &str,
        user_id: &str,
    ) -> Result<Option<EventRecord>, DbErr> {
        Ok(LegacyEvent::find_by_id(event_id)
            .filter(legacy_event::Column::UserId.eq(user_id))
            .one(db)
            .await?
            .map(EventRecord::from))
    }

    async fn events_for_user(
        &self,
        db: &DatabaseConnection,
        user_id: &str,
    ) -> Result<Vec<EventRecord>, DbErr> {
        Ok(LegacyEvent::find()
            .filter(legacy_event::Column::UserId.eq(user_id))
            .order_by_desc(legacy_event::Column::Date)
            .all(db)
            .await?
            .into_iter()
            .map(EventRecord::from)
            .collect())
    }

    async fn latest_event_for_user(
        &self,
        db: &DatabaseConnection,
        user_id: &str,
    ) -> Result<Option<EventRecord>, DbErr> {
        Ok(LegacyEvent::find()
            .filter(legacy_event::Column::UserId.eq(user_id))
            .order_by_desc(legacy_event::Column::Date)
            .order_by_desc(legacy_event::Column::CreatedAt)
            .one(db)
            .await?
            .map(EventRecord::from))
    }

    async fn details_for_event(
        &self,
        db: &DatabaseConnection,
        event_id: &str,
    ) -> Result<Option<EventDetails>, DbErr> {
        Ok(LegacyEventDetails::find()
            .filter(legacy_event_details::Column::EventId.eq(event_id))
            .order_by_desc(legacy_event_details::Column::Id)
            .one(db)
            .await?
            .map(EventDetails::from))
    }

    async fn expenses_for_event(
        &self,
        db: &DatabaseConnection,
        event_id: &str,
    ) -> Result<Option<EventExpenses>, DbErr> {
        Ok(LegacyEventExpenses::find()
            .filter(legacy_event_expenses::Column::EventId.eq(event_id))
            .order_by_desc(legacy_event_expenses::Column::Id)
            .one(db)
            .await?
            .map(EventExpenses::from))
    }

    async fn attendance_for_event(
        &self,
        db: &DatabaseConnection,
        event_id: &str,
    ) -> Result<Option<EventAttendance>, DbErr> {
        Ok(LegacyEventAttendance::find()
            .filter(legacy_event_attendance::Column::EventId.eq(event_id))
            .order_by_desc(legacy_event_attendance::Column::Id)
            .one(db)
            .await?
            .map(EventAttendance::from))
    }

    async fn appointments_for_event(
        &self,
        db: &DatabaseConnection,
        event_id: &str,
    ) -> Result<Option<EventAppointments>, DbErr> {
        Ok(LegacyEventAppointments::find()
            .filter(legacy_event_appointments::Column::EventId.eq(event_id))
            .order_by_desc(legacy_event_appointments::Column::Id)
            .one(db)
            .await?
            .map(EventAppointments::from))
    }

    async fn production_for_event(
        &self,
        db: &DatabaseConnection,
        event_id: &str,
    ) -> Result<Option<EventProduction>, DbErr> {
        Ok(LegacyEventProduction::find()
            .filter(legacy_event_production::Column::EventId.eq(event_id))
            .order_by_desc(legacy_event_production::Column::Id)
            .one(db)
            .await?
            .map(EventProduction::from))
    }
}

impl From<marketing_event::Model> for EventRecord {
    fn from(model: marketing_event::Model) -> Self {
        EventRecord {
            id: model.id,
            user_id: model.user_id,
            name: model.name,
            event_date: model.event_date,
            location: model.location,
            marketing_type: model.marketing_type,
            topic: model.topic,
            generation: SchemaGeneration::Current,
        }
    }
}

impl From<legacy_event::Model> for EventRecord {
    fn from(model: legacy_event::Model) -> Self {
        EventRecord {
            id: model.id,
            user_id: model.user_id,
            name: model.name,
            event_date: model.date,
            location: model.location,
            marketing_type: model.event_type,
            topic: model.topic,
            generation: SchemaGeneration::Legacy,
        }
    }
}

impl From<marketing_event_details::Model> for EventDetails {
    fn from(model: marketing_event_details::Model) -> Self {
        EventDetails {
            age_range: model.age_range,
            mile_radius: model.mile_radius,
            income_producing_assets: model.income_producing_assets,
        }
    }
}

impl From<legacy_event_details::Model> for EventDetails {
    fn from(model: legacy_event_details::Model) -> Self {
        EventDetails {
            age_range: model.age_range,
            mile_radius: model.mile_radius,
            income_producing_assets: model.income_assets,
        }
    }
}

impl From<marketing_event_expenses::Model> for EventExpenses {
    fn from(model: marketing_event_expenses::Model) -> Self {
        EventExpenses {
            advertising_cost: model.advertising_cost,
            food_venue_cost: model.food_venue_cost,
            other_costs: model.other_costs,
            total_cost: model.total_cost,
        }
    }
}

impl From<legacy_event_expenses::Model> for EventExpenses {
    fn from(model: legacy_event_expenses::Model) -> Self {
        EventExpenses {
            advertising_cost: model.advertising,
            food_venue_cost: model.food_venue,
            other_costs: model.other,
            total_cost: model.total,
        }
    }
}

impl From<marketing_event_attendance::Model> for EventAttendance {
    fn from(model: marketing_event_attendance::Model) -> Self {
        EventAttendance {
            registrant_responses: model.registrant_responses,
            confirmations: model.confirmations,
            attendees: model.attendees,
            clients_from_event: model.clients_from_event,
        }
    }
}

impl From<legacy_event_attendance::Model> for EventAttendance {
    fn from(model: legacy_event_attendance::Model) -> Self {
        EventAttendance {
            registrant_responses: model.responses,
            confirmations: model.confirmations,
            attendees: model.attendees,
            clients_from_event: model.clients,
        }
    }
}

impl From<marketing_event_appointments::Model> for EventAppointments {
    fn from(model: marketing_event_appointments::Model) -> Self {
        EventAppointments {
            set_at_event: model.appointments_set_at_event,
            set_after_event: model.appointments_set_after_event,
            first_attended: model.first_appointments_attended,
            first_no_shows: model.first_appointment_no_shows,
            second_attended: model.second_appointments_attended,
        }
    }
}

impl From<legacy_event_appointments::Model> for EventAppointments {
    fn from(model: legacy_event_appointments::Model) -> Self {
        EventAppointments {
            set_at_event: model.set_at_event,
            set_after_event: model.set_after_event,
            first_attended: model.first_attended,
            first_no_shows: model.first_no_shows,
            second_attended: model.second_attended,
        }
    }
}

impl From<marketing_event_production::Model> for EventProduction {
    fn from(model: marketing_event_production::Model) -> Self {
        EventProduction {
            annuity_premium: model.annuity_premium,
            life_insurance_premium: model.life_insurance_premium,
            aum_total: model.aum_total,
            financial_planning_fees: model.financial_planning_fees,
            annuity_commission: model.annuity_commission,
            life_insurance_commission: model.life_insurance_commission,
            annuities_sold: model.annuities_sold,
            life_policies_sold: model.life_policies_sold,
            total_production: model.total_production,
        }
    }
}

impl From<legacy_event_production::Model> for EventProduction {
    fn from(model: legacy_event_production::Model) -> Self {
        EventProduction {
            annuity_premium: model.fixed_annuity,
            life_insurance_premium: model.life_insurance,
            aum_total: model.aum,
            financial_planning_fees: model.financial_planning,
            annuity_commission: model.annuity_commission,
            life_insurance_commission: model.life_commission,
            annuities_sold: model.annuities_sold,
            life_policies_sold: model.life_policies_sold,
            total_production: model.total,
        }
    }
}
