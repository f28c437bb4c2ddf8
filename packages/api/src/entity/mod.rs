//! `SeaORM` entities for the record store.
//!
//! Two table generations coexist: the current `marketing_*` tables and the
//! legacy v1 tables. Events created before the schema rework still live in
//! the legacy tables and are never migrated; the records layer reconciles
//! both generations into one canonical shape.

pub mod marketing_event;
pub mod marketing_event_appointments;
pub mod marketing_event_attendance;
pub mod marketing_event_details;
pub mod marketing_event_expenses;
pub mod marketing_event_production;

pub mod legacy_event;
pub mod legacy_event_appointments;
pub mod legacy_event_attendance;
pub mod legacy_event_details;
pub mod legacy_event_expenses;
pub mod legacy_event_production;

pub mod prelude {
    pub use super::legacy_event::Entity as LegacyEvent;
    pub use super::legacy_event_appointments::Entity as LegacyEventAppointments;
    pub use super::legacy_event_attendance::Entity as LegacyEventAttendance;
    pub use super::legacy_event_details::Entity as LegacyEventDetails;
    pub use super::legacy_event_expenses::Entity as LegacyEventExpenses;
    pub use super::legacy_event_production::Entity as LegacyEventProduction;
    pub use super::marketing_event::Entity as MarketingEvent;
    pub use super::marketing_event_appointments::Entity as MarketingEventAppointments;
    pub use super::marketing_event_attendance::Entity as MarketingEventAttendance;
    pub use super::marketing_event_details::Entity as MarketingEventDetails;
    pub use super::marketing_event_expenses::Entity as MarketingEventExpenses;
    pub use super::marketing_event_production::Entity as MarketingEventProduction;
}
