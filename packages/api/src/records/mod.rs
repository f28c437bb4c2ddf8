//! Canonical event records.
//!
//! Handlers and the metric deriver only ever see these shapes. The two table
//! generations are mapped into them by the [`adapter`] implementations, so a
//! `marketing_events` row and a legacy `events` row describing the same event
//! produce identical records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub mod adapter;
pub mod resolver;
pub mod write;

/// Which table generation a record was read from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaGeneration {
    Current,
    Legacy,
}

impl SchemaGeneration {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaGeneration::Current => "current",
            SchemaGeneration::Legacy => "legacy",
        }
    }
}

/// Core row of a marketing event, independent of which generation stored it.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub event_date: NaiveDate,
    pub location: Option<String>,
    pub marketing_type: String,
    pub topic: Option<String>,
    #[serde(skip)]
    pub generation: SchemaGeneration,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDetails {
    pub age_range: Option<String>,
    pub mile_radius: Option<i32>,
    pub income_producing_assets: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventExpenses {
    pub advertising_cost: Option<f64>,
    pub food_venue_cost: Option<f64>,
    pub other_costs: Option<f64>,
    pub total_cost: Option<f64>,
}

impl EventExpenses {
    /// Stored grand total when one was recorded, otherwise the sum of the
    /// component costs with missing components counted as zero.
    pub fn total_or_sum(&self) -> f64 {
        self.total_cost.unwrap_or_else(|| {
            self.advertising_cost.unwrap_or(0.0)
                + self.food_venue_cost.unwrap_or(0.0)
                + self.other_costs.unwrap_or(0.0)
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventAttendance {
    pub registrant_responses: Option<i32>,
    pub confirmations: Option<i32>,
    pub attendees: Option<i32>,
    pub clients_from_event: Option<i32>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventAppointments {
    pub set_at_event: Option<i32>,
    pub set_after_event: Option<i32>,
    pub first_attended: Option<i32>,
    pub first_no_shows: Option<i32>,
    pub second_attended: Option<i32>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventProduction {
    pub annuity_premium: Option<f64>,
    pub life_insurance_premium: Option<f64>,
    pub aum_total: Option<f64>,
    pub financial_planning_fees: Option<f64>,
    pub annuity_commission: Option<f64>,
    pub life_insurance_commission: Option<f64>,
    pub annuities_sold: Option<i32>,
    pub life_policies_sold: Option<i32>,
    pub total_production: Option<f64>,
}

impl EventProduction {
    /// Stored production total when one was recorded, otherwise the sum of
    /// the four premium pools.
    pub fn total_or_sum(&self) -> f64 {
        self.total_production.unwrap_or_else(|| {
            self.annuity_premium.unwrap_or(0.0)
                + self.life_insurance_premium.unwrap_or(0.0)
                + self.aum_total.unwrap_or(0.0)
                + self.financial_planning_fees.unwrap_or(0.0)
        })
    }
}

/// An event together with all of its satellite rows. Satellites a generation
/// has no row for are present as empty defaults, so consumers never branch on
/// missing children.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventBundle {
    #[serde(flatten)]
    pub event: EventRecord,
    pub details: EventDetails,
    pub expenses: EventExpenses,
    pub attendance: EventAttendance,
    pub appointments: EventAppointments,
    pub production: EventProduction,
}
