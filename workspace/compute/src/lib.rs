//! Panel logic of the counselor and admin dashboards.
//!
//! Every operation talks to the remote store through [`model::TableStore`]
//! and returns typed records, so the web app and the CLI share one
//! implementation of each panel.

pub mod bookings;
pub mod clients;
pub mod error;
pub mod panel;
pub mod profile;
pub mod revenue;
pub mod schedule;

#[cfg(test)]
pub(crate) mod testing;

pub use bookings::{apply_action, available_actions, can_transition, fetch_bookings, merge_booking, BookingAction};
pub use clients::{group_by_client, ClientNotebook, ClientRoster, ClientSessions};
pub use error::{DashboardError, Result};
pub use panel::{FetchState, FormMessage, RequestGeneration};
pub use profile::{load_counselor, save_profile, ProfileForm, SpecialtySet, DEFAULT_HOURLY_RATE};
pub use revenue::{fetch_completed_payments, load_revenue, summarize, MonthlyRevenue, RevenueState, RevenueSummary};
pub use schedule::{add_slot, delete_slot, fetch_slots, toggle_slot, NewSlot, SlotList};
