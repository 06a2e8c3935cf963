use chrono::{DateTime, NaiveTime, Utc};
use common::converters::{serde_timestamp, serde_wall_time};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A platform account. Clients and counselors are both users.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl User {
    /// Name when set and non-blank, otherwise the email address.
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.email,
        }
    }
}

/// Counselor profile owned by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Counselor {
    pub id: String,
    pub user_id: String,
    #[serde(default)]
    pub profile_image: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    /// Ordered, duplicate-free specialty tags. `null` in the store reads as empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub specialties: Vec<String>,
    #[serde(default)]
    pub profile_url: Option<String>,
    #[serde(default)]
    pub hourly_rate: Option<Decimal>,
}

/// A recurring weekly availability window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub id: String,
    pub counselor_id: String,
    /// 0 = Sunday .. 6 = Saturday
    pub day_of_week: u8,
    #[serde(with = "serde_wall_time")]
    pub start_time: NaiveTime,
    #[serde(with = "serde_wall_time")]
    pub end_time: NaiveTime,
    pub is_available: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceType {
    Monthly,
    /// Anything other than `monthly` is billed as a single session.
    #[serde(other)]
    Single,
}

impl ServiceType {
    pub fn label(&self) -> &'static str {
        match self {
            ServiceType::Single => "Single session",
            ServiceType::Monthly => "Monthly course",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "Pending",
            BookingStatus::Confirmed => "Confirmed",
            BookingStatus::Completed => "Completed",
            BookingStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A session booked by a client with a counselor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub user_id: String,
    pub counselor_id: String,
    #[serde(with = "serde_timestamp")]
    pub scheduled_at: DateTime<Utc>,
    pub service_type: ServiceType,
    pub amount: Decimal,
    pub status: BookingStatus,
    #[serde(default)]
    pub notes: Option<String>,
    /// The client, present when the query expands the `users` relation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
    Refunded,
}

/// A payment made against a booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: String,
    pub booking_id: String,
    pub amount: Decimal,
    pub status: PaymentStatus,
    #[serde(with = "serde_timestamp")]
    pub created_at: DateTime<Utc>,
    /// The paid booking, present when the query expands the `bookings` relation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking: Option<Booking>,
}

impl Payment {
    pub fn is_completed(&self) -> bool {
        self.status == PaymentStatus::Completed
    }

    /// Counselor of the embedded booking, if the booking was expanded.
    pub fn counselor_id(&self) -> Option<&str> {
        self.booking.as_ref().map(|b| b.counselor_id.as_str())
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_user_display_name_falls_back_to_email() {
        let mut user = User {
            id: "u1".to_string(),
            email: "hana@example.com".to_string(),
            name: Some("Hana".to_string()),
        };
        assert_eq!(user.display_name(), "Hana");

        user.name = Some("  ".to_string());
        assert_eq!(user.display_name(), "hana@example.com");

        user.name = None;
        assert_eq!(user.display_name(), "hana@example.com");
    }

    #[test]
    fn test_counselor_null_specialties() {
        let counselor: Counselor = serde_json::from_value(json!({
            "id": "c1",
            "user_id": "u9",
            "specialties": null,
            "hourly_rate": 12000
        }))
        .unwrap();

        assert!(counselor.specialties.is_empty());
        assert_eq!(counselor.hourly_rate, Some(Decimal::from(12000)));
        assert_eq!(counselor.bio, None);
    }

    #[test]
    fn test_booking_with_embedded_user() {
        let booking: Booking = serde_json::from_value(json!({
            "id": "b1",
            "user_id": "u1",
            "counselor_id": "c1",
            "scheduled_at": "2024-03-01T10:00:00+00:00",
            "service_type": "monthly",
            "amount": 30000,
            "status": "confirmed",
            "notes": null,
            "user": { "id": "u1", "email": "a@example.com", "name": "Aki" }
        }))
        .unwrap();

        assert_eq!(booking.service_type, ServiceType::Monthly);
        assert_eq!(booking.status, BookingStatus::Confirmed);
        assert_eq!(
            booking.scheduled_at,
            Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap()
        );
        assert_eq!(booking.user.unwrap().display_name(), "Aki");
    }

    #[test]
    fn test_unknown_service_type_is_single() {
        let service: ServiceType = serde_json::from_value(json!("trial")).unwrap();
        assert_eq!(service, ServiceType::Single);
        let service: ServiceType = serde_json::from_value(json!("single")).unwrap();
        assert_eq!(service, ServiceType::Single);
    }

    #[test]
    fn test_unknown_booking_status_is_rejected() {
        let result = serde_json::from_value::<BookingStatus>(json!("archived"));
        assert!(result.is_err());
    }

    #[test]
    fn test_schedule_times() {
        let slot: Schedule = serde_json::from_value(json!({
            "id": "s1",
            "counselor_id": "c1",
            "day_of_week": 2,
            "start_time": "09:00:00",
            "end_time": "18:00",
            "is_available": true
        }))
        .unwrap();

        assert_eq!(slot.start_time, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        assert_eq!(slot.end_time, NaiveTime::from_hms_opt(18, 0, 0).unwrap());
    }

    #[test]
    fn test_payment_counselor_from_embedded_booking() {
        let payment: Payment = serde_json::from_value(json!({
            "id": "p1",
            "booking_id": "b1",
            "amount": "5000",
            "status": "completed",
            "created_at": "2024-01-10",
            "booking": {
                "id": "b1",
                "user_id": "u1",
                "counselor_id": "c1",
                "scheduled_at": "2024-01-09T10:00:00Z",
                "service_type": "single",
                "amount": 5000,
                "status": "completed"
            }
        }))
        .unwrap();

        assert!(payment.is_completed());
        assert_eq!(payment.counselor_id(), Some("c1"));
        assert_eq!(payment.amount, Decimal::from(5000));
    }
}
