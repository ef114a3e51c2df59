//! Community record types
//!
//! Wire names follow the portal's JSON conventions: camelCase fields and
//! SCREAMING_SNAKE_CASE enum values.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResidentType {
    Owner,
    Tenant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResidentStatus {
    Active,
    Inactive,
}

/// Directory entry for a household member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Resident {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Unit label, e.g. "Block A, #12"
    pub house: String,
    pub status: ResidentStatus,
    pub phone: String,
    #[serde(rename = "type")]
    pub resident_type: ResidentType,
    pub join_date: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Paid,
    Pending,
    Overdue,
}

impl PaymentStatus {
    /// Next status in the admin's PAID -> PENDING -> OVERDUE cycle
    pub fn next(self) -> Self {
        match self {
            PaymentStatus::Paid => PaymentStatus::Pending,
            PaymentStatus::Pending => PaymentStatus::Overdue,
            PaymentStatus::Overdue => PaymentStatus::Paid,
        }
    }
}

/// Ledger entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: String,
    pub resident_id: String,
    pub resident_name: String,
    pub resident_type: ResidentType,
    pub unit: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub status: PaymentStatus,
    /// How it was paid; "-" when nothing has been received yet
    pub method: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestCategory {
    #[default]
    Maintenance,
    Security,
    Utilities,
    Others,
}

/// Resident-submitted service request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ServiceRequest {
    pub id: String,
    pub resident_id: String,
    pub resident_name: String,
    pub title: String,
    pub description: String,
    pub status: RequestStatus,
    pub created_at: NaiveDate,
    pub category: RequestCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnnouncementCategory {
    Urgent,
    General,
    Event,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    pub id: String,
    pub title: String,
    pub content: String,
    pub date: NaiveDate,
    pub author: String,
    pub category: AnnouncementCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContactCategory {
    Emergency,
    Essential,
    Admin,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct EmergencyContact {
    pub id: String,
    pub name: String,
    pub number: String,
    pub description: String,
    pub category: ContactCategory,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_status_cycle() {
        let mut status = PaymentStatus::Paid;
        status = status.next();
        assert_eq!(status, PaymentStatus::Pending);
        status = status.next();
        assert_eq!(status, PaymentStatus::Overdue);
        assert_eq!(status.next(), PaymentStatus::Paid);
    }

    #[test]
    fn test_resident_wire_names() {
        let resident = Resident {
            id: "1".to_string(),
            name: "Alice Thompson".to_string(),
            email: "alice@example.com".to_string(),
            house: "Block A, #12".to_string(),
            status: ResidentStatus::Active,
            phone: "+1 234 567 890".to_string(),
            resident_type: ResidentType::Owner,
            join_date: NaiveDate::from_ymd_opt(2022, 5, 12).unwrap(),
        };

        let json = serde_json::to_value(&resident).unwrap();
        assert_eq!(json["type"], "OWNER");
        assert_eq!(json["joinDate"], "2022-05-12");
        assert_eq!(
            serde_json::to_value(RequestStatus::InProgress).unwrap(),
            "IN_PROGRESS"
        );
    }
}
