//! Community record request/response types

use bliss_portal::community::{
    Announcement, EmergencyContact, LedgerStats, Payment, RequestStatus, ResidentStatus,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Directory filters
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ResidentQuery {
    /// Matches name, house or email
    #[serde(default)]
    pub q: String,
    pub status: Option<ResidentStatus>,
    /// 1-based page number
    pub page: Option<usize>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct StatusUpdate {
    pub status: RequestStatus,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentsResponse {
    pub stats: LedgerStats,
    pub payments: Vec<Payment>,
}

/// Monthly dues run; defaults to today
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct DuesRequest {
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnnouncementsResponse {
    pub can_manage: bool,
    pub announcements: Vec<Announcement>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactsResponse {
    pub can_manage: bool,
    pub contacts: Vec<EmergencyContact>,
}
