//! Service queue

use super::records::{RequestCategory, RequestStatus, ServiceRequest};
use crate::{PortalError, PortalResult};
use bliss_core::{Identity, Role};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::info;

/// Resident's request form
#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct NewRequest {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub category: RequestCategory,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ServiceQueue {
    requests: Vec<ServiceRequest>,
    next_seq: u32,
}

impl ServiceQueue {
    pub fn new(requests: Vec<ServiceRequest>) -> Self {
        let next_seq = requests
            .iter()
            .filter_map(|r| r.id.strip_prefix("REQ-"))
            .filter_map(|n| n.parse::<u32>().ok())
            .max()
            .map_or(1, |max| max + 1);

        Self { requests, next_seq }
    }

    /// All requests, newest submissions first
    pub fn list(&self) -> &[ServiceRequest] {
        &self.requests
    }

    pub fn get(&self, id: &str) -> Option<&ServiceRequest> {
        self.requests.iter().find(|r| r.id == id)
    }

    pub fn for_resident(&self, resident_id: &str) -> Vec<&ServiceRequest> {
        self.requests
            .iter()
            .filter(|r| r.resident_id == resident_id)
            .collect()
    }

    /// Case-insensitive match on id, resident name or title
    pub fn search(&self, term: &str) -> Vec<&ServiceRequest> {
        let term = term.trim().to_lowercase();
        self.requests
            .iter()
            .filter(|r| {
                r.id.to_lowercase().contains(&term)
                    || r.resident_name.to_lowercase().contains(&term)
                    || r.title.to_lowercase().contains(&term)
            })
            .collect()
    }

    pub fn count_with_status(&self, status: RequestStatus) -> usize {
        self.requests.iter().filter(|r| r.status == status).count()
    }

    /// File a new PENDING request on behalf of a resident
    pub fn submit(
        &mut self,
        resident: &Identity,
        request: NewRequest,
        created_at: NaiveDate,
    ) -> PortalResult<ServiceRequest> {
        if resident.role != Role::Resident {
            return Err(PortalError::permission(
                "Only residents can submit service requests",
            ));
        }

        let title = request.title.trim();
        let description = request.description.trim();
        if title.is_empty() {
            return Err(PortalError::validation("Title must not be empty"));
        }
        if description.is_empty() {
            return Err(PortalError::validation("Description must not be empty"));
        }

        let submitted = ServiceRequest {
            id: format!("REQ-{:03}", self.next_seq),
            resident_id: resident.id.clone(),
            resident_name: resident.name.clone(),
            title: title.to_string(),
            description: description.to_string(),
            status: RequestStatus::Pending,
            created_at,
            category: request.category,
            image_url: request.image_url.filter(|u| !u.trim().is_empty()),
        };
        self.next_seq += 1;

        info!(
            request_id = %submitted.id,
            resident_id = %resident.id,
            category = ?submitted.category,
            "Service request submitted"
        );
        self.requests.insert(0, submitted.clone());
        Ok(submitted)
    }

    pub fn update_status(&mut self, id: &str, status: RequestStatus) -> PortalResult<&ServiceRequest> {
        let request = self
            .requests
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| PortalError::not_found(format!("Service request {}", id)))?;

        request.status = status;
        info!(request_id = id, status = ?status, "Service request updated");
        Ok(request)
    }
}
