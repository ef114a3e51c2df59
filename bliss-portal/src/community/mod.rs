//! Community records
//!
//! In-memory residents, payments, service requests and bulletins that the
//! portal pages read and administrators edit. Nothing here decides access;
//! callers resolve the route through the guard first.

pub mod bulletin;
pub mod directory;
pub mod ledger;
pub mod records;
pub mod requests;
pub mod seed;

pub use bulletin::{Bulletin, NewAnnouncement, NewContact};
pub use directory::{export_csv, DirectoryStats, ResidentDirectory, ResidentPage};
pub use ledger::{billing_period, LedgerStats, PaymentEntry, PaymentLedger};
pub use records::*;
pub use requests::{NewRequest, ServiceQueue};

use crate::{PortalError, PortalResult};
use chrono::NaiveDate;
use serde::Serialize;

/// Headline numbers on the admin dashboard
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_residents: usize,
    pub active_residents: usize,
    pub pending_requests: usize,
    pub collection_ratio: u32,
    pub outstanding_dues: f64,
    pub announcement_count: usize,
}

/// All community records in one place
#[derive(Debug, Clone, Default)]
pub struct Community {
    pub directory: ResidentDirectory,
    pub ledger: PaymentLedger,
    pub queue: ServiceQueue,
    pub bulletin: Bulletin,
}

impl Community {
    /// Community populated with the demo records
    pub fn seeded() -> Self {
        Self {
            directory: ResidentDirectory::new(seed::residents()),
            ledger: PaymentLedger::new(seed::payments()),
            queue: ServiceQueue::new(seed::service_requests()),
            bulletin: Bulletin::new(seed::announcements(), seed::emergency_contacts()),
        }
    }

    pub fn dashboard(&self) -> DashboardSummary {
        let residents = self.directory.stats();
        let ledger = self.ledger.stats();

        DashboardSummary {
            total_residents: residents.total,
            active_residents: residents.active,
            pending_requests: self.queue.count_with_status(RequestStatus::Pending),
            collection_ratio: ledger.collection_ratio,
            outstanding_dues: ledger.outstanding,
            announcement_count: self.bulletin.announcements().len(),
        }
    }

    /// Bill every owner in the directory for the month containing `date`
    pub fn generate_dues(&mut self, date: NaiveDate) -> Vec<Payment> {
        let period = billing_period(date);
        self.ledger
            .generate_dues(self.directory.owners(), &period, date)
    }

    /// Record a payment for a resident known to the directory
    pub fn record_payment(&mut self, entry: PaymentEntry) -> PortalResult<Payment> {
        let resident = self
            .directory
            .get(&entry.resident_id)
            .ok_or_else(|| PortalError::not_found(format!("Resident {}", entry.resident_id)))?;
        self.ledger.record(resident, entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboard_reflects_records() {
        let mut community = Community::seeded();
        let summary = community.dashboard();

        assert_eq!(summary.total_residents, seed::residents().len());
        assert_eq!(summary.pending_requests, 2);
        assert_eq!(summary.announcement_count, 3);

        let date = NaiveDate::from_ymd_opt(2023, 11, 1).unwrap();
        let created = community.generate_dues(date);
        assert_eq!(created.len(), community.directory.owners().count());

        let after = community.dashboard();
        assert!(after.outstanding_dues > summary.outstanding_dues);
        assert!(after.collection_ratio < summary.collection_ratio);
    }

    #[test]
    fn test_record_payment_requires_known_resident() {
        let mut community = Community::seeded();
        let entry = PaymentEntry {
            resident_id: "nobody".to_string(),
            amount: 50.0,
            date: NaiveDate::from_ymd_opt(2023, 10, 20).unwrap(),
            method: "Cash".to_string(),
            description: "Parking sticker".to_string(),
        };
        assert!(matches!(
            community.record_payment(entry.clone()),
            Err(PortalError::NotFound { .. })
        ));

        let payment = community
            .record_payment(PaymentEntry {
                resident_id: "res_1".to_string(),
                ..entry
            })
            .unwrap();
        assert_eq!(payment.unit, "Block B, #104");
        assert_eq!(payment.id, "TRX-1032");
    }
}
