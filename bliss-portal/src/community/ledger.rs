//! Payments ledger
//!
//! Newest entries come first. Ids are `TRX-nnnn`, continuing from the
//! highest id already present.

use super::records::{Payment, PaymentStatus, Resident};
use crate::{PortalError, PortalResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Amount billed per owner by `generate_dues`
pub const MONTHLY_DUE: f64 = 150.00;

const DUES_DESCRIPTION: &str = "Monthly Maintenance Fee";
const ADMIN_METHOD: &str = "Updated by Admin";

/// Collection figures over the whole ledger
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct LedgerStats {
    /// Sum of PAID amounts
    pub paid: f64,
    /// Sum of every non-PAID amount
    pub outstanding: f64,
    /// Percentage of records that are PAID, rounded; 0 for an empty ledger
    pub collection_ratio: u32,
}

/// Manual ledger entry recorded by an administrator
#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct PaymentEntry {
    pub resident_id: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub method: String,
    pub description: String,
}

#[derive(Debug, Clone, Default)]
pub struct PaymentLedger {
    payments: Vec<Payment>,
    next_seq: u64,
}

/// Billing period label for a date, e.g. "October 2023"
pub fn billing_period(date: NaiveDate) -> String {
    date.format("%B %Y").to_string()
}

impl PaymentLedger {
    pub fn new(payments: Vec<Payment>) -> Self {
        let next_seq = payments
            .iter()
            .filter_map(|p| p.id.strip_prefix("TRX-"))
            .filter_map(|n| n.parse::<u64>().ok())
            .max()
            .map_or(1, |max| max + 1);

        Self { payments, next_seq }
    }

    pub fn list(&self) -> &[Payment] {
        &self.payments
    }

    pub fn get(&self, id: &str) -> Option<&Payment> {
        self.payments.iter().find(|p| p.id == id)
    }

    pub fn stats(&self) -> LedgerStats {
        let mut paid = 0.0;
        let mut outstanding = 0.0;
        let mut paid_count = 0usize;

        for payment in &self.payments {
            if payment.status == PaymentStatus::Paid {
                paid += payment.amount;
                paid_count += 1;
            } else {
                outstanding += payment.amount;
            }
        }

        let collection_ratio = if self.payments.is_empty() {
            0
        } else {
            (paid_count as f64 / self.payments.len() as f64 * 100.0).round() as u32
        };

        LedgerStats {
            paid,
            outstanding,
            collection_ratio,
        }
    }

    /// Case-insensitive match on resident name, unit or transaction id
    pub fn search(&self, term: &str) -> Vec<&Payment> {
        let term = term.trim().to_lowercase();
        self.payments
            .iter()
            .filter(|p| {
                p.resident_name.to_lowercase().contains(&term)
                    || p.unit.to_lowercase().contains(&term)
                    || p.id.to_lowercase().contains(&term)
            })
            .collect()
    }

    /// Payment history of one resident
    pub fn for_resident(&self, resident_id: &str) -> Vec<&Payment> {
        self.payments
            .iter()
            .filter(|p| p.resident_id == resident_id)
            .collect()
    }

    /// Advance a record along PAID -> PENDING -> OVERDUE -> PAID
    pub fn cycle_status(&mut self, id: &str) -> PortalResult<&Payment> {
        let payment = self
            .payments
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| PortalError::not_found(format!("Payment {}", id)))?;

        payment.status = payment.status.next();
        if payment.status == PaymentStatus::Paid {
            payment.method = ADMIN_METHOD.to_string();
        }

        info!(payment_id = id, status = ?payment.status, "Payment status changed");
        Ok(payment)
    }

    /// Bill every owner for `period`
    ///
    /// New PENDING records go to the top of the ledger. Owners already
    /// billed for the same period are skipped, so running this twice does
    /// not double-charge anyone.
    pub fn generate_dues<'a, I>(&mut self, owners: I, period: &str, date: NaiveDate) -> Vec<Payment>
    where
        I: IntoIterator<Item = &'a Resident>,
    {
        let description = format!("{} - {}", DUES_DESCRIPTION, period);

        let mut created = Vec::new();
        for owner in owners {
            let already_billed = self
                .payments
                .iter()
                .any(|p| p.resident_id == owner.id && p.description == description);
            if already_billed {
                continue;
            }

            created.push(Payment {
                id: self.allocate_id(),
                resident_id: owner.id.clone(),
                resident_name: owner.name.clone(),
                resident_type: owner.resident_type,
                unit: owner.house.clone(),
                amount: MONTHLY_DUE,
                date,
                status: PaymentStatus::Pending,
                method: "-".to_string(),
                description: description.clone(),
            });
        }

        info!(period, created = created.len(), "Generated monthly dues");
        self.payments.splice(0..0, created.iter().cloned());
        created
    }

    /// Record a payment received outside the portal
    pub fn record(&mut self, resident: &Resident, entry: PaymentEntry) -> PortalResult<Payment> {
        if !(entry.amount.is_finite() && entry.amount > 0.0) {
            return Err(PortalError::validation("Amount must be greater than zero"));
        }
        if entry.description.trim().is_empty() {
            return Err(PortalError::validation("Description must not be empty"));
        }

        let payment = Payment {
            id: self.allocate_id(),
            resident_id: resident.id.clone(),
            resident_name: resident.name.clone(),
            resident_type: resident.resident_type,
            unit: resident.house.clone(),
            amount: entry.amount,
            date: entry.date,
            status: PaymentStatus::Paid,
            method: entry.method.trim().to_string(),
            description: entry.description.trim().to_string(),
        };

        info!(payment_id = %payment.id, resident_id = %resident.id, "Payment recorded");
        self.payments.insert(0, payment.clone());
        Ok(payment)
    }

    pub fn remove(&mut self, id: &str) -> PortalResult<Payment> {
        let index = self
            .payments
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| PortalError::not_found(format!("Payment {}", id)))?;

        info!(payment_id = id, "Payment removed");
        Ok(self.payments.remove(index))
    }

    fn allocate_id(&mut self) -> String {
        let id = format!("TRX-{}", self.next_seq);
        self.next_seq += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::community::seed;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_empty_ledger_stats() {
        let stats = PaymentLedger::default().stats();
        assert_eq!(stats.collection_ratio, 0);
        assert_eq!(stats.paid, 0.0);
        assert_eq!(stats.outstanding, 0.0);
    }

    #[test]
    fn test_stats_round_the_ratio() {
        let mut payments = seed::payments();
        payments.truncate(3);
        payments[0].status = PaymentStatus::Paid;
        payments[1].status = PaymentStatus::Pending;
        payments[2].status = PaymentStatus::Overdue;
        let amounts: Vec<f64> = payments.iter().map(|p| p.amount).collect();

        let stats = PaymentLedger::new(payments).stats();
        assert_eq!(stats.collection_ratio, 33);
        assert_eq!(stats.paid, amounts[0]);
        assert_eq!(stats.outstanding, amounts[1] + amounts[2]);
    }

    #[test]
    fn test_cycle_status_marks_admin_updates() {
        let mut ledger = PaymentLedger::new(seed::payments());
        let overdue = ledger
            .list()
            .iter()
            .find(|p| p.status == PaymentStatus::Overdue)
            .map(|p| p.id.clone())
            .unwrap();

        let updated = ledger.cycle_status(&overdue).unwrap();
        assert_eq!(updated.status, PaymentStatus::Paid);
        assert_eq!(updated.method, "Updated by Admin");

        let updated = ledger.cycle_status(&overdue).unwrap();
        assert_eq!(updated.status, PaymentStatus::Pending);
        assert_eq!(updated.method, "Updated by Admin");

        assert!(matches!(
            ledger.cycle_status("TRX-0"),
            Err(PortalError::NotFound { .. })
        ));
    }

    #[test]
    fn test_generate_dues_prepends_one_record_per_owner() {
        let directory = seed::residents();
        let owners: Vec<_> = directory
            .iter()
            .filter(|r| r.resident_type == crate::community::records::ResidentType::Owner)
            .collect();

        let mut ledger = PaymentLedger::new(seed::payments());
        let before = ledger.list().len();
        let period = billing_period(date(2023, 11, 1));
        assert_eq!(period, "November 2023");

        let created = ledger.generate_dues(owners.iter().copied(), &period, date(2023, 11, 1));
        assert_eq!(created.len(), owners.len());
        assert_eq!(ledger.list().len(), before + owners.len());

        let top = &ledger.list()[0];
        assert_eq!(top.status, PaymentStatus::Pending);
        assert_eq!(top.amount, MONTHLY_DUE);
        assert_eq!(top.description, "Monthly Maintenance Fee - November 2023");

        // same period again bills nobody
        let again = ledger.generate_dues(owners.iter().copied(), &period, date(2023, 11, 2));
        assert!(again.is_empty());
    }

    #[test]
    fn test_search_and_remove() {
        let mut ledger = PaymentLedger::new(seed::payments());

        let hits = ledger.search("block a, #12");
        assert!(!hits.is_empty());
        assert!(hits.iter().all(|p| p.unit == "Block A, #12"));

        let id = hits[0].id.clone();
        assert_eq!(ledger.search(&id.to_lowercase()).len(), 1);

        let removed = ledger.remove(&id).unwrap();
        assert_eq!(removed.id, id);
        assert!(ledger.get(&id).is_none());
        assert!(ledger.remove(&id).is_err());
    }

    #[test]
    fn test_record_validates_amount() {
        let residents = seed::residents();
        let mut ledger = PaymentLedger::new(Vec::new());
        let entry = PaymentEntry {
            resident_id: residents[0].id.clone(),
            amount: 0.0,
            date: date(2023, 10, 20),
            method: "Cash".to_string(),
            description: "Oct Maintenance Fee".to_string(),
        };
        assert!(ledger.record(&residents[0], entry.clone()).is_err());

        let payment = ledger
            .record(
                &residents[0],
                PaymentEntry {
                    amount: 150.0,
                    ..entry
                },
            )
            .unwrap();
        assert_eq!(payment.id, "TRX-1");
        assert_eq!(payment.status, PaymentStatus::Paid);
        assert_eq!(ledger.for_resident(&residents[0].id).len(), 1);
    }
}
