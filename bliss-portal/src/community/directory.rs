//! Resident directory

use super::records::{Resident, ResidentStatus, ResidentType};
use serde::Serialize;

/// Rows per page in the admin directory view
pub const RESIDENTS_PER_PAGE: usize = 8;

/// Headcount by status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DirectoryStats {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
}

/// One page of search results
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ResidentPage {
    pub residents: Vec<Resident>,
    /// 1-based, clamped to the available range
    pub page: usize,
    pub total_pages: usize,
    pub total_matches: usize,
}

#[derive(Debug, Clone, Default)]
pub struct ResidentDirectory {
    residents: Vec<Resident>,
}

impl ResidentDirectory {
    pub fn new(residents: Vec<Resident>) -> Self {
        Self { residents }
    }

    pub fn list(&self) -> &[Resident] {
        &self.residents
    }

    pub fn get(&self, id: &str) -> Option<&Resident> {
        self.residents.iter().find(|r| r.id == id)
    }

    /// Case-insensitive match on name, house or email, optionally narrowed
    /// to one status. An empty term matches everyone.
    pub fn search(&self, term: &str, status: Option<ResidentStatus>) -> Vec<&Resident> {
        let term = term.trim().to_lowercase();
        self.residents
            .iter()
            .filter(|r| {
                term.is_empty()
                    || r.name.to_lowercase().contains(&term)
                    || r.house.to_lowercase().contains(&term)
                    || r.email.to_lowercase().contains(&term)
            })
            .filter(|r| status.is_none_or(|s| r.status == s))
            .collect()
    }

    /// Search and slice out one page of results
    pub fn page(&self, term: &str, status: Option<ResidentStatus>, page: usize) -> ResidentPage {
        let matches = self.search(term, status);
        let total_matches = matches.len();
        let total_pages = total_matches.div_ceil(RESIDENTS_PER_PAGE).max(1);
        let page = page.clamp(1, total_pages);

        let residents = matches
            .into_iter()
            .skip((page - 1) * RESIDENTS_PER_PAGE)
            .take(RESIDENTS_PER_PAGE)
            .cloned()
            .collect();

        ResidentPage {
            residents,
            page,
            total_pages,
            total_matches,
        }
    }

    /// Residents billed for monthly maintenance
    pub fn owners(&self) -> impl Iterator<Item = &Resident> {
        self.residents
            .iter()
            .filter(|r| r.resident_type == ResidentType::Owner)
    }

    pub fn stats(&self) -> DirectoryStats {
        let active = self
            .residents
            .iter()
            .filter(|r| r.status == ResidentStatus::Active)
            .count();

        DirectoryStats {
            total: self.residents.len(),
            active,
            inactive: self.residents.len() - active,
        }
    }
}

/// Render residents as CSV with a header row
///
/// Names and houses are quoted since both can contain commas.
pub fn export_csv<'a, I>(residents: I) -> String
where
    I: IntoIterator<Item = &'a Resident>,
{
    let mut lines = vec!["ID,Name,Email,House,Type,Phone,Status,Joined".to_string()];

    for r in residents {
        let resident_type = match r.resident_type {
            ResidentType::Owner => "OWNER",
            ResidentType::Tenant => "TENANT",
        };
        let status = match r.status {
            ResidentStatus::Active => "ACTIVE",
            ResidentStatus::Inactive => "INACTIVE",
        };
        lines.push(format!(
            "{},\"{}\",{},\"{}\",{},{},{},{}",
            r.id,
            r.name.replace('"', "\"\""),
            r.email,
            r.house.replace('"', "\"\""),
            resident_type,
            r.phone,
            status,
            r.join_date
        ));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::community::seed;

    #[test]
    fn test_search_matches_name_house_and_email() {
        let directory = ResidentDirectory::new(seed::residents());

        let by_name = directory.search("alice", None);
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].house, "Block A, #12");

        assert!(directory
            .search("BLOCK d", None)
            .iter()
            .all(|r| r.house.starts_with("Block D")));
        assert_eq!(directory.search("tony@example.com", None).len(), 1);
        assert!(directory.search("nobody-here", None).is_empty());
    }

    #[test]
    fn test_status_filter_and_stats() {
        let directory = ResidentDirectory::new(seed::residents());
        let stats = directory.stats();

        let inactive = directory.search("", Some(ResidentStatus::Inactive));
        assert_eq!(inactive.len(), stats.inactive);
        assert_eq!(stats.active + stats.inactive, stats.total);
    }

    #[test]
    fn test_paging_is_clamped() {
        let directory = ResidentDirectory::new(seed::residents());

        let first = directory.page("", None, 0);
        assert_eq!(first.page, 1);
        assert_eq!(first.residents.len(), RESIDENTS_PER_PAGE);

        let last = directory.page("", None, 99);
        assert_eq!(last.page, last.total_pages);
        assert!(!last.residents.is_empty());

        let empty = directory.page("nobody-here", None, 3);
        assert_eq!((empty.page, empty.total_pages), (1, 1));
        assert!(empty.residents.is_empty());
    }

    #[test]
    fn test_csv_export_quotes_fields_with_commas() {
        let directory = ResidentDirectory::new(seed::residents());
        let csv = export_csv(directory.search("alice", None));

        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("ID,Name,Email,House,Type,Phone,Status,Joined")
        );
        assert_eq!(
            lines.next(),
            Some("1,\"Alice Thompson\",alice@example.com,\"Block A, #12\",OWNER,+1 234 567 890,ACTIVE,2022-05-12")
        );
    }
}
