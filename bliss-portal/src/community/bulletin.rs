//! Announcements and emergency contacts
//!
//! Everyone signed in can read both lists. Posting needs the `can_manage`
//! capability, which callers obtain from the role policy.

use super::records::{Announcement, AnnouncementCategory, ContactCategory, EmergencyContact};
use crate::auth::Capabilities;
use crate::{PortalError, PortalResult};
use bliss_core::Identity;
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::info;

#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct NewAnnouncement {
    pub title: String,
    pub content: String,
    pub category: AnnouncementCategory,
}

#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct NewContact {
    pub name: String,
    pub number: String,
    #[serde(default)]
    pub description: String,
    pub category: ContactCategory,
}

#[derive(Debug, Clone, Default)]
pub struct Bulletin {
    announcements: Vec<Announcement>,
    contacts: Vec<EmergencyContact>,
}

fn next_numeric_id<'a, I: Iterator<Item = &'a str>>(ids: I) -> String {
    let next = ids.filter_map(|id| id.parse::<u32>().ok()).max().unwrap_or(0) + 1;
    next.to_string()
}

fn require_manage(capabilities: Capabilities) -> PortalResult<()> {
    if capabilities.can_manage {
        Ok(())
    } else {
        Err(PortalError::permission("Managing the bulletin requires administrator access"))
    }
}

impl Bulletin {
    pub fn new(announcements: Vec<Announcement>, contacts: Vec<EmergencyContact>) -> Self {
        Self {
            announcements,
            contacts,
        }
    }

    /// Newest first
    pub fn announcements(&self) -> &[Announcement] {
        &self.announcements
    }

    pub fn contacts(&self) -> &[EmergencyContact] {
        &self.contacts
    }

    pub fn post_announcement(
        &mut self,
        capabilities: Capabilities,
        author: &Identity,
        announcement: NewAnnouncement,
        date: NaiveDate,
    ) -> PortalResult<Announcement> {
        require_manage(capabilities)?;

        let title = announcement.title.trim();
        let content = announcement.content.trim();
        if title.is_empty() || content.is_empty() {
            return Err(PortalError::validation(
                "Announcement needs both a title and content",
            ));
        }

        let posted = Announcement {
            id: next_numeric_id(self.announcements.iter().map(|a| a.id.as_str())),
            title: title.to_string(),
            content: content.to_string(),
            date,
            author: author.name.clone(),
            category: announcement.category,
        };

        info!(announcement_id = %posted.id, author = %author.id, "Announcement posted");
        self.announcements.insert(0, posted.clone());
        Ok(posted)
    }

    pub fn add_contact(
        &mut self,
        capabilities: Capabilities,
        contact: NewContact,
    ) -> PortalResult<EmergencyContact> {
        require_manage(capabilities)?;

        let name = contact.name.trim();
        let number = contact.number.trim();
        if name.is_empty() || number.is_empty() {
            return Err(PortalError::validation(
                "Contact needs both a name and a number",
            ));
        }

        let added = EmergencyContact {
            id: next_numeric_id(self.contacts.iter().map(|c| c.id.as_str())),
            name: name.to_string(),
            number: number.to_string(),
            description: contact.description.trim().to_string(),
            category: contact.category,
        };

        info!(contact_id = %added.id, "Emergency contact added");
        self.contacts.push(added.clone());
        Ok(added)
    }
}
