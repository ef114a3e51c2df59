//! Template system for server-side rendering
//!
//! Pages are rendered from a [`Layout`] plus a [`PageBody`]: a handful of
//! headline figures and one table, prepared here so the templates stay
//! free of domain logic.

use askama::Template;
use bliss_core::Role;
use bliss_portal::community::{billing_period, PaymentStatus, RequestStatus};
use bliss_portal::{Community, Layout, Page};
use serde::Serialize;

/// Sign-in page
#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub title: String,
    pub version: String,
    /// (wire name, label) of every role
    pub roles: Vec<(String, String)>,
}

impl Default for LoginTemplate {
    fn default() -> Self {
        Self {
            title: bliss_portal::layout::PORTAL_TITLE.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            roles: Role::ALL
                .iter()
                .map(|role| (role.as_str().to_string(), role.label().to_string()))
                .collect(),
        }
    }
}

/// Page shell around a rendered route
#[derive(Template)]
#[template(path = "portal.html")]
pub struct PortalTemplate {
    pub title: String,
    pub layout: Layout,
    pub body: PageBody,
}

impl PortalTemplate {
    pub fn new(layout: Layout, community: &Community) -> Self {
        Self {
            title: layout.page.title().to_string(),
            body: PageBody::for_page(&layout.page, community),
            layout,
        }
    }
}

/// Error page template
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub title: String,
    pub error_code: u16,
    pub error_message: String,
}

#[derive(Debug, Clone)]
pub struct Stat {
    pub label: String,
    pub value: String,
}

impl Stat {
    fn new<V: ToString>(label: &str, value: V) -> Self {
        Self {
            label: label.to_string(),
            value: value.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    fn row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }
}

/// Content area of a page
#[derive(Debug, Clone, Default)]
pub struct PageBody {
    pub intro: Option<String>,
    pub stats: Vec<Stat>,
    pub table: Option<Table>,
    /// Show the create/manage affordance
    pub can_manage: bool,
}

fn money(amount: f64) -> String {
    format!("${:.2}", amount)
}

/// `IN_PROGRESS` → `IN PROGRESS`
fn badge<T: Serialize>(value: &T) -> String {
    serde_json::to_value(value)
        .ok()
        .and_then(|v| v.as_str().map(|s| s.replace('_', " ")))
        .unwrap_or_default()
}

impl PageBody {
    pub fn for_page(page: &Page, community: &Community) -> Self {
        match page {
            Page::Dashboard { admin_name } => {
                let summary = community.dashboard();
                let mut recent = Table::new(&["ID", "Resident", "Title", "Status"]);
                for request in community.queue.list().iter().take(5) {
                    recent.row(vec![
                        request.id.clone(),
                        request.resident_name.clone(),
                        request.title.clone(),
                        badge(&request.status),
                    ]);
                }

                Self {
                    intro: Some(format!("Welcome back, {}.", admin_name)),
                    stats: vec![
                        Stat::new("Residents", summary.total_residents),
                        Stat::new("Pending requests", summary.pending_requests),
                        Stat::new("Collection", format!("{}%", summary.collection_ratio)),
                        Stat::new("Outstanding", money(summary.outstanding_dues)),
                        Stat::new("Announcements", summary.announcement_count),
                    ],
                    table: Some(recent),
                    can_manage: false,
                }
            }
            Page::ResidentDirectory => {
                let stats = community.directory.stats();
                let mut residents =
                    Table::new(&["Name", "House", "Type", "Status", "Phone", "Email"]);
                for r in community.directory.list() {
                    residents.row(vec![
                        r.name.clone(),
                        r.house.clone(),
                        badge(&r.resident_type),
                        badge(&r.status),
                        r.phone.clone(),
                        r.email.clone(),
                    ]);
                }

                Self {
                    stats: vec![
                        Stat::new("Total", stats.total),
                        Stat::new("Active", stats.active),
                        Stat::new("Inactive", stats.inactive),
                    ],
                    table: Some(residents),
                    ..Self::default()
                }
            }
            Page::ServiceQueue => {
                let mut queue =
                    Table::new(&["ID", "Resident", "Category", "Title", "Filed", "Status"]);
                for request in community.queue.list() {
                    queue.row(vec![
                        request.id.clone(),
                        request.resident_name.clone(),
                        badge(&request.category),
                        request.title.clone(),
                        request.created_at.to_string(),
                        badge(&request.status),
                    ]);
                }

                Self {
                    stats: vec![
                        Stat::new(
                            "Pending",
                            community.queue.count_with_status(RequestStatus::Pending),
                        ),
                        Stat::new(
                            "In progress",
                            community.queue.count_with_status(RequestStatus::InProgress),
                        ),
                    ],
                    table: Some(queue),
                    ..Self::default()
                }
            }
            Page::PaymentLedger => {
                let stats = community.ledger.stats();
                let mut ledger = Table::new(&[
                    "ID", "Resident", "Unit", "Description", "Date", "Amount", "Status",
                ]);
                for p in community.ledger.list() {
                    ledger.row(vec![
                        p.id.clone(),
                        p.resident_name.clone(),
                        p.unit.clone(),
                        p.description.clone(),
                        p.date.to_string(),
                        money(p.amount),
                        badge(&p.status),
                    ]);
                }

                Self {
                    intro: Some(format!(
                        "Billing period: {}",
                        billing_period(chrono::Local::now().date_naive())
                    )),
                    stats: vec![
                        Stat::new("Collected", money(stats.paid)),
                        Stat::new("Outstanding", money(stats.outstanding)),
                        Stat::new("Collection", format!("{}%", stats.collection_ratio)),
                    ],
                    table: Some(ledger),
                    can_manage: false,
                }
            }
            Page::Welcome { resident_name } => {
                let mut latest = Table::new(&["Date", "Title", "Category"]);
                for a in community.bulletin.announcements().iter().take(3) {
                    latest.row(vec![a.date.to_string(), a.title.clone(), badge(&a.category)]);
                }

                Self {
                    intro: Some(format!(
                        "Hello, {}. Here is what's new in Bliss III.",
                        resident_name
                    )),
                    table: Some(latest),
                    ..Self::default()
                }
            }
            Page::Profile { identity } => Self {
                stats: vec![
                    Stat::new("Name", &identity.name),
                    Stat::new("Email", &identity.email),
                    Stat::new("House", identity.house_number.as_deref().unwrap_or("-")),
                    Stat::new("Role", identity.role.label()),
                ],
                ..Self::default()
            },
            Page::SubmitRequest { resident_id } => {
                let mut mine = Table::new(&["ID", "Title", "Filed", "Status"]);
                for request in community.queue.for_resident(resident_id) {
                    mine.row(vec![
                        request.id.clone(),
                        request.title.clone(),
                        request.created_at.to_string(),
                        badge(&request.status),
                    ]);
                }

                Self {
                    intro: Some(
                        "Describe the issue and our maintenance team will follow up.".to_string(),
                    ),
                    table: Some(mine),
                    ..Self::default()
                }
            }
            Page::PaymentHistory { resident_id } => {
                let history = community.ledger.for_resident(resident_id);
                let (paid, due) = history.iter().fold((0.0, 0.0), |(paid, due), p| {
                    if p.status == PaymentStatus::Paid {
                        (paid + p.amount, due)
                    } else {
                        (paid, due + p.amount)
                    }
                });

                let mut table = Table::new(&["ID", "Description", "Date", "Amount", "Status"]);
                for p in &history {
                    table.row(vec![
                        p.id.clone(),
                        p.description.clone(),
                        p.date.to_string(),
                        money(p.amount),
                        badge(&p.status),
                    ]);
                }

                Self {
                    stats: vec![Stat::new("Paid", money(paid)), Stat::new("Due", money(due))],
                    table: Some(table),
                    ..Self::default()
                }
            }
            Page::Announcements { can_manage } => {
                let mut board = Table::new(&["Date", "Title", "Category", "Author", "Details"]);
                for a in community.bulletin.announcements() {
                    board.row(vec![
                        a.date.to_string(),
                        a.title.clone(),
                        badge(&a.category),
                        a.author.clone(),
                        a.content.clone(),
                    ]);
                }

                Self {
                    table: Some(board),
                    can_manage: *can_manage,
                    ..Self::default()
                }
            }
            Page::EmergencyContacts { can_manage } => {
                let mut contacts = Table::new(&["Name", "Number", "Category", "Description"]);
                for c in community.bulletin.contacts() {
                    contacts.row(vec![
                        c.name.clone(),
                        c.number.clone(),
                        badge(&c.category),
                        c.description.clone(),
                    ]);
                }

                Self {
                    table: Some(contacts),
                    can_manage: *can_manage,
                    ..Self::default()
                }
            }
        }
    }
}
