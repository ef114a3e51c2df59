//! Community workflows driven through the public API

use bliss_core::Role;
use bliss_portal::community::{
    AnnouncementCategory, NewAnnouncement, NewRequest, PaymentStatus, RequestCategory,
    RequestStatus,
};
use bliss_portal::{
    paths, sign_in, Community, LayoutComposer, MockCredentials, Page, PortalError, RolePolicy,
};
use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_resident_history_only_shows_own_payments() {
    let policy = RolePolicy::standard();
    let community = Community::seeded();
    let resident = sign_in(&MockCredentials::new(Role::Resident));

    let layout = LayoutComposer::new(&policy)
        .compose(&resident, paths::RESIDENT_HISTORY)
        .unwrap();
    let Page::PaymentHistory { resident_id } = &layout.page else {
        panic!("expected payment history page, got {:?}", layout.page);
    };

    let history = community.ledger.for_resident(resident_id);
    assert!(!history.is_empty());
    assert!(history.iter().all(|p| p.resident_id == "res_1"));
    assert!(history.len() < community.ledger.list().len());
}

#[test]
fn test_submitted_request_reaches_admin_queue() {
    let mut community = Community::seeded();
    let resident = sign_in(&MockCredentials::new(Role::Resident));
    let pending_before = community.dashboard().pending_requests;

    let request = community
        .queue
        .submit(
            &resident,
            NewRequest {
                title: "Gate remote not working".to_string(),
                description: "The remote for the east gate stopped responding.".to_string(),
                category: RequestCategory::Security,
                image_url: None,
            },
            date(2023, 10, 21),
        )
        .unwrap();

    assert_eq!(community.dashboard().pending_requests, pending_before + 1);
    assert_eq!(community.queue.list()[0].id, request.id);

    community
        .queue
        .update_status(&request.id, RequestStatus::InProgress)
        .unwrap();
    assert_eq!(community.dashboard().pending_requests, pending_before);
}

#[test]
fn test_monthly_dues_show_up_in_owner_history() {
    let mut community = Community::seeded();
    let created = community.generate_dues(date(2023, 11, 1));
    assert!(!created.is_empty());

    let history = community.ledger.for_resident("res_1");
    let due = history
        .iter()
        .find(|p| p.description == "Monthly Maintenance Fee - November 2023")
        .unwrap();
    assert_eq!(due.status, PaymentStatus::Pending);

    // tenants are not billed
    assert!(community
        .ledger
        .for_resident("2")
        .iter()
        .all(|p| !p.description.contains("November 2023")));
}

#[test]
fn test_bulletin_posting_follows_role_capabilities() {
    let policy = RolePolicy::standard();
    let mut community = Community::seeded();
    let notice = NewAnnouncement {
        title: "Fogging schedule".to_string(),
        content: "Mosquito fogging on Thursday evening.".to_string(),
        category: AnnouncementCategory::Urgent,
    };

    let resident = sign_in(&MockCredentials::new(Role::Resident));
    let denied = community.bulletin.post_announcement(
        policy.capabilities(resident.role),
        &resident,
        notice.clone(),
        date(2023, 10, 21),
    );
    assert!(matches!(denied, Err(PortalError::Permission { .. })));

    let admin = sign_in(&MockCredentials::new(Role::Admin));
    community
        .bulletin
        .post_announcement(policy.capabilities(admin.role), &admin, notice, date(2023, 10, 21))
        .unwrap();
    assert_eq!(community.dashboard().announcement_count, 4);
}
