//! Demo records loaded at startup

use super::records::*;
use chrono::NaiveDate;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

pub fn residents() -> Vec<Resident> {
    use ResidentStatus::{Active, Inactive};
    use ResidentType::{Owner, Tenant};

    let rows = [
        ("1", "Alice Thompson", "alice@example.com", "Block A, #12", Active, "+1 234 567 890", Owner, day(2022, 5, 12)),
        ("2", "Bob Smith", "bob@example.com", "Block C, #05", Active, "+1 234 567 891", Tenant, day(2023, 1, 15)),
        ("3", "Charlie Davis", "charlie@example.com", "Block B, #22", Inactive, "+1 234 567 892", Tenant, day(2021, 11, 20)),
        ("4", "Diana Prince", "diana@example.com", "Block A, #42", Active, "+1 234 567 893", Owner, day(2020, 3, 10)),
        ("5", "Edward Norton", "edward@example.com", "Block D, #18", Active, "+1 234 567 894", Owner, day(2022, 8, 1)),
        ("6", "Fiona Gallagher", "fiona@example.com", "Block B, #09", Active, "+1 234 567 895", Tenant, day(2023, 4, 12)),
        ("7", "George Miller", "george@example.com", "Block C, #14", Inactive, "+1 234 567 896", Tenant, day(2022, 12, 5)),
        ("8", "Hannah Abbott", "hannah@example.com", "Block A, #33", Active, "+1 234 567 897", Owner, day(2021, 6, 25)),
        ("9", "Ian Wright", "ian@example.com", "Block D, #02", Active, "+1 234 567 898", Owner, day(2023, 2, 28)),
        ("10", "Jenny Kim", "jenny@example.com", "Block B, #11", Active, "+1 234 567 899", Tenant, day(2023, 5, 19)),
        ("11", "Kevin Hart", "kevin@example.com", "Block C, #21", Inactive, "+1 234 567 900", Tenant, day(2022, 9, 14)),
        ("12", "Laura Palmer", "laura@example.com", "Block A, #05", Active, "+1 234 567 901", Owner, day(2020, 11, 11)),
        ("13", "Mike Ross", "mike@example.com", "Block D, #24", Active, "+1 234 567 902", Tenant, day(2023, 6, 1)),
        ("14", "Nina Simone", "nina@example.com", "Block B, #18", Inactive, "+1 234 567 903", Tenant, day(2021, 2, 15)),
        ("15", "Oscar Wilde", "oscar@example.com", "Block C, #12", Active, "+1 234 567 904", Owner, day(2021, 8, 30)),
        ("16", "Peter Parker", "peter@example.com", "Block A, #15", Active, "+1 234 567 905", Tenant, day(2023, 7, 20)),
        ("17", "Quinn Fabray", "quinn@example.com", "Block D, #07", Active, "+1 234 567 906", Owner, day(2022, 1, 5)),
        ("18", "Riley Reid", "riley@example.com", "Block B, #04", Inactive, "+1 234 567 907", Tenant, day(2023, 2, 14)),
        ("19", "Steve Rogers", "steve@example.com", "Block C, #30", Active, "+1 234 567 908", Owner, day(2020, 7, 4)),
        ("20", "Tony Stark", "tony@example.com", "Block A, #01", Active, "+1 234 567 909", Owner, day(2019, 12, 25)),
        ("21", "Uma Thurman", "uma@example.com", "Block D, #13", Inactive, "+1 234 567 910", Tenant, day(2023, 3, 3)),
        ("22", "Victor Von Doom", "victor@example.com", "Block B, #25", Active, "+1 234 567 911", Owner, day(2021, 10, 31)),
        ("23", "Wanda Maximoff", "wanda@example.com", "Block C, #08", Active, "+1 234 567 912", Owner, day(2022, 11, 1)),
        ("24", "Xavier Renegade", "xavier@example.com", "Block A, #19", Inactive, "+1 234 567 913", Tenant, day(2023, 8, 15)),
        ("25", "Yolanda Hadid", "yolanda@example.com", "Block D, #04", Active, "+1 234 567 914", Owner, day(2022, 4, 18)),
        // the mock resident account, so its history and requests are not empty
        ("res_1", "Alex Resident", "resident@bliss3.com", "Block B, #104", Active, "+1 234 567 915", Owner, day(2023, 1, 9)),
    ];

    rows.into_iter()
        .map(
            |(id, name, email, house, status, phone, resident_type, join_date)| Resident {
                id: id.to_string(),
                name: name.to_string(),
                email: email.to_string(),
                house: house.to_string(),
                status,
                phone: phone.to_string(),
                resident_type,
                join_date,
            },
        )
        .collect()
}

pub fn payments() -> Vec<Payment> {
    use PaymentStatus::{Overdue, Paid, Pending};
    use ResidentType::{Owner, Tenant};

    let rows = [
        ("TRX-1031", "res_1", "Alex Resident", Owner, "Block B, #104", 75.00, day(2023, 10, 5), Pending, "-", "Clubhouse Event Fee"),
        ("TRX-1030", "res_1", "Alex Resident", Owner, "Block B, #104", 150.00, day(2023, 10, 1), Paid, "Online", "Monthly Maintenance Fee"),
        ("TRX-1029", "res_1", "Alex Resident", Owner, "Block B, #104", 150.00, day(2023, 9, 1), Paid, "Bank Transfer", "Monthly Maintenance Fee"),
        ("TRX-1024", "1", "Alice Thompson", Owner, "Block A, #12", 150.00, day(2023, 10, 1), Paid, "Online", "Monthly Maintenance Fee"),
        ("TRX-1025", "2", "Bob Smith", Tenant, "Block C, #05", 150.00, day(2023, 10, 2), Paid, "Cash", "Security Levy"),
        ("TRX-1026", "3", "Charlie Davis", Tenant, "Block B, #22", 120.00, day(2023, 10, 3), Pending, "Bank Transfer", "Utilities Deposit"),
        ("TRX-1027", "4", "Diana Prince", Owner, "Block A, #42", 200.00, day(2023, 10, 4), Overdue, "-", "Sinking Fund contribution"),
        ("TRX-1028", "1", "Alice Thompson", Owner, "Block A, #12", 150.00, day(2023, 9, 1), Paid, "Online", "Monthly Maintenance Fee"),
    ];

    rows.into_iter()
        .map(
            |(id, resident_id, resident_name, resident_type, unit, amount, date, status, method, description)| Payment {
                id: id.to_string(),
                resident_id: resident_id.to_string(),
                resident_name: resident_name.to_string(),
                resident_type,
                unit: unit.to_string(),
                amount,
                date,
                status,
                method: method.to_string(),
                description: description.to_string(),
            },
        )
        .collect()
}

pub fn service_requests() -> Vec<ServiceRequest> {
    use RequestCategory::{Maintenance, Security, Utilities};
    use RequestStatus::{Completed, InProgress, Pending};

    let rows = [
        ("REQ-004", "res_1", "Alex Resident", "Gym Equipment Repair", "Two treadmills in the clubhouse gym stopped working.", Pending, day(2023, 10, 12), Maintenance),
        ("REQ-003", "5", "Edward Norton", "Pipe Leakage", "Water leaking from the main pipe behind Block D.", Completed, day(2023, 10, 9), Utilities),
        ("REQ-002", "6", "Fiona Gallagher", "Unidentified Vehicle", "A car without a sticker has been parked near Block B for three days.", InProgress, day(2023, 10, 11), Security),
        ("REQ-001", "2", "Bob Smith", "Streetlight Broken", "The streetlight outside Block C has been off since Sunday.", Pending, day(2023, 10, 10), Maintenance),
    ];

    rows.into_iter()
        .map(
            |(id, resident_id, resident_name, title, description, status, created_at, category)| {
                ServiceRequest {
                    id: id.to_string(),
                    resident_id: resident_id.to_string(),
                    resident_name: resident_name.to_string(),
                    title: title.to_string(),
                    description: description.to_string(),
                    status,
                    created_at,
                    category,
                    image_url: None,
                }
            },
        )
        .collect()
}

pub fn announcements() -> Vec<Announcement> {
    vec![
        Announcement {
            id: "1".to_string(),
            title: "Monthly Water Maintenance".to_string(),
            content: "Please be advised that water supply will be interrupted on 15th Oct \
                      from 10 AM to 4 PM for routine maintenance."
                .to_string(),
            date: day(2023, 10, 10),
            author: "Admin".to_string(),
            category: AnnouncementCategory::Urgent,
        },
        Announcement {
            id: "2".to_string(),
            title: "Community Garden Cleanup".to_string(),
            content: "Join us this Saturday for our monthly garden cleanup. \
                      Refreshments will be provided!"
                .to_string(),
            date: day(2023, 10, 8),
            author: "Social Committee".to_string(),
            category: AnnouncementCategory::Event,
        },
        Announcement {
            id: "3".to_string(),
            title: "Security System Upgrade".to_string(),
            content: "We are installing new CCTV cameras at the main entrance. \
                      Residents may experience minor delays."
                .to_string(),
            date: day(2023, 10, 5),
            author: "Security Dept".to_string(),
            category: AnnouncementCategory::General,
        },
    ]
}

pub fn emergency_contacts() -> Vec<EmergencyContact> {
    use ContactCategory::{Admin, Emergency, Essential};

    let rows = [
        ("1", "Village Security", "911-000-1234", "24/7 Patrol and Entrance Security", Emergency),
        ("2", "Ambulance / Medical", "911-000-5678", "Paramedic and First Aid Dispatch", Emergency),
        ("3", "Fire Department", "911-000-9999", "Immediate Fire Response", Emergency),
        ("4", "Management Office", "012-345-6789", "Administrative and General Queries", Admin),
        ("5", "Utility Support (Water/Electricity)", "088-777-6655", "Main Line Bursts and Power Outages", Essential),
    ];

    rows.into_iter()
        .map(|(id, name, number, description, category)| EmergencyContact {
            id: id.to_string(),
            name: name.to_string(),
            number: number.to_string(),
            description: description.to_string(),
            category,
        })
        .collect()
}
