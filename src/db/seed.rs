//! Fixed demo dataset: 15 customers, 15 lockers, 9 reservations, 11
//! payments. Each block is guarded by an is-empty check so re-running the
//! seeder is harmless.

use anyhow::Result;
use chrono::{Duration, Utc};
use std::collections::HashMap;
use tracing::info;

use super::{NewLocker, NewPayment, NewReservation, NewUser, Store};
use crate::config::SecurityConfig;
use crate::entities::users::role;
use crate::entities::{lockers, payments, reservations};

/// Shared password for all demo customer accounts.
const DEMO_PASSWORD: &str = "password123";

/// (username, email, display name)
const CUSTOMERS: &[(&str, &str, &str)] = &[
    ("john_doe", "john@example.com", "John Doe"),
    ("maria_garcia", "maria@example.com", "Maria Garcia"),
    ("ahmet_yilmaz", "ahmet@example.com", "Ahmet Yılmaz"),
    ("zeynep_demir", "zeynep@example.com", "Zeynep Demir"),
    ("hans_schmidt", "hans@example.com", "Hans Schmidt"),
    ("mehmet_kaya", "mehmet@example.com", "Mehmet Kaya"),
    ("ayse_celik", "ayse@example.com", "Ayşe Çelik"),
    ("emma_wilson", "emma@example.com", "Emma Wilson"),
    ("can_ozturk", "can@example.com", "Can Öztürk"),
    ("sofia_rossi", "sofia@example.com", "Sofia Rossi"),
    ("murat_kaya", "murat@example.com", "Murat Kaya"),
    ("seyda_demir", "seyda@example.com", "Şeyda Demir"),
    ("ali_yildiz", "ali@example.com", "Ali Yıldız"),
    ("fatma_sahin", "fatma@example.com", "Fatma Şahin"),
    ("deniz_arslan", "deniz@example.com", "Deniz Arslan"),
];

/// (number, occupied, assigned username). 11 occupied, 4 available.
const LOCKERS: &[(&str, bool, Option<&str>)] = &[
    ("L101", true, Some("murat_kaya")),
    ("L102", true, Some("seyda_demir")),
    ("L103", true, Some("ahmet_yilmaz")),
    ("L104", true, Some("zeynep_demir")),
    ("L105", false, None),
    ("L106", true, Some("mehmet_kaya")),
    ("L107", false, None),
    ("L108", true, Some("emma_wilson")),
    ("L109", true, Some("can_ozturk")),
    ("L110", false, None),
    ("L111", true, Some("maria_garcia")),
    ("L112", true, Some("hans_schmidt")),
    ("L113", false, None),
    ("L114", true, Some("ali_yildiz")),
    ("L115", true, Some("fatma_sahin")),
];

/// (username, locker number, start offset hours, end offset hours, status).
/// 7 active, 2 pending.
const RESERVATIONS: &[(&str, &str, i64, i64, &str)] = &[
    ("seyda_demir", "L102", 0, 2, reservations::status::ACTIVE),
    ("ahmet_yilmaz", "L103", -2, 22, reservations::status::ACTIVE),
    ("zeynep_demir", "L104", -24, 12, reservations::status::ACTIVE),
    ("mehmet_kaya", "L106", 0, 48, reservations::status::ACTIVE),
    ("emma_wilson", "L108", 24, 72, reservations::status::PENDING),
    ("can_ozturk", "L109", 0, 48, reservations::status::ACTIVE),
    ("ali_yildiz", "L114", 0, 4, reservations::status::ACTIVE),
    ("fatma_sahin", "L115", 0, 6, reservations::status::PENDING),
    ("murat_kaya", "L101", 0, 1, reservations::status::ACTIVE),
];

/// (username, amount, status). 5 pending, 6 completed.
const PAYMENTS: &[(&str, f64, &str)] = &[
    ("john_doe", 25.00, payments::status::COMPLETED),
    ("ahmet_yilmaz", 50.00, payments::status::PENDING),
    ("zeynep_demir", 15.00, payments::status::COMPLETED),
    ("mehmet_kaya", 75.00, payments::status::COMPLETED),
    ("emma_wilson", 30.00, payments::status::PENDING),
    ("can_ozturk", 45.00, payments::status::COMPLETED),
    ("murat_kaya", 20.00, payments::status::PENDING),
    ("seyda_demir", 35.00, payments::status::COMPLETED),
    ("ali_yildiz", 40.00, payments::status::PENDING),
    ("fatma_sahin", 55.00, payments::status::COMPLETED),
    ("deniz_arslan", 60.00, payments::status::PENDING),
];

/// Populate the demo dataset. Idempotent: every section is skipped when its
/// table already holds rows.
pub async fn ensure_demo_data(store: &Store, security: &SecurityConfig) -> Result<()> {
    seed_customers(store, security).await?;

    // Foreign keys are resolved by username lookup, never by assuming
    // the ids the database happened to assign.
    let customers: HashMap<String, i32> = store
        .list_users_by_role(role::CUSTOMER)
        .await?
        .into_iter()
        .map(|u| (u.username, u.id))
        .collect();
    let display_names: HashMap<&str, &str> = CUSTOMERS
        .iter()
        .map(|(username, _, display)| (*username, *display))
        .collect();

    seed_lockers(store, &customers, &display_names).await?;

    let locker_ids: HashMap<String, i32> = store
        .list_lockers()
        .await?
        .into_iter()
        .map(|l| (l.number, l.id))
        .collect();

    seed_reservations(store, &customers, &locker_ids).await?;
    seed_payments(store, &customers).await?;

    Ok(())
}

async fn seed_customers(store: &Store, security: &SecurityConfig) -> Result<()> {
    // The bootstrap admin is seeded by the initial migration; anything beyond
    // that single row means the customers are already in place.
    if store.count_users().await? > 1 {
        return Ok(());
    }

    for (username, email, _) in CUSTOMERS {
        store
            .create_user(
                NewUser {
                    username: (*username).to_string(),
                    email: (*email).to_string(),
                    password: DEMO_PASSWORD.to_string(),
                    role: role::CUSTOMER.to_string(),
                },
                security,
            )
            .await?;
    }

    info!("Seeded {} demo customers", CUSTOMERS.len());
    Ok(())
}

async fn seed_lockers(
    store: &Store,
    customers: &HashMap<String, i32>,
    display_names: &HashMap<&str, &str>,
) -> Result<()> {
    if !store.lockers_empty().await? {
        return Ok(());
    }

    for (number, occupied, assigned) in LOCKERS {
        let status = if *occupied {
            lockers::status::OCCUPIED
        } else {
            lockers::status::AVAILABLE
        };

        store
            .add_locker(NewLocker {
                number: (*number).to_string(),
                status: status.to_string(),
                assigned_user_id: assigned.and_then(|u| customers.get(u).copied()),
                assigned_user_name: assigned
                    .and_then(|u| display_names.get(u).map(|d| (*d).to_string())),
            })
            .await?;
    }

    info!("Seeded {} demo lockers", LOCKERS.len());
    Ok(())
}

async fn seed_reservations(
    store: &Store,
    customers: &HashMap<String, i32>,
    locker_ids: &HashMap<String, i32>,
) -> Result<()> {
    if !store.reservations_empty().await? {
        return Ok(());
    }

    let now = Utc::now();
    for (username, number, start_offset, end_offset, status) in RESERVATIONS {
        store
            .add_reservation(NewReservation {
                user_id: customers.get(*username).copied(),
                locker_id: locker_ids.get(*number).copied(),
                start_time: now + Duration::hours(*start_offset),
                end_time: now + Duration::hours(*end_offset),
                status: (*status).to_string(),
            })
            .await?;
    }

    info!("Seeded {} demo reservations", RESERVATIONS.len());
    Ok(())
}

async fn seed_payments(store: &Store, customers: &HashMap<String, i32>) -> Result<()> {
    if !store.payments_empty().await? {
        return Ok(());
    }

    for (username, amount, status) in PAYMENTS {
        store
            .add_payment(NewPayment {
                user_id: customers.get(*username).copied(),
                amount: *amount,
                status: (*status).to_string(),
            })
            .await?;
    }

    info!("Seeded {} demo payments", PAYMENTS.len());
    Ok(())
}
