use serde::Serialize;

use crate::entities::{lockers, payments, reservations, users};

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// All DTO timestamps use this fixed wire format.
pub fn format_timestamp(dt: &chrono::DateTime<chrono::Utc>) -> String {
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

#[derive(Debug, Serialize)]
pub struct UserDto {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub role: String,
    pub created_at: String,
    pub active: bool,
}

impl From<users::Model> for UserDto {
    fn from(user: users::Model) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
            created_at: format_timestamp(&user.created_at),
            active: user.active,
        }
    }
}

/// Flattened locker projection: only the fields the dashboard grid shows.
#[derive(Debug, Serialize)]
pub struct LockerDto {
    pub id: i32,
    pub number: String,
    pub status: String,
    pub assigned_user_name: Option<String>,
}

impl From<lockers::Model> for LockerDto {
    fn from(locker: lockers::Model) -> Self {
        Self {
            id: locker.id,
            number: locker.number,
            status: locker.status,
            assigned_user_name: locker.assigned_user_name,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReservationDto {
    pub id: i32,
    pub user_id: Option<i32>,
    pub locker_id: Option<i32>,
    pub start_time: String,
    pub end_time: String,
    pub status: String,
}

impl From<reservations::Model> for ReservationDto {
    fn from(r: reservations::Model) -> Self {
        Self {
            id: r.id,
            user_id: r.user_id,
            locker_id: r.locker_id,
            start_time: format_timestamp(&r.start_time),
            end_time: format_timestamp(&r.end_time),
            status: r.status,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PaymentDto {
    pub id: i32,
    pub user_id: Option<i32>,
    pub amount: f64,
    pub status: String,
    pub payment_date: String,
}

impl From<payments::Model> for PaymentDto {
    fn from(p: payments::Model) -> Self {
        Self {
            id: p.id,
            user_id: p.user_id,
            amount: p.amount,
            status: p.status,
            payment_date: format_timestamp(&p.created_at),
        }
    }
}

/// Dashboard counters, recomputed by full-table scans on every request.
#[derive(Debug, Serialize)]
pub struct StatsDto {
    pub users: u64,
    pub active_lockers: u64,
    pub total_lockers: u64,
    pub pending_payments: u64,
}

#[derive(Debug, Serialize)]
pub struct NotificationDto {
    pub id: i32,
    pub title: String,
    pub message: String,
    pub timestamp: String,
    #[serde(rename = "type")]
    pub kind: String,
}
