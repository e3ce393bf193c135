use axum::Json;
use chrono::{Duration, Utc};

use super::{ApiError, ApiResponse, NotificationDto, format_timestamp};

/// GET /api/notifications
/// Fixed demo event feed; only the timestamps are live, computed relative to
/// the request time. Not derived from entity state.
pub async fn list_notifications() -> Result<Json<ApiResponse<Vec<NotificationDto>>>, ApiError> {
    let now = Utc::now();
    let at = |hours: i64, minutes: i64| {
        format_timestamp(&(now - Duration::minutes(hours * 60 + minutes)))
    };

    let notifications = vec![
        NotificationDto {
            id: 1,
            title: "New Reservation".to_string(),
            message: "Emma Wilson made a reservation for Locker #108".to_string(),
            timestamp: at(0, 0),
            kind: "info".to_string(),
        },
        NotificationDto {
            id: 2,
            title: "Payment Pending".to_string(),
            message: "Ahmet Yılmaz has a pending payment of $50.00".to_string(),
            timestamp: at(0, 30),
            kind: "warning".to_string(),
        },
        NotificationDto {
            id: 3,
            title: "Locker Vacancy".to_string(),
            message: "Locker #104 will be vacated by Zeynep Demir in 12 hours".to_string(),
            timestamp: at(1, 0),
            kind: "warning".to_string(),
        },
        NotificationDto {
            id: 4,
            title: "Payment Received".to_string(),
            message: "Payment of $45.00 received from Can Öztürk".to_string(),
            timestamp: at(2, 0),
            kind: "success".to_string(),
        },
        NotificationDto {
            id: 5,
            title: "Locker Maintenance".to_string(),
            message: "Lockers #102, #105, #107, and #110 are ready for use".to_string(),
            timestamp: at(3, 0),
            kind: "info".to_string(),
        },
        NotificationDto {
            id: 6,
            title: "Long-term Reservation".to_string(),
            message: "Mehmet Kaya rented Locker #106 for 2 days".to_string(),
            timestamp: at(4, 0),
            kind: "info".to_string(),
        },
        NotificationDto {
            id: 7,
            title: "New Customers".to_string(),
            message: "Maria Garcia and Hans Schmidt have registered".to_string(),
            timestamp: at(5, 0),
            kind: "success".to_string(),
        },
    ];

    Ok(Json(ApiResponse::success(notifications)))
}
