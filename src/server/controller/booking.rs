use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        booking::{
            BookingDetailDto, BookingDto, BookingOverviewDto, CheckConflictDto, ConflictCheckDto,
            CreateBookingDto,
        },
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::booking::{BookingDetail, BookingWindow, CreateBookingParam},
        service::booking::BookingService,
        state::AppState,
    },
};

/// Tag for grouping booking endpoints in OpenAPI documentation
pub static BOOKING_TAG: &str = "booking";

/// Get the caller's bookings grouped into pending, upcoming and past.
///
/// Approved bookings that have ended are marked completed first.
#[utoipa::path(
    get,
    path = "/api/bookings",
    tag = BOOKING_TAG,
    responses(
        (status = 200, description = "Caller's bookings", body = BookingOverviewDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_bookings(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let overview = BookingService::new(&state.db, &state.booking_locks)
        .list_for_user(user.id)
        .await?;

    Ok((StatusCode::OK, Json(overview.into_dto())))
}

/// Get bookings made on the caller's resources, grouped like the caller's own list.
///
/// # Access Control
/// - `Staff` - Staff and admins own resources
#[utoipa::path(
    get,
    path = "/api/bookings/manage",
    tag = BOOKING_TAG,
    responses(
        (status = 200, description = "Bookings on the caller's resources", body = BookingOverviewDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Staff role required", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn manage_bookings(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Staff])
        .await?;

    let overview = BookingService::new(&state.db, &state.booking_locks)
        .list_for_owner(user.id)
        .await?;

    Ok((StatusCode::OK, Json(overview.into_dto())))
}

/// Book a resource.
///
/// The booking is approved immediately unless the resource requires approval, in which
/// case it stays pending until the owner or an admin decides.
///
/// # Returns
/// - `201 Created` - The booking
/// - `400 Bad Request` - Malformed date or time, end not after start, or start in the past
/// - `404 Not Found` - Resource does not exist
/// - `409 Conflict` - Slot taken, overlapping one of the caller's bookings, or resource not published
#[utoipa::path(
    post,
    path = "/api/resources/{resource_id}/bookings",
    tag = BOOKING_TAG,
    params(
        ("resource_id" = i32, Path, description = "Resource ID")
    ),
    request_body = CreateBookingDto,
    responses(
        (status = 201, description = "Booking created", body = BookingDto),
        (status = 400, description = "Invalid booking window", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Resource not found", body = ErrorDto),
        (status = 409, description = "Booking conflict", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_booking(
    State(state): State<AppState>,
    session: Session,
    Path(resource_id): Path<i32>,
    Json(payload): Json<CreateBookingDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let param = CreateBookingParam::from_dto(resource_id, user.id, payload)?;
    let booking = BookingService::new(&state.db, &state.booking_locks)
        .create(&user, param)
        .await?;

    Ok((StatusCode::CREATED, Json(booking.into_dto())))
}

/// Approve a pending booking.
///
/// Conflicts are checked again before approving.
///
/// # Access Control
/// - `ManageBooking` - Owner of the booked resource or admin
#[utoipa::path(
    post,
    path = "/api/bookings/{booking_id}/approve",
    tag = BOOKING_TAG,
    params(
        ("booking_id" = i32, Path, description = "Booking ID")
    ),
    responses(
        (status = 200, description = "Booking approved", body = BookingDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not the resource owner", body = ErrorDto),
        (status = 404, description = "Booking not found", body = ErrorDto),
        (status = 409, description = "Not pending, or now conflicting", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn approve_booking(
    State(state): State<AppState>,
    session: Session,
    Path(booking_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::ManageBooking(booking_id)])
        .await?;

    let booking = BookingService::new(&state.db, &state.booking_locks)
        .approve(booking_id, &user)
        .await?;

    Ok((StatusCode::OK, Json(booking.into_dto())))
}

/// Reject a pending booking.
///
/// # Access Control
/// - `ManageBooking` - Owner of the booked resource or admin
#[utoipa::path(
    post,
    path = "/api/bookings/{booking_id}/reject",
    tag = BOOKING_TAG,
    params(
        ("booking_id" = i32, Path, description = "Booking ID")
    ),
    responses(
        (status = 200, description = "Booking rejected", body = BookingDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not the resource owner", body = ErrorDto),
        (status = 404, description = "Booking not found", body = ErrorDto),
        (status = 409, description = "Booking is not pending", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn reject_booking(
    State(state): State<AppState>,
    session: Session,
    Path(booking_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::ManageBooking(booking_id)])
        .await?;

    let booking = BookingService::new(&state.db, &state.booking_locks)
        .reject(booking_id, &user)
        .await?;

    Ok((StatusCode::OK, Json(booking.into_dto())))
}

/// Cancel a pending or approved booking.
///
/// # Access Control
/// - `CancelBooking` - Booking holder or admin
#[utoipa::path(
    post,
    path = "/api/bookings/{booking_id}/cancel",
    tag = BOOKING_TAG,
    params(
        ("booking_id" = i32, Path, description = "Booking ID")
    ),
    responses(
        (status = 200, description = "Booking cancelled", body = BookingDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not the booking holder", body = ErrorDto),
        (status = 404, description = "Booking not found", body = ErrorDto),
        (status = 409, description = "Booking already finished", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn cancel_booking(
    State(state): State<AppState>,
    session: Session,
    Path(booking_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::CancelBooking(booking_id)])
        .await?;

    let booking = BookingService::new(&state.db, &state.booking_locks)
        .cancel(booking_id, &user)
        .await?;

    Ok((StatusCode::OK, Json(booking.into_dto())))
}

/// Check a proposed slot for conflicts before submitting a booking.
///
/// Reports overlapping live bookings of the resource and of the caller. Nothing is
/// reserved; creating the booking checks again.
#[utoipa::path(
    post,
    path = "/api/bookings/check-conflict",
    tag = BOOKING_TAG,
    request_body = CheckConflictDto,
    responses(
        (status = 200, description = "Conflict report", body = ConflictCheckDto),
        (status = 400, description = "Invalid booking window", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Resource not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn check_conflict(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CheckConflictDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let window = BookingWindow::from_parts(&payload.date, &payload.start_time, &payload.end_time)?;
    let report = BookingService::new(&state.db, &state.booking_locks)
        .check_conflict(user.id, payload.resource_id, window)
        .await?;

    Ok((StatusCode::OK, Json(report.into_dto())))
}

/// Get pending bookings across all resources, oldest request first.
///
/// # Access Control
/// - `Admin` - Only admins
#[utoipa::path(
    get,
    path = "/api/admin/approvals",
    tag = BOOKING_TAG,
    responses(
        (status = 200, description = "Pending bookings", body = Vec<BookingDetailDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Admin role required", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn pending_approvals(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let pending = BookingService::new(&state.db, &state.booking_locks)
        .list_pending()
        .await?;
    let dto: Vec<BookingDetailDto> = pending.into_iter().map(BookingDetail::into_dto).collect();

    Ok((StatusCode::OK, Json(dto)))
}
