//! Shared things and their reviews.
//!
//! All routes here sit behind a gate: reads behind basic credentials,
//! review creation behind a bearer token.

use crate::{
    auth::middleware::AuthUser,
    types::{AppError, NewReviewRequest, Result, ReviewResponse, ThingResponse},
    AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

/// List all things
#[utoipa::path(
    get,
    path = "/api/things",
    responses(
        (status = 200, description = "All shared things", body = [ThingResponse]),
        (status = 401, description = "Missing or bad credentials")
    ),
    tag = "things"
)]
pub async fn list_things(State(state): State<AppState>) -> Result<Json<Vec<ThingResponse>>> {
    let things = state.db.list_things().await?;
    Ok(Json(things.into_iter().map(ThingResponse::from).collect()))
}

/// Get a single thing
#[utoipa::path(
    get,
    path = "/api/things/{thing_id}",
    params(("thing_id" = i64, Path, description = "Thing id")),
    responses(
        (status = 200, description = "The thing", body = ThingResponse),
        (status = 401, description = "Missing or bad credentials"),
        (status = 404, description = "No such thing")
    ),
    tag = "things"
)]
pub async fn get_thing(
    State(state): State<AppState>,
    Path(thing_id): Path<i64>,
) -> Result<Json<ThingResponse>> {
    let thing = state
        .db
        .thing_by_id(thing_id)
        .await?
        .ok_or(AppError::ThingNotFound)?;

    Ok(Json(ThingResponse::from(thing)))
}

/// List the reviews for a thing
#[utoipa::path(
    get,
    path = "/api/things/{thing_id}/reviews",
    params(("thing_id" = i64, Path, description = "Thing id")),
    responses(
        (status = 200, description = "Reviews for the thing", body = [ReviewResponse]),
        (status = 401, description = "Missing or bad credentials"),
        (status = 404, description = "No such thing")
    ),
    tag = "things"
)]
pub async fn list_thing_reviews(
    State(state): State<AppState>,
    Path(thing_id): Path<i64>,
) -> Result<Json<Vec<ReviewResponse>>> {
    if state.db.thing_by_id(thing_id).await?.is_none() {
        return Err(AppError::ThingNotFound);
    }

    let reviews = state.db.reviews_for_thing(thing_id).await?;
    Ok(Json(
        reviews.into_iter().map(ReviewResponse::from).collect(),
    ))
}

/// Review a thing as the authenticated user
#[utoipa::path(
    post,
    path = "/api/things/{thing_id}/reviews",
    params(("thing_id" = i64, Path, description = "Thing id")),
    request_body = NewReviewRequest,
    responses(
        (status = 201, description = "Review created", body = ReviewResponse),
        (status = 400, description = "Missing or invalid field"),
        (status = 401, description = "Missing or bad bearer token"),
        (status = 404, description = "No such thing")
    ),
    tag = "things"
)]
pub async fn create_thing_review(
    State(state): State<AppState>,
    Path(thing_id): Path<i64>,
    AuthUser(user): AuthUser,
    Json(payload): Json<NewReviewRequest>,
) -> Result<impl IntoResponse> {
    let rating = payload.rating.ok_or(AppError::MissingField("rating"))?;
    let text = payload.text.ok_or(AppError::MissingField("text"))?;

    if !(1..=5).contains(&rating) {
        return Err(AppError::InvalidInput("Rating must be between 1 and 5"));
    }

    if state.db.thing_by_id(thing_id).await?.is_none() {
        return Err(AppError::ThingNotFound);
    }

    let review = state
        .db
        .insert_review(rating, &text, thing_id, user.id)
        .await?;

    Ok((StatusCode::CREATED, Json(ReviewResponse::from(review))))
}
