use super::{error::AppError, views};
use crate::{
    commands::{
        book::BookingFormRequest, points_overview::PointsOverviewRequest,
        purchase_places::PurchasePlacesRequest, show_summary::ShowSummaryRequest, DomainLogic,
        Error,
    },
    domain::{Rejection, BOOKING_COMPLETE},
    ports::{clock::ClockPort, store::StorePort},
};
use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use std::num::IntErrorKind;
use tower::ServiceExt;

/// Query parameter carrying the message of a redirect
const CLUB_NOT_FOUND_CODE: &str = "club-not-found";

#[derive(Debug, Deserialize)]
pub struct IndexQuery {
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    email: String,
}

#[derive(Debug, Deserialize)]
pub struct PurchaseForm {
    club: String,
    competition: String,
    places: Option<String>,
}

pub async fn index<S, C>(
    State(domain): State<DomainLogic<S, C>>,
    Query(query): Query<IndexQuery>,
) -> Result<Html<String>, AppError>
where
    S: StorePort + 'static,
    C: ClockPort + 'static,
{
    let overview = domain.oneshot(PointsOverviewRequest).await?;
    let flashes: Vec<String> = match query.error.as_deref() {
        Some(CLUB_NOT_FOUND_CODE) => vec![Rejection::ClubNotFound.to_string()],
        _ => Vec::new(),
    };

    Ok(Html(views::index(&overview.clubs, &flashes)))
}

pub async fn show_summary<S, C>(
    State(domain): State<DomainLogic<S, C>>,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError>
where
    S: StorePort + 'static,
    C: ClockPort + 'static,
{
    let req = ShowSummaryRequest { email: form.email };
    match domain.oneshot(req).await {
        Ok(summary) => Ok(Html(views::welcome(
            &summary.club.name,
            Some(&summary.club),
            &summary.competitions,
            &[],
        ))
        .into_response()),
        Err(Error::Rejected(Rejection::ClubNotFound)) => {
            Ok(Redirect::to(&format!("/?error={CLUB_NOT_FOUND_CODE}")).into_response())
        }
        Err(err) => Err(err.into()),
    }
}

pub async fn book<S, C>(
    State(domain): State<DomainLogic<S, C>>,
    Path((club, competition)): Path<(String, String)>,
) -> Result<Html<String>, AppError>
where
    S: StorePort + 'static,
    C: ClockPort + 'static,
{
    let req = BookingFormRequest {
        club: club.clone(),
        competition,
    };
    match domain.clone().oneshot(req).await {
        Ok(form) => Ok(Html(views::booking(&form.club, &form.competition))),
        Err(Error::Rejected(rejection)) => Ok(welcome(&domain, &club, rejection.to_string()).await),
        Err(err) => Err(err.into()),
    }
}

pub async fn purchase_places<S, C>(
    State(domain): State<DomainLogic<S, C>>,
    Form(form): Form<PurchaseForm>,
) -> Result<Html<String>, AppError>
where
    S: StorePort + 'static,
    C: ClockPort + 'static,
{
    let places = parse_places(form.places.as_deref())?;

    let req = PurchasePlacesRequest {
        club: form.club.clone(),
        competition: form.competition,
        places,
    };
    let message = match domain.clone().oneshot(req).await {
        Ok(_) => BOOKING_COMPLETE.to_string(),
        Err(Error::Rejected(rejection)) => rejection.to_string(),
        Err(err) => return Err(err.into()),
    };

    Ok(welcome(&domain, &form.club, message).await)
}

/// Number of places submitted with a booking
///
/// Counts too large for a `u32` saturate, so the booking rules still refuse them with their own
/// messages instead of failing the request.
fn parse_places(places: Option<&str>) -> Result<u32, AppError> {
    let Some(places) = places else {
        return Err(AppError::bad_request("Missing number of places"));
    };
    match places.trim().parse::<u32>() {
        Ok(places) => Ok(places),
        Err(err) if *err.kind() == IntErrorKind::PosOverflow => Ok(u32::MAX),
        Err(_) => Err(AppError::bad_request(format!(
            "Invalid number of places: {places:?}"
        ))),
    }
}

pub async fn logout() -> Redirect {
    Redirect::to("/")
}

/// Summary page of `club_name` with a single message, from the current state
async fn welcome<S, C>(domain: &DomainLogic<S, C>, club_name: &str, message: String) -> Html<String>
where
    S: StorePort,
    C: ClockPort,
{
    let records = domain.snapshot().await;
    Html(views::welcome(
        club_name,
        records.find_club_by_name(club_name),
        &records.competitions,
        &[message],
    ))
}
