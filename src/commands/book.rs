use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use crate::{
    domain::{Club, Competition, Rejection},
    ports::{clock::ClockPort, store::StorePort},
};
use tower::Service;

use super::{DomainLogic, Error};

/// Open the booking form of a club for a competition
pub struct BookingFormRequest {
    pub club: String,
    pub competition: String,
}

#[derive(Debug, PartialEq, Eq)]
pub struct BookingFormResponse {
    pub club: Club,
    pub competition: Competition,
}

impl<S, C> Service<BookingFormRequest> for DomainLogic<S, C>
where
    S: StorePort + 'static,
    C: ClockPort + 'static,
{
    type Response = BookingFormResponse;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: BookingFormRequest) -> Self::Future {
        let records = self.records.clone();
        let clock = self.clock.clone();
        Box::pin(async move {
            let records = records.lock().await;
            let club = records
                .find_club_by_name(&req.club)
                .ok_or(Rejection::ClubNotFound)?;
            let competition = records
                .find_competition_by_name(&req.competition)
                .ok_or(Rejection::CompetitionNotFound)?;

            if competition.is_expired(clock.now()) {
                return Err(Rejection::CompetitionExpired.into());
            }

            Ok(BookingFormResponse {
                club: club.clone(),
                competition: competition.clone(),
            })
        })
    }
}
