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

/// Log a club in with its email
pub struct ShowSummaryRequest {
    pub email: String,
}

#[derive(Debug, PartialEq, Eq)]
pub struct ShowSummaryResponse {
    pub club: Club,
    pub competitions: Vec<Competition>,
}

impl<S, C> Service<ShowSummaryRequest> for DomainLogic<S, C>
where
    S: StorePort + 'static,
    C: ClockPort + 'static,
{
    type Response = ShowSummaryResponse;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: ShowSummaryRequest) -> Self::Future {
        let records = self.records.clone();
        Box::pin(async move {
            let records = records.lock().await;
            let club = records
                .find_club_by_email(&req.email)
                .cloned()
                .ok_or(Rejection::ClubNotFound)?;

            Ok(ShowSummaryResponse {
                club,
                competitions: records.competitions.clone(),
            })
        })
    }
}
