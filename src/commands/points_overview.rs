use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use crate::{
    domain::Club,
    ports::{clock::ClockPort, store::StorePort},
};
use tower::Service;

use super::{DomainLogic, Error};

/// Public list of clubs and their points, no login needed
pub struct PointsOverviewRequest;

#[derive(Debug, PartialEq, Eq)]
pub struct PointsOverviewResponse {
    pub clubs: Vec<Club>,
}

impl<S, C> Service<PointsOverviewRequest> for DomainLogic<S, C>
where
    S: StorePort + 'static,
    C: ClockPort + 'static,
{
    type Response = PointsOverviewResponse;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, _req: PointsOverviewRequest) -> Self::Future {
        let records = self.records.clone();
        Box::pin(async move {
            let clubs = records.lock().await.clubs.clone();
            Ok(PointsOverviewResponse { clubs })
        })
    }
}
