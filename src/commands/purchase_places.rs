use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use crate::{
    domain::{self, BookingReceipt, Records, Rejection},
    ports::{clock::ClockPort, store::StorePort},
};
use tower::Service;

use super::{DomainLogic, Error};

/// Spend `places` points of a club on as many places in a competition
pub struct PurchasePlacesRequest {
    pub club: String,
    pub competition: String,
    pub places: u32,
}

impl<S, C> Service<PurchasePlacesRequest> for DomainLogic<S, C>
where
    S: StorePort + 'static,
    C: ClockPort + 'static,
{
    type Response = BookingReceipt;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: PurchasePlacesRequest) -> Self::Future {
        let records = self.records.clone();
        let store = self.store.clone();
        let clock = self.clock.clone();
        Box::pin(async move {
            // Held until both collections are saved, so that no other booking can be validated
            // against a state this one is about to change.
            let mut records = records.lock().await;
            let records: &mut Records = &mut records;

            let receipt = match records.booking_pair_mut(&req.club, &req.competition) {
                (Some(club), Some(competition)) => {
                    if let Err(rejection) =
                        domain::validate(club, competition, req.places, clock.now())
                    {
                        tracing::info!(
                            club = %req.club,
                            competition = %req.competition,
                            places = req.places,
                            %rejection,
                            "booking rejected"
                        );
                        return Err(rejection.into());
                    }
                    domain::execute(club, competition, req.places)
                }
                _ => {
                    tracing::info!(
                        club = %req.club,
                        competition = %req.competition,
                        "booking for unknown club or competition"
                    );
                    return Err(Rejection::SomethingWentWrong.into());
                }
            };

            // The in-memory change is kept even if a save fails
            store.save_competitions(&records.competitions).await?;
            store.save_clubs(&records.clubs).await?;

            tracing::info!(
                booking_id = %receipt.booking_id,
                club = %receipt.club,
                competition = %receipt.competition,
                places = receipt.places,
                remaining_points = receipt.remaining_points,
                remaining_places = receipt.remaining_places,
                "booking committed"
            );
            Ok(receipt)
        })
    }
}
