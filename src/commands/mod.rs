use crate::{
    domain::{Records, Rejection},
    ports::{clock::ClockPort, store::StorePort},
};
use std::sync::Arc;
use tokio::sync::Mutex;

pub mod book;
pub mod points_overview;
pub mod purchase_places;
pub mod show_summary;

/// Service object owning the club and competition collections
///
/// There is one per process. Clones share the same collections, and every read or write of them
/// goes through a single lock, so a booking is validated and applied without interleaving with
/// another one.
pub struct DomainLogic<S, C> {
    store: Arc<S>,
    clock: Arc<C>,
    records: Arc<Mutex<Records>>,
}

impl<S, C> Clone for DomainLogic<S, C> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            clock: self.clock.clone(),
            records: self.records.clone(),
        }
    }
}

impl<S, C> DomainLogic<S, C>
where
    S: StorePort,
    C: ClockPort,
{
    /// Load both collections from the store
    pub async fn load(store: Arc<S>, clock: Arc<C>) -> Result<Self, Error> {
        let records = load_records(store.as_ref()).await?;
        tracing::info!(
            clubs = records.clubs.len(),
            competitions = records.competitions.len(),
            "records loaded"
        );

        Ok(Self {
            store,
            clock,
            records: Arc::new(Mutex::new(records)),
        })
    }

    /// Replace the in-memory collections with what the store currently holds
    ///
    /// Nothing changes if either collection fails to load.
    pub async fn reload(&self) -> Result<(), Error> {
        let mut records = self.records.lock().await;
        *records = load_records(self.store.as_ref()).await?;
        tracing::info!(
            clubs = records.clubs.len(),
            competitions = records.competitions.len(),
            "records reloaded"
        );
        Ok(())
    }

    /// Copy of the current collections
    pub async fn snapshot(&self) -> Records {
        self.records.lock().await.clone()
    }
}

async fn load_records<S: StorePort + ?Sized>(store: &S) -> Result<Records, Error> {
    let clubs = store.load_clubs().await?;
    let competitions = store.load_competitions().await?;
    Ok(Records::new(clubs, competitions))
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The request was turned down and nothing changed
    #[error("request rejected: {0}")]
    Rejected(#[from] Rejection),

    #[error("store port error: {0:?}")]
    Store(#[from] crate::ports::store::Error),
}
