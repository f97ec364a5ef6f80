use crate::{
    domain::{Club, Competition},
    ports::store::{Error, StorePort},
};
use std::sync::{Arc, Mutex, PoisonError};

/// Store that keeps both collections in memory
///
/// Clones share the same collections, so a test can keep a handle and inspect what was saved.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    clubs: Arc<Mutex<Vec<Club>>>,
    competitions: Arc<Mutex<Vec<Competition>>>,
    /// Number of saves performed, across both collections
    saves: Arc<Mutex<usize>>,
}

impl MemoryStore {
    pub fn new(clubs: Vec<Club>, competitions: Vec<Competition>) -> Self {
        Self {
            clubs: Arc::new(Mutex::new(clubs)),
            competitions: Arc::new(Mutex::new(competitions)),
            saves: Arc::default(),
        }
    }

    pub fn saves(&self) -> Result<usize, Error> {
        Ok(*self.saves.lock()?)
    }
}

#[async_trait::async_trait]
impl StorePort for MemoryStore {
    async fn load_clubs(&self) -> Result<Vec<Club>, Error> {
        Ok(self.clubs.lock()?.clone())
    }

    async fn load_competitions(&self) -> Result<Vec<Competition>, Error> {
        Ok(self.competitions.lock()?.clone())
    }

    async fn save_clubs(&self, clubs: &[Club]) -> Result<(), Error> {
        *self.clubs.lock()? = clubs.to_vec();
        *self.saves.lock()? += 1;
        Ok(())
    }

    async fn save_competitions(&self, competitions: &[Competition]) -> Result<(), Error> {
        *self.competitions.lock()? = competitions.to_vec();
        *self.saves.lock()? += 1;
        Ok(())
    }
}

/// Erased [`PoisonError`]
///
/// `PoisonError` keeps the `MutexGuard` internally, which is not send. Thus we erase the error
/// and only keep the string representation instead.
#[derive(Debug, thiserror::Error)]
#[error("poison error: {0}")]
pub struct ErasedPoisonError(String);

impl<T> From<PoisonError<T>> for Error {
    fn from(err: PoisonError<T>) -> Self {
        Self::Adapter(Box::new(ErasedPoisonError(err.to_string())))
    }
}
