use crate::domain::{Club, Competition};

/// Durable storage for the club and competition collections
///
/// Collections are always read and written whole. A save overwrites the stored collection with
/// the one given, keeping its order.
#[mockall::automock]
#[async_trait::async_trait]
pub trait StorePort: Send + Sync {
    async fn load_clubs(&self) -> Result<Vec<Club>, Error>;
    async fn load_competitions(&self) -> Result<Vec<Competition>, Error>;
    async fn save_clubs(&self, clubs: &[Club]) -> Result<(), Error>;
    async fn save_competitions(&self, competitions: &[Competition]) -> Result<(), Error>;
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A stored record cannot be turned into a domain value
    ///
    /// For example a negative number of points, or a date in an unknown format.
    #[error("invalid record in {collection}: {reason}")]
    InvalidRecord { collection: String, reason: String },

    /// Concrete adapter errors
    ///
    /// This could represent any errors from a concrete adapter that is not part of the domain
    /// model, such as I/O or permission errors.
    #[error("adapter error: {0:?}")]
    Adapter(Box<dyn std::error::Error + Send + Sync>),
}
