use chrono::NaiveDateTime;
use uuid::Uuid;

mod records;

pub use records::Records;

/// Maximum number of places a club can reserve in a single booking
pub const MAX_PLACES_PER_BOOKING: u32 = 12;

/// Message shown once a booking has been committed
pub const BOOKING_COMPLETE: &str = "Great-booking complete!";

/// A club that spends points to reserve places in competitions
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Club {
    /// Unique, case-sensitive name of the club
    pub name: String,
    /// Email used to log in
    pub email: String,
    /// Points the club can still spend
    ///
    /// One point buys one place.
    pub points: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Competition {
    pub name: String,
    /// Local date and time at which the competition starts
    pub date: NaiveDateTime,
    /// Remaining capacity
    pub number_of_places: u32,
}

impl Competition {
    pub fn is_expired(&self, now: NaiveDateTime) -> bool {
        self.date < now
    }
}

/// Reasons a request is turned down
///
/// The `Display` output is the message shown to the user.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("Club not found. Please try again.")]
    ClubNotFound,
    #[error("Competition not found. Please try again.")]
    CompetitionNotFound,
    /// Club or competition of a purchase could not be resolved
    #[error("Something went wrong-please try again")]
    SomethingWentWrong,
    #[error("This competition has already taken place, booking is closed.")]
    CompetitionExpired,
    #[error("You cannot book more than 12 places per competition!")]
    MaxPlacesExceeded,
    #[error("Not enough points! You need {requested} points but have {available}")]
    NotEnoughPoints { requested: u32, available: u32 },
    #[error("Not enough places left! You asked for {requested} but only {available} remain")]
    NotEnoughPlaces { requested: u32, available: u32 },
}

/// Decide whether `club` may book `places` places in `competition` at `now`
///
/// Checks run in a fixed order and the first failing one wins. A request for zero places passes
/// every check.
pub fn validate(
    club: &Club,
    competition: &Competition,
    places: u32,
    now: NaiveDateTime,
) -> Result<(), Rejection> {
    if competition.is_expired(now) {
        return Err(Rejection::CompetitionExpired);
    }
    if places > MAX_PLACES_PER_BOOKING {
        return Err(Rejection::MaxPlacesExceeded);
    }
    if club.points < places {
        return Err(Rejection::NotEnoughPoints {
            requested: places,
            available: club.points,
        });
    }
    // Keeps the number of places from going negative
    if competition.number_of_places < places {
        return Err(Rejection::NotEnoughPlaces {
            requested: places,
            available: competition.number_of_places,
        });
    }

    Ok(())
}

/// Result of a committed booking
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BookingReceipt {
    pub booking_id: Uuid,
    pub club: String,
    pub competition: String,
    pub places: u32,
    /// Points left to the club after the booking
    pub remaining_points: u32,
    /// Places left in the competition after the booking
    pub remaining_places: u32,
}

/// Apply a booking that [`validate`] accepted
///
/// The competition is updated before the club.
pub fn execute(club: &mut Club, competition: &mut Competition, places: u32) -> BookingReceipt {
    competition.number_of_places -= places;
    club.points -= places;

    BookingReceipt {
        booking_id: Uuid::new_v4(),
        club: club.name.clone(),
        competition: competition.name.clone(),
        places,
        remaining_points: club.points,
        remaining_places: competition.number_of_places,
    }
}
