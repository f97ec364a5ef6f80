use chrono::NaiveDateTime;

/// Source of the current local time, used to tell past competitions apart
#[mockall::automock]
pub trait ClockPort: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}
