use crate::ports::clock::ClockPort;
use chrono::{Local, NaiveDateTime};

/// Wall clock of the machine, in local time
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl ClockPort for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}
