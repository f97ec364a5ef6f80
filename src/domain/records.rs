use super::{Club, Competition};

/// The club and competition collections, in insertion order
///
/// Lookups are exact and case-sensitive, and return the first match.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Records {
    pub clubs: Vec<Club>,
    pub competitions: Vec<Competition>,
}

impl Records {
    pub fn new(clubs: Vec<Club>, competitions: Vec<Competition>) -> Self {
        Self {
            clubs,
            competitions,
        }
    }

    pub fn find_club_by_email(&self, email: &str) -> Option<&Club> {
        self.clubs.iter().find(|club| club.email == email)
    }

    pub fn find_club_by_name(&self, name: &str) -> Option<&Club> {
        self.clubs.iter().find(|club| club.name == name)
    }

    pub fn find_competition_by_name(&self, name: &str) -> Option<&Competition> {
        self.competitions
            .iter()
            .find(|competition| competition.name == name)
    }

    /// Mutable access to a club and a competition at the same time
    pub fn booking_pair_mut(
        &mut self,
        club: &str,
        competition: &str,
    ) -> (Option<&mut Club>, Option<&mut Competition>) {
        (
            self.clubs.iter_mut().find(|c| c.name == club),
            self.competitions.iter_mut().find(|c| c.name == competition),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fixtures::*;
    use rstest::*;
    use speculoos::prelude::*;

    #[fixture]
    fn records() -> Records {
        Records::new(
            vec![club("Simply Lift", 13), club("Iron Temple", 4)],
            vec![
                competition("Spring Festival", at(2020, 3, 27), 25),
                competition("Fall Classic", at(2020, 10, 22), 13),
            ],
        )
    }

    #[rstest]
    fn test_find_club_by_email(records: Records) {
        assert_that!(records.find_club_by_email("irontemple@club.test"))
            .is_some()
            .matches(|club| club.name == "Iron Temple");
        // No normalization
        assert_that!(records.find_club_by_email("IronTemple@club.test")).is_none();
        assert_that!(records.find_club_by_email(" irontemple@club.test")).is_none();
        assert_that!(records.find_club_by_email("")).is_none();
    }

    #[rstest]
    fn test_find_by_name_is_case_sensitive(records: Records) {
        assert_that!(records.find_club_by_name("Simply Lift")).is_some();
        assert_that!(records.find_club_by_name("simply lift")).is_none();
        assert_that!(records.find_competition_by_name("Fall Classic"))
            .is_some()
            .matches(|competition| competition.number_of_places == 13);
        assert_that!(records.find_competition_by_name("Fall classic")).is_none();
    }

    #[test]
    fn test_first_match_wins() {
        let records = Records::new(
            vec![club("Duplicate", 1), club("Duplicate", 2)],
            Vec::new(),
        );

        assert_that!(records.find_club_by_name("Duplicate"))
            .is_some()
            .matches(|club| club.points == 1);
    }

    #[rstest]
    fn test_booking_pair_mut(mut records: Records) {
        let (club, competition) = records.booking_pair_mut("Iron Temple", "Unknown");
        assert_that!(club).is_some();
        assert_that!(competition).is_none();

        if let (Some(club), Some(competition)) =
            records.booking_pair_mut("Iron Temple", "Fall Classic")
        {
            club.points = 0;
            competition.number_of_places = 0;
        }
        assert_that!(records.clubs[1].points).is_equal_to(0);
        assert_that!(records.competitions[1].number_of_places).is_equal_to(0);
    }
}
