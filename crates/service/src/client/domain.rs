use std::cmp::Ordering;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::pagination::{Direction, ParseSortError, Sort};

/// Persisted client record as the repository sees it.
///
/// `id` is `None` until the store has assigned one.
#[derive(Debug, Clone, PartialEq)]
pub struct Client {
    pub id: Option<i64>,
    pub name: String,
    pub cpf: String,
    pub income: f64,
    pub birth_date: DateTime<Utc>,
    pub children: i32,
}

impl Client {
    /// Case-insensitive substring match on `name`. The empty string matches every client.
    pub fn name_contains_ignore_case(&self, needle_lower: &str) -> bool {
        self.name.to_lowercase().contains(needle_lower)
    }

    /// True when `birth_date` falls on the same month and day as `reference` (UTC), in any year.
    pub fn born_on_same_calendar_day(&self, reference: DateTime<Utc>) -> bool {
        self.birth_date.month() == reference.month() && self.birth_date.day() == reference.day()
    }

    /// Ordering by `sort`, ties broken by ascending id. Names compare case-folded, by code point.
    pub fn compare(&self, other: &Self, sort: &Sort<ClientSortField>) -> Ordering {
        let by_field = match sort.field {
            ClientSortField::Id => self.id.cmp(&other.id),
            ClientSortField::Name => self.name.to_lowercase().cmp(&other.name.to_lowercase()),
            ClientSortField::Cpf => self.cpf.cmp(&other.cpf),
            ClientSortField::Income => self.income.total_cmp(&other.income),
            ClientSortField::BirthDate => self.birth_date.cmp(&other.birth_date),
            ClientSortField::Children => self.children.cmp(&other.children),
        };
        let by_field = match sort.direction {
            Direction::Asc => by_field,
            Direction::Desc => by_field.reverse(),
        };
        by_field.then_with(|| self.id.cmp(&other.id))
    }
}

/// Client attributes a page can be ordered by.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ClientSortField {
    Id,
    #[default]
    Name,
    Cpf,
    Income,
    BirthDate,
    Children,
}

impl FromStr for ClientSortField {
    type Err = ParseSortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "id" => Ok(Self::Id),
            "name" => Ok(Self::Name),
            "cpf" => Ok(Self::Cpf),
            "income" => Ok(Self::Income),
            "birthdate" | "birth_date" => Ok(Self::BirthDate),
            "children" => Ok(Self::Children),
            _ => Err(ParseSortError { kind: "sort field", value: s.to_string() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn client(id: i64, name: &str, income: f64, birth: DateTime<Utc>) -> Client {
        Client { id: Some(id), name: name.into(), cpf: "1".into(), income, birth_date: birth, children: 0 }
    }

    #[test]
    fn same_calendar_day_ignores_year() {
        let c = client(1, "A", 0.0, Utc.with_ymd_and_hms(1996, 12, 23, 7, 0, 0).unwrap());
        assert!(c.born_on_same_calendar_day(Utc.with_ymd_and_hms(2021, 12, 23, 0, 0, 0).unwrap()));
        assert!(!c.born_on_same_calendar_day(Utc.with_ymd_and_hms(1996, 12, 24, 7, 0, 0).unwrap()));
        assert!(!c.born_on_same_calendar_day(Utc.with_ymd_and_hms(1996, 11, 23, 7, 0, 0).unwrap()));
    }

    #[test]
    fn empty_needle_matches_everything() {
        let c = client(1, "Carolina", 0.0, Utc::now());
        assert!(c.name_contains_ignore_case(""));
        assert!(c.name_contains_ignore_case("car"));
        assert!(!c.name_contains_ignore_case("zé"));
    }

    #[test]
    fn compare_breaks_ties_by_id() {
        let birth = Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap();
        let a = client(2, "Same", 10.0, birth);
        let b = client(1, "Same", 20.0, birth);
        let by_name_desc = Sort::new(ClientSortField::Name, Direction::Desc);
        assert_eq!(a.compare(&b, &by_name_desc), Ordering::Greater);
        let by_income_desc = Sort::new(ClientSortField::Income, Direction::Desc);
        assert_eq!(a.compare(&b, &by_income_desc), Ordering::Greater);
    }

    #[test]
    fn name_order_ignores_case() {
        let birth = Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap();
        let lower = client(1, "bell hooks", 0.0, birth);
        let upper = client(2, "Carolina", 0.0, birth);
        let by_name = Sort::new(ClientSortField::Name, Direction::Asc);
        assert_eq!(lower.compare(&upper, &by_name), Ordering::Less);
        assert_eq!(upper.compare(&lower, &by_name), Ordering::Greater);
    }

    #[test]
    fn sort_field_parses_wire_names() {
        assert_eq!("birthDate".parse::<ClientSortField>().unwrap(), ClientSortField::BirthDate);
        assert_eq!("NAME".parse::<ClientSortField>().unwrap(), ClientSortField::Name);
        assert!("salary".parse::<ClientSortField>().is_err());
    }
}
