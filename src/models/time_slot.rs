// Franjas horarias: día de la semana + intervalo semiabierto [inicio, fin) + sala.
use std::fmt;
use std::str::FromStr;

use chrono::NaiveTime;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CatalogError;

/// Día de la semana. El token canónico es el chino (`周一`..`周日`), que es
/// el que usa el catálogo de referencia.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub fn token(self) -> &'static str {
        match self {
            Weekday::Monday => "周一",
            Weekday::Tuesday => "周二",
            Weekday::Wednesday => "周三",
            Weekday::Thursday => "周四",
            Weekday::Friday => "周五",
            Weekday::Saturday => "周六",
            Weekday::Sunday => "周日",
        }
    }

    /// Acepta `周一`, `星期一`, `Mon`/`Monday` y los códigos de dos letras
    /// (`LU`, `MA`, ...) que usan las ofertas académicas.
    pub fn from_token(raw: &str) -> Option<Weekday> {
        let tok = raw.trim();
        let day = match tok {
            "周一" | "星期一" => Weekday::Monday,
            "周二" | "星期二" => Weekday::Tuesday,
            "周三" | "星期三" => Weekday::Wednesday,
            "周四" | "星期四" => Weekday::Thursday,
            "周五" | "星期五" => Weekday::Friday,
            "周六" | "星期六" => Weekday::Saturday,
            "周日" | "周天" | "星期日" | "星期天" => Weekday::Sunday,
            other => match other.to_uppercase().as_str() {
                "MON" | "MONDAY" | "LU" | "LUN" => Weekday::Monday,
                "TUE" | "TUESDAY" | "MA" | "MAR" => Weekday::Tuesday,
                "WED" | "WEDNESDAY" | "MI" | "MIE" => Weekday::Wednesday,
                "THU" | "THURSDAY" | "JU" | "JUE" => Weekday::Thursday,
                "FRI" | "FRIDAY" | "VI" | "VIE" => Weekday::Friday,
                "SAT" | "SATURDAY" | "SA" | "SAB" => Weekday::Saturday,
                "SUN" | "SUNDAY" | "DO" | "DOM" => Weekday::Sunday,
                _ => return None,
            },
        };
        Some(day)
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Weekday {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Weekday::from_token(s).ok_or_else(|| CatalogError::InvalidWeekday { token: s.to_string() })
    }
}

impl Serialize for Weekday {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.token())
    }
}

impl<'de> Deserialize<'de> for Weekday {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Parsea "HH:MM" (también "H:MM" y "HH.MM") a hora del día.
pub fn parse_time(raw: &str) -> Option<NaiveTime> {
    let tok = raw.trim().replace('.', ":");
    NaiveTime::parse_from_str(&tok, "%H:%M").ok()
}

pub(crate) fn serialize_hhmm<S: Serializer>(t: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&t.format("%H:%M").to_string())
}

/// Franja inmutable. Invariante: `start < end`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeSlot {
    weekday: Weekday,
    #[serde(serialize_with = "serialize_hhmm")]
    start: NaiveTime,
    #[serde(serialize_with = "serialize_hhmm")]
    end: NaiveTime,
    location: String,
}

impl TimeSlot {
    pub fn new(
        weekday: Weekday,
        start: NaiveTime,
        end: NaiveTime,
        location: impl Into<String>,
    ) -> Result<Self, CatalogError> {
        if start >= end {
            return Err(CatalogError::EmptyTimeSlot {
                start: start.format("%H:%M").to_string(),
                end: end.format("%H:%M").to_string(),
            });
        }
        Ok(Self { weekday, start, end, location: location.into() })
    }

    /// Construye la franja desde tokens de texto, p.ej. `("周一", "09:00", "10:00", "外语楼201")`.
    pub fn parse(weekday: &str, start: &str, end: &str, location: impl Into<String>) -> Result<Self, CatalogError> {
        let weekday: Weekday = weekday.parse()?;
        let start_t = parse_time(start).ok_or_else(|| CatalogError::InvalidTime { value: start.to_string() })?;
        let end_t = parse_time(end).ok_or_else(|| CatalogError::InvalidTime { value: end.to_string() })?;
        Self::new(weekday, start_t, end_t, location)
    }

    pub fn weekday(&self) -> Weekday {
        self.weekday
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    /// Mismo día y solapamiento estricto: dos clases que sólo se tocan
    /// (una termina cuando empieza la otra) no chocan.
    pub fn conflicts(&self, other: &TimeSlot) -> bool {
        self.weekday == other.weekday && self.start < other.end && other.start < self.end
    }

    pub fn contains(&self, time: NaiveTime) -> bool {
        self.start <= time && time < self.end
    }

    pub fn time_range(&self) -> String {
        format!("{}-{}", self.start.format("%H:%M"), self.end.format("%H:%M"))
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} @ {}", self.weekday, self.time_range(), self.location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(day: &str, start: &str, end: &str) -> TimeSlot {
        TimeSlot::parse(day, start, end, "A101").unwrap()
    }

    #[test]
    fn test_touching_slots_do_not_conflict() {
        let a = slot("周一", "09:00", "10:00");
        let b = slot("周一", "10:00", "11:00");
        assert!(!a.conflicts(&b));
        assert!(!b.conflicts(&a));
    }

    #[test]
    fn test_overlapping_slots_conflict() {
        let a = slot("周一", "09:00", "10:00");
        let b = slot("周一", "09:30", "10:30");
        assert!(a.conflicts(&b));
        assert!(b.conflicts(&a));
        // contenida por completo
        let c = slot("周一", "08:00", "12:00");
        assert!(a.conflicts(&c));
    }

    #[test]
    fn test_different_days_never_conflict() {
        let a = slot("周一", "09:00", "10:00");
        let b = slot("周二", "09:00", "10:00");
        assert!(!a.conflicts(&b));
    }

    #[test]
    fn test_empty_interval_rejected() {
        let err = TimeSlot::parse("周一", "10:00", "10:00", "A101").unwrap_err();
        assert!(matches!(err, CatalogError::EmptyTimeSlot { .. }));
        let err = TimeSlot::parse("周一", "11:00", "10:00", "A101").unwrap_err();
        assert!(matches!(err, CatalogError::EmptyTimeSlot { .. }));
    }

    #[test]
    fn test_weekday_tokens() {
        assert_eq!(Weekday::from_token("周三"), Some(Weekday::Wednesday));
        assert_eq!(Weekday::from_token("星期五"), Some(Weekday::Friday));
        assert_eq!(Weekday::from_token("mon"), Some(Weekday::Monday));
        assert_eq!(Weekday::from_token("JU"), Some(Weekday::Thursday));
        assert_eq!(Weekday::from_token("someday"), None);
        for day in Weekday::ALL {
            assert_eq!(Weekday::from_token(day.token()), Some(day));
        }
        assert!(matches!("xx".parse::<Weekday>(), Err(CatalogError::InvalidWeekday { .. })));
    }

    #[test]
    fn test_parse_time_variants() {
        assert_eq!(parse_time("08:30"), NaiveTime::from_hms_opt(8, 30, 0));
        assert_eq!(parse_time("8:30"), NaiveTime::from_hms_opt(8, 30, 0));
        assert_eq!(parse_time("14.00"), NaiveTime::from_hms_opt(14, 0, 0));
        assert_eq!(parse_time("25:00"), None);
        assert_eq!(parse_time("noon"), None);
    }

    #[test]
    fn test_contains_and_range() {
        let a = slot("周四", "14:00", "15:00");
        assert!(a.contains(NaiveTime::from_hms_opt(14, 0, 0).unwrap()));
        assert!(!a.contains(NaiveTime::from_hms_opt(15, 0, 0).unwrap()));
        assert_eq!(a.time_range(), "14:00-15:00");
    }

    #[test]
    fn test_serializes_as_hhmm() {
        let a = slot("周五", "08:00", "09:00");
        let v = serde_json::to_value(&a).unwrap();
        assert_eq!(v["weekday"], "周五");
        assert_eq!(v["start"], "08:00");
        assert_eq!(v["end"], "09:00");
        assert_eq!(v["location"], "A101");
    }
}
