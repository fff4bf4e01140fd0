//! Closed vocabularies shared by assignments and cohorts: rooms, weekly time slots, teaching
//! blocks, and trimesters. Each value has a stable wire code used by the document store and the
//! HTTP API.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Raised when a wire token does not name a known calendar value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarParseError {
    #[error("unknown room '{0}' (expected a level 50/60/70/80 followed by a room number 1-8)")]
    Room(String),
    #[error("unknown time slot '{0}'")]
    TimeSlot(String),
    #[error("unknown block '{0}'")]
    Block(String),
    #[error("unknown trimester '{0}'")]
    Trimester(String),
}

/// Floor level of a teaching room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RoomLevel {
    Fifty,
    Sixty,
    Seventy,
    Eighty,
}

impl RoomLevel {
    pub const ALL: [RoomLevel; 4] = [
        RoomLevel::Fifty,
        RoomLevel::Sixty,
        RoomLevel::Seventy,
        RoomLevel::Eighty,
    ];

    pub const fn value(self) -> u8 {
        match self {
            RoomLevel::Fifty => 50,
            RoomLevel::Sixty => 60,
            RoomLevel::Seventy => 70,
            RoomLevel::Eighty => 80,
        }
    }

    fn from_value(value: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.value() == value)
    }
}

/// A bookable room, written on the wire as the level followed by the room number (`"501"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Room {
    level: RoomLevel,
    number: u8,
}

impl Room {
    pub const ROOMS_PER_LEVEL: u8 = 8;

    pub fn new(level: RoomLevel, number: u8) -> Option<Self> {
        (1..=Self::ROOMS_PER_LEVEL)
            .contains(&number)
            .then_some(Self { level, number })
    }

    pub const fn level(self) -> RoomLevel {
        self.level
    }

    pub const fn number(self) -> u8 {
        self.number
    }

    /// Every bookable room, level by level.
    pub fn all() -> Vec<Room> {
        RoomLevel::ALL
            .into_iter()
            .flat_map(|level| (1..=Self::ROOMS_PER_LEVEL).map(move |number| Room { level, number }))
            .collect()
    }
}

impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.level.value(), self.number)
    }
}

impl FromStr for Room {
    type Err = CalendarParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let token = value.trim();
        let invalid = || CalendarParseError::Room(token.to_string());

        if token.len() != 3 || !token.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(invalid());
        }

        let level = token[..2]
            .parse::<u8>()
            .ok()
            .and_then(RoomLevel::from_value)
            .ok_or_else(invalid)?;
        let number = token[2..].parse::<u8>().map_err(|_| invalid())?;

        Room::new(level, number).ok_or_else(invalid)
    }
}

impl TryFrom<String> for Room {
    type Error = CalendarParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Room> for String {
    fn from(room: Room) -> Self {
        room.to_string()
    }
}

/// Recurring weekly teaching window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TimeSlot {
    #[serde(rename = "Day-Morning")]
    DayMorning,
    #[serde(rename = "Day-Afternoon")]
    DayAfternoon,
    #[serde(rename = "Eve")]
    Evening,
    #[serde(rename = "Wknd-Morn")]
    WeekendMorning,
    #[serde(rename = "Wknd-Afternoon")]
    WeekendAfternoon,
    #[serde(rename = "Wknd-Evening")]
    WeekendEvening,
}

impl TimeSlot {
    pub const ALL: [TimeSlot; 6] = [
        TimeSlot::DayMorning,
        TimeSlot::DayAfternoon,
        TimeSlot::Evening,
        TimeSlot::WeekendMorning,
        TimeSlot::WeekendAfternoon,
        TimeSlot::WeekendEvening,
    ];

    pub const fn code(self) -> &'static str {
        match self {
            TimeSlot::DayMorning => "Day-Morning",
            TimeSlot::DayAfternoon => "Day-Afternoon",
            TimeSlot::Evening => "Eve",
            TimeSlot::WeekendMorning => "Wknd-Morn",
            TimeSlot::WeekendAfternoon => "Wknd-Afternoon",
            TimeSlot::WeekendEvening => "Wknd-Evening",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            TimeSlot::DayMorning => "Day 08:00–12:00",
            TimeSlot::DayAfternoon => "Day 14:00–16:30",
            TimeSlot::Evening => "Evening 17:30–20:30",
            TimeSlot::WeekendMorning => "Weekend 08:00–12:00",
            TimeSlot::WeekendAfternoon => "Weekend 14:00–16:00",
            TimeSlot::WeekendEvening => "Weekend 18:00–20:00",
        }
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for TimeSlot {
    type Err = CalendarParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let token = value.trim();
        Self::ALL
            .into_iter()
            .find(|slot| slot.code().eq_ignore_ascii_case(token))
            .ok_or_else(|| CalendarParseError::TimeSlot(token.to_string()))
    }
}

/// Coarse scheduling period; lecturer load is bounded per block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Block {
    #[serde(rename = "Block 1")]
    One,
    #[serde(rename = "Block 2")]
    Two,
    #[serde(rename = "Block 3")]
    Three,
    #[serde(rename = "Block 4")]
    Four,
}

impl Block {
    pub const ALL: [Block; 4] = [Block::One, Block::Two, Block::Three, Block::Four];

    pub const fn label(self) -> &'static str {
        match self {
            Block::One => "Block 1",
            Block::Two => "Block 2",
            Block::Three => "Block 3",
            Block::Four => "Block 4",
        }
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Block {
    type Err = CalendarParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let token = value.trim();
        Self::ALL
            .into_iter()
            .find(|block| block.label().eq_ignore_ascii_case(token))
            .ok_or_else(|| CalendarParseError::Block(token.to_string()))
    }
}

/// Academic term a cohort's modules are assigned for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Trimester {
    #[serde(rename = "Trimester 1")]
    One,
    #[serde(rename = "Trimester 2")]
    Two,
    #[serde(rename = "Trimester 3")]
    Three,
}

impl Trimester {
    pub const ALL: [Trimester; 3] = [Trimester::One, Trimester::Two, Trimester::Three];

    pub const fn label(self) -> &'static str {
        match self {
            Trimester::One => "Trimester 1",
            Trimester::Two => "Trimester 2",
            Trimester::Three => "Trimester 3",
        }
    }

    /// Calendar months covered by the trimester.
    pub const fn months(self) -> &'static str {
        match self {
            Trimester::One => "Sep-Jan",
            Trimester::Two => "Feb-May",
            Trimester::Three => "Jun-Aug",
        }
    }
}

impl fmt::Display for Trimester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Trimester {
    type Err = CalendarParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let token = value.trim();
        Self::ALL
            .into_iter()
            .find(|trimester| trimester.label().eq_ignore_ascii_case(token))
            .ok_or_else(|| CalendarParseError::Trimester(token.to_string()))
    }
}
