use crate::core::reduction::{digit_sum, is_master};
use crate::utils::error::{NumerologyError, Result};
use crate::utils::validation::validate_calendar_date;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

/// Values exempt from further digit reduction.
pub const MASTER_NUMBERS: [u32; 3] = [11, 22, 33];

/// Compound values read as carrying karmic debt.
pub const KARMIC_NUMBERS: [u32; 4] = [13, 14, 16, 19];

/// A calendar-valid birth date. Construction is the only validation point,
/// everything downstream assumes the date exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct BirthDate {
    day: u32,
    month: u32,
    year: i32,
}

impl BirthDate {
    pub fn new(day: u32, month: u32, year: i32) -> Result<Self> {
        validate_calendar_date(day, month, year)?;
        Ok(Self { day, month, year })
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn as_naive_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }

    /// Zero-padded `DDMMYYYY` digits, the sequence destiny and digit
    /// analysis are computed from.
    pub fn digits(&self) -> Vec<u32> {
        format!("{:02}{:02}{:04}", self.day, self.month, self.year)
            .chars()
            .filter_map(|c| c.to_digit(10))
            .collect()
    }
}

impl FromStr for BirthDate {
    type Err = NumerologyError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|e| {
            NumerologyError::invalid_input("dob", trimmed, format!("Expected YYYY-MM-DD: {}", e))
        })?;
        Self::new(date.day(), date.month(), date.year())
    }
}

impl fmt::Display for BirthDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl FromStr for Gender {
    type Err = NumerologyError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" | "m" => Ok(Self::Male),
            "female" | "f" => Ok(Self::Female),
            _ => Err(NumerologyError::invalid_input(
                "gender",
                s,
                "Expected 'male' or 'female'",
            )),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Male => f.write_str("male"),
            Self::Female => f.write_str("female"),
        }
    }
}

/// Every value visited while reducing a number, first to last.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawChain")]
pub struct ReductionChain {
    chain: Vec<u32>,
}

#[derive(Deserialize)]
struct RawChain {
    chain: Vec<u32>,
}

impl TryFrom<RawChain> for ReductionChain {
    type Error = NumerologyError;

    fn try_from(raw: RawChain) -> Result<Self> {
        Self::try_from_steps(raw.chain)
    }
}

impl ReductionChain {
    /// Accepts a chain only if it is what `reduce` would produce for its
    /// first value.
    pub fn try_from_steps(chain: Vec<u32>) -> Result<Self> {
        let invalid = |reason: &str| {
            NumerologyError::invalid_input("chain", format!("{:?}", chain), reason)
        };

        let (&last, body) = chain.split_last().ok_or_else(|| invalid("Chain is empty"))?;
        if last > 9 && !is_master(last) {
            return Err(invalid("Chain does not end at a digit or master number"));
        }
        if body.iter().any(|&n| n <= 9 || is_master(n)) {
            return Err(invalid("Chain continues past a terminal value"));
        }
        if chain.windows(2).any(|pair| pair[1] != digit_sum(pair[0])) {
            return Err(invalid("Step is not the digit sum of the one before"));
        }

        Ok(Self { chain })
    }

    pub(crate) fn from_steps(chain: Vec<u32>) -> Self {
        debug_assert!(!chain.is_empty());
        Self { chain }
    }

    pub fn steps(&self) -> &[u32] {
        &self.chain
    }

    pub fn compound(&self) -> u32 {
        self.chain[0]
    }

    pub fn reduced(&self) -> u32 {
        self.chain[self.chain.len() - 1]
    }

    pub fn kind(&self) -> NumberKind {
        NumberKind::of(self.compound())
    }
}

impl fmt::Display for ReductionChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.chain.iter().map(u32::to_string).collect();
        f.write_str(&parts.join(" → "))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberKind {
    Regular,
    Karmic,
    Master,
}

impl NumberKind {
    pub fn of(n: u32) -> Self {
        if MASTER_NUMBERS.contains(&n) {
            Self::Master
        } else if KARMIC_NUMBERS.contains(&n) {
            Self::Karmic
        } else {
            Self::Regular
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Element {
    Wood,
    Fire,
    Earth,
    Metal,
    Water,
}

impl Element {
    pub fn for_number(n: u32) -> Option<Self> {
        match n {
            1 | 2 => Some(Self::Wood),
            3 | 4 => Some(Self::Fire),
            5 | 6 => Some(Self::Earth),
            7 | 8 => Some(Self::Metal),
            9 => Some(Self::Water),
            _ => None,
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Wood => "Wood",
            Self::Fire => "Fire",
            Self::Earth => "Earth",
            Self::Metal => "Metal",
            Self::Water => "Water",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigitStats {
    /// Occurrences of each digit 1..=9 that appears at least once.
    pub counts: BTreeMap<u32, usize>,
    pub missing: BTreeSet<u32>,
    /// Digits seen more than once, with their counts.
    pub repeating: BTreeMap<u32, usize>,
}

impl DigitStats {
    pub fn count(&self, digit: u32) -> usize {
        self.counts.get(&digit).copied().unwrap_or(0)
    }

    pub fn present(&self) -> impl Iterator<Item = u32> + '_ {
        self.counts.keys().copied()
    }
}

/// Digit counts laid out on the Lo Shu magic square.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoShuGrid {
    pub cells: [[(u32, usize); 3]; 3],
}

impl LoShuGrid {
    pub const LAYOUT: [[u32; 3]; 3] = [[4, 9, 2], [3, 5, 7], [8, 1, 6]];

    pub fn from_stats(stats: &DigitStats) -> Self {
        let cells = Self::LAYOUT.map(|row| row.map(|digit| (digit, stats.count(digit))));
        Self { cells }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NumerologyProfile {
    pub birth_date: BirthDate,
    pub gender: Option<Gender>,
    pub digits: Vec<u32>,
    pub driver: ReductionChain,
    pub destiny: ReductionChain,
    pub kua: Option<u32>,
    pub digit_stats: DigitStats,
}

impl NumerologyProfile {
    pub fn lo_shu(&self) -> LoShuGrid {
        LoShuGrid::from_stats(&self.digit_stats)
    }

    pub fn digit_string(&self) -> String {
        self.digits.iter().map(u32::to_string).collect()
    }
}

/// How the destiny number's compound is formed from a birth date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DestinyPolicy {
    /// Sum of every digit of `DDMMYYYY`.
    #[default]
    DigitSum,
    /// `day + month + year` as integers.
    IntegerSum,
}

impl FromStr for DestinyPolicy {
    type Err = NumerologyError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "digit_sum" => Ok(Self::DigitSum),
            "integer_sum" => Ok(Self::IntegerSum),
            _ => Err(NumerologyError::invalid_input(
                "destiny_policy",
                s,
                "Expected 'digit_sum' or 'integer_sum'",
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineOptions {
    pub destiny_policy: DestinyPolicy,
    /// Use the previous year for KUA when the date falls before the lunar new year cutoff.
    pub lunar_adjustment: bool,
    /// Count the KUA number as present when computing missing digits.
    pub kua_fills_missing: bool,
}

/// Raw form-style input. Any field may be absent until validated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileRequest {
    pub day: Option<u32>,
    pub month: Option<u32>,
    pub year: Option<i32>,
    pub gender: Option<Gender>,
}
