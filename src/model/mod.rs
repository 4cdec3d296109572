//! Canonical domain model for the shipment routing problem.
//!
//! One set of types shared by the planner and both optimizers: airports with
//! continent and UTC metadata, daily-repeating flight templates, and customer
//! orders. Everything here is immutable after load; mutable search state
//! (capacity reservations) lives in [`crate::planner::CapacityLedger`].

use std::fmt;

pub const MINUTES_PER_DAY: u32 = 1440;

/// Four-letter ICAO airport code.
///
/// Stored as raw ASCII bytes so it is `Copy` and cheap to use as a map key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AirportCode([u8; 4]);

impl AirportCode {
    /// Creates a code from a 4-character ASCII string.
    ///
    /// # Panics
    /// Panics if `code` is not exactly 4 ASCII bytes.
    pub fn new(code: &str) -> Self {
        let bytes = code.as_bytes();
        assert!(
            bytes.len() == 4 && bytes.iter().all(u8::is_ascii),
            "airport code must be 4 ASCII characters, got {code:?}"
        );
        let mut buf = [0u8; 4];
        buf.copy_from_slice(bytes);
        AirportCode(buf)
    }

    pub fn as_str(&self) -> &str {
        // Constructor guarantees ASCII.
        std::str::from_utf8(&self.0).unwrap_or("????")
    }
}

impl fmt::Display for AirportCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Continental region an airport belongs to.
///
/// The planning dataset covers three regions. The continent drives the
/// delivery deadline (2 days same-continent, 3 days intercontinental) and
/// the intercontinental cost factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Continent {
    SouthAmerica,
    Europe,
    Asia,
}

impl Continent {
    /// Derives the continent from the ICAO code prefix.
    ///
    /// ICAO regional prefixes in the dataset: `S` South America, `E`/`L`
    /// Europe, `O`/`U`/`V` Asia and the Middle East. Computed once at load
    /// time and stored on [`Airport`], never per query.
    pub fn from_code(code: AirportCode) -> Option<Continent> {
        match code.as_str().as_bytes()[0] {
            b'S' => Some(Continent::SouthAmerica),
            b'E' | b'L' => Some(Continent::Europe),
            b'O' | b'U' | b'V' => Some(Continent::Asia),
            _ => None,
        }
    }
}

/// An airport with routing metadata. Immutable after load.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Airport {
    pub code: AirportCode,
    pub city: String,
    pub country: String,
    pub continent: Continent,
    /// Offset from UTC in minutes (e.g. Lima is -300, Delhi is +330).
    pub utc_offset_minutes: i32,
    /// Warehouse capacity in packages.
    pub storage_capacity: u32,
}

impl Airport {
    /// Builds an airport deriving the continent from the code prefix.
    ///
    /// Returns `None` when the code prefix does not map to a known region.
    pub fn new(
        code: &str,
        city: &str,
        country: &str,
        utc_offset_minutes: i32,
        storage_capacity: u32,
    ) -> Option<Airport> {
        let code = AirportCode::new(code);
        Some(Airport {
            code,
            city: city.to_string(),
            country: country.to_string(),
            continent: Continent::from_code(code)?,
            utc_offset_minutes,
            storage_capacity,
        })
    }

    /// Converts a local minute-of-day at this airport to a UTC minute-of-day.
    pub fn local_to_utc(&self, local_minute: u32) -> u32 {
        (local_minute as i32 - self.utc_offset_minutes).rem_euclid(MINUTES_PER_DAY as i32) as u32
    }
}

/// Identifier of a flight template: index into the flight list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlightId(pub usize);

/// A scheduled flight that repeats identically every calendar day.
///
/// Times are local minutes-of-day at the respective airport; the planner
/// converts them to a common UTC timeline. `capacity` bounds the packages a
/// single daily instance can carry — the ledger enforces it per day.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlightTemplate {
    pub origin: AirportCode,
    pub destination: AirportCode,
    /// Local departure time, minutes from midnight.
    pub departure_local: u32,
    /// Local arrival time, minutes from midnight. May be earlier than the
    /// departure when the flight lands the next day.
    pub arrival_local: u32,
    /// Package capacity per daily instance.
    pub capacity: u32,
}

impl FlightTemplate {
    pub fn new(
        origin: &str,
        destination: &str,
        departure_local: u32,
        arrival_local: u32,
        capacity: u32,
    ) -> FlightTemplate {
        FlightTemplate {
            origin: AirportCode::new(origin),
            destination: AirportCode::new(destination),
            departure_local: departure_local % MINUTES_PER_DAY,
            arrival_local: arrival_local % MINUTES_PER_DAY,
            capacity,
        }
    }
}

/// Priority class of an order. High-priority shipments pay a rush factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Priority {
    High,
    Normal,
    Low,
}

impl Priority {
    /// Numeric class as used in the input data (1 = high .. 3 = low).
    pub fn from_class(class: u8) -> Option<Priority> {
        match class {
            1 => Some(Priority::High),
            2 => Some(Priority::Normal),
            3 => Some(Priority::Low),
            _ => None,
        }
    }

    /// Cost multiplier applied to the base shipping cost.
    pub fn cost_factor(self) -> f64 {
        match self {
            Priority::High => 1.5,
            Priority::Normal => 1.0,
            Priority::Low => 0.8,
        }
    }
}

/// A customer shipment request.
///
/// The delivery deadline is not stored here: it depends on which hub the
/// optimizer assigns, so it is derived via [`Order::deadline_from`] and
/// becomes invalid whenever the hub changes.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Order {
    pub id: u32,
    pub destination: AirportCode,
    pub quantity: u32,
    /// Creation instant in absolute UTC minutes from the planning-horizon
    /// origin (day * 1440 + minute-of-day).
    pub created_minutes: u32,
    pub priority: Priority,
}

impl Order {
    /// Absolute UTC deadline for this order when shipped from a hub on the
    /// given continent: creation + 2 days same-continent, + 3 days otherwise.
    pub fn deadline_from(&self, hub_continent: Continent, destination_continent: Continent) -> u32 {
        let days = if hub_continent == destination_continent {
            2
        } else {
            3
        };
        self.created_minutes + days * MINUTES_PER_DAY
    }
}
