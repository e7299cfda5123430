//! Fictional calendar definitions.
//!
//! A calendar is a chain of time units from smallest to largest (for example
//! Second → Minute → Hour → Day → Month), where each unit declares how many
//! of itself make one of the next unit up, plus a simple leap-year rule.
//!
//! The chain is stored as an owning arena ([`TimeUnitChain`]): element `i+1`
//! is the child of element `i`, so the hierarchy is acyclic and every unit
//! has at most one parent and one child by construction. On the wire the
//! chain keeps its historical nested form, where each unit embeds its child.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One granularity level in a calendar.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TimeUnit {
    /// Name of this unit (e.g. "Month", "Day").
    pub name: String,

    /// How many of this unit make up one parent unit.
    pub number: u32,

    /// Ordered names for instances of this unit (e.g. month names).
    pub names: Vec<String>,

    /// Per-instance length overrides keyed by instance name
    /// (e.g. {"February": 28, "February Leap": 29}).
    pub custom_lengths: BTreeMap<String, u32>,
}

impl TimeUnit {
    /// Creates a new unit with no instance names or overrides.
    pub fn new(name: impl Into<String>, number: u32) -> Self {
        Self {
            name: name.into(),
            number,
            names: Vec::new(),
            custom_lengths: BTreeMap::new(),
        }
    }

    /// Sets the ordered instance names.
    pub fn with_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Adds a length override for a named instance.
    pub fn with_custom_length(mut self, name: impl Into<String>, length: u32) -> Self {
        self.custom_lengths.insert(name.into(), length);
        self
    }

    /// Returns the length for a named instance, falling back to `number`
    /// when no override exists (or no name is given).
    pub fn get_length(&self, name: Option<&str>) -> u32 {
        name.and_then(|n| self.custom_lengths.get(n).copied())
            .unwrap_or(self.number)
    }
}

/// An owning chain of time units ordered smallest to largest.
///
/// Never empty: construction requires a root unit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimeUnitChain {
    units: Vec<TimeUnit>,
}

impl TimeUnitChain {
    /// Creates a chain containing only the root (smallest) unit.
    pub fn new(root: TimeUnit) -> Self {
        Self { units: vec![root] }
    }

    /// Appends `unit` as the child of the current largest unit, establishing
    /// the parent/child link.
    pub fn add_child(&mut self, unit: TimeUnit) {
        self.units.push(unit);
    }

    /// The smallest unit in the chain.
    pub fn root(&self) -> &TimeUnit {
        &self.units[0]
    }

    /// Number of units in the chain.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Always false; kept for iterator-adjacent API symmetry.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns the unit at `index` (0 = smallest), if any.
    pub fn get(&self, index: usize) -> Option<&TimeUnit> {
        self.units.get(index)
    }

    /// Iterates units from smallest to largest.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &TimeUnit> {
        self.units.iter()
    }

    /// Returns the chain index of the unit with the given name.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.units.iter().position(|u| u.name == name)
    }

    /// Returns the unit with the given name.
    pub fn unit_named(&self, name: &str) -> Option<&TimeUnit> {
        self.units.iter().find(|u| u.name == name)
    }

    /// Returns the child (next larger unit) of the named unit.
    pub fn child_of(&self, name: &str) -> Option<&TimeUnit> {
        self.position(name).and_then(|i| self.units.get(i + 1))
    }

    /// Returns the parent (next smaller unit) of the named unit. This is the
    /// non-owning back-reference: it is an index lookup, never a second
    /// owning pointer.
    pub fn parent_of(&self, name: &str) -> Option<&TimeUnit> {
        match self.position(name) {
            Some(i) if i > 0 => self.units.get(i - 1),
            _ => None,
        }
    }

    /// Multiplies `number` down the whole chain. A single-unit chain returns
    /// its own `number`.
    pub fn total_length(&self) -> u64 {
        self.total_length_from(0)
    }

    /// Multiplies `number` from the unit at `index` to the end of the chain.
    pub fn total_length_from(&self, index: usize) -> u64 {
        self.units[index..]
            .iter()
            .map(|u| u64::from(u.number))
            .product()
    }

    fn to_nested(&self) -> NestedUnit {
        let mut child: Option<Box<NestedUnit>> = None;
        for unit in self.units.iter().rev() {
            child = Some(Box::new(NestedUnit {
                name: unit.name.clone(),
                number: unit.number,
                names: unit.names.clone(),
                custom_lengths: unit.custom_lengths.clone(),
                child,
            }));
        }
        // The chain is never empty, so the loop ran at least once.
        *child.expect("chain has a root unit")
    }

    fn from_nested(nested: NestedUnit) -> Self {
        let mut units = Vec::new();
        let mut current = Some(Box::new(nested));
        while let Some(boxed) = current {
            let NestedUnit {
                name,
                number,
                names,
                custom_lengths,
                child,
            } = *boxed;
            units.push(TimeUnit {
                name,
                number,
                names,
                custom_lengths,
            });
            current = child;
        }
        Self { units }
    }
}

/// Wire shape of the unit chain: each unit embeds its child, and only the
/// child direction is serialized. Parent links are positional in the arena,
/// so nothing needs restoring on read.
#[derive(Serialize, Deserialize)]
struct NestedUnit {
    name: String,
    number: u32,
    #[serde(default)]
    names: Vec<String>,
    #[serde(default)]
    custom_lengths: BTreeMap<String, u32>,
    #[serde(default)]
    child: Option<Box<NestedUnit>>,
}

impl Serialize for TimeUnitChain {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_nested().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TimeUnitChain {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self::from_nested(NestedUnit::deserialize(deserializer)?))
    }
}

/// A fictional calendar: a unit chain plus a leap-year rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Calendar {
    /// The unit hierarchy, smallest unit first.
    pub chain: TimeUnitChain,

    /// A leap year occurs every `leap_day_freq` years; 0 disables leap years.
    pub leap_day_freq: u32,

    /// Days added in a leap year.
    pub leap_day_amount: u32,

    /// Index into `chain` of the unit leap days are conceptually added to.
    leap_unit: Option<usize>,
}

/// One row of [`Calendar::unit_hierarchy`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnitSummary {
    pub name: String,
    pub number: u32,
    pub child: Option<String>,
}

impl Calendar {
    /// Creates a calendar with no leap unit designated.
    pub fn new(chain: TimeUnitChain, leap_day_freq: u32, leap_day_amount: u32) -> Self {
        Self {
            chain,
            leap_day_freq,
            leap_day_amount,
            leap_unit: None,
        }
    }

    /// Designates the leap unit by name. An unknown name leaves the leap
    /// unit unset, matching the forgiving wire behavior.
    pub fn with_leap_unit(mut self, name: &str) -> Self {
        self.leap_unit = self.chain.position(name);
        self
    }

    /// The unit leap days are added to, if one is designated.
    pub fn leap_unit(&self) -> Option<&TimeUnit> {
        self.leap_unit.and_then(|i| self.chain.get(i))
    }

    pub(crate) fn leap_unit_index(&self) -> Option<usize> {
        self.leap_unit
    }

    /// Returns the extra days for `year` if it is a leap year.
    ///
    /// A `leap_day_freq` of 0 disables the check entirely rather than
    /// dividing by zero.
    pub fn calculate_leap_year_adjustment(&self, year: i64) -> u32 {
        if self.leap_day_freq != 0 && year % i64::from(self.leap_day_freq) == 0 {
            self.leap_day_amount
        } else {
            0
        }
    }

    /// Structured view of the hierarchy for debugging or display.
    pub fn unit_hierarchy(&self) -> Vec<UnitSummary> {
        (0..self.chain.len())
            .map(|i| {
                let unit = &self.chain.units[i];
                UnitSummary {
                    name: unit.name.clone(),
                    number: unit.number,
                    child: self.chain.get(i + 1).map(|c| c.name.clone()),
                }
            })
            .collect()
    }

    /// The unit that counts months within a year: the unit named "Month" if
    /// present, else the largest unit carrying instance names, else the
    /// largest unit.
    pub(crate) fn month_unit(&self) -> &TimeUnit {
        if let Some(unit) = self.chain.unit_named("Month") {
            return unit;
        }
        self.chain
            .iter()
            .rev()
            .find(|u| !u.names.is_empty())
            .unwrap_or_else(|| self.chain.units.last().expect("chain has a root unit"))
    }

    /// Months per year under this calendar.
    pub fn months_per_year(&self) -> u32 {
        self.month_unit().number
    }

    /// Days in the 1-based `month`, before any leap adjustment.
    ///
    /// Named months resolve through the month unit's length overrides; a
    /// month without a name or override falls back to the span declared by
    /// the unit below the month unit (typically "Day").
    pub fn days_in_month(&self, month: i64) -> u32 {
        let index = self
            .chain
            .position(&self.month_unit().name)
            .expect("month unit is in the chain");
        let unit = &self.chain.units[index];

        if month >= 1 {
            if let Some(name) = unit.names.get((month - 1) as usize) {
                if let Some(length) = unit.custom_lengths.get(name) {
                    return *length;
                }
            }
        }

        match index {
            0 => unit.number,
            _ => self.chain.units[index - 1].number,
        }
    }

    /// Days in all years before `year`, counting from year 0. Negative for
    /// negative years. Leap adjustments are applied per whole year.
    pub(crate) fn days_before_year(&self, year: i64) -> i64 {
        let base: i64 = (1..=i64::from(self.months_per_year()))
            .map(|m| i64::from(self.days_in_month(m)))
            .sum();

        let freq = i64::from(self.leap_day_freq);
        let amount = i64::from(self.leap_day_amount);
        // Leap years among [0, year) for positive years, [year, 0) for
        // negative. Year 0 itself counts as a leap year when freq divides 0.
        let leap_days = if freq == 0 {
            0
        } else if year > 0 {
            ((year - 1) / freq + 1) * amount
        } else {
            -(-year / freq) * amount
        };

        base * year + leap_days
    }

    /// The 60/60/24/30/12 Earth-like reference calendar: Gregorian month
    /// names with per-month lengths, one leap day every four years added to
    /// the "Day" unit.
    pub fn earthlike() -> Self {
        let mut chain = TimeUnitChain::new(TimeUnit::new("Second", 60));
        chain.add_child(TimeUnit::new("Minute", 60));
        chain.add_child(TimeUnit::new("Hour", 24));
        chain.add_child(TimeUnit::new("Day", 30));
        chain.add_child(
            TimeUnit::new("Month", 12)
                .with_names([
                    "January",
                    "February",
                    "March",
                    "April",
                    "May",
                    "June",
                    "July",
                    "August",
                    "September",
                    "October",
                    "November",
                    "December",
                ])
                .with_custom_length("January", 31)
                .with_custom_length("February", 28)
                .with_custom_length("February Leap", 29)
                .with_custom_length("March", 31)
                .with_custom_length("April", 30)
                .with_custom_length("May", 31)
                .with_custom_length("June", 30)
                .with_custom_length("July", 31)
                .with_custom_length("August", 31)
                .with_custom_length("September", 30)
                .with_custom_length("October", 31)
                .with_custom_length("November", 30)
                .with_custom_length("December", 31),
        );

        Calendar::new(chain, 4, 1).with_leap_unit("Day")
    }

    /// The 60/60/24/5/10/10/10 fictional reference calendar: five-day weeks,
    /// ten-week months of 50 days, ten months a year, no leap years.
    pub fn tenmonth() -> Self {
        const MONTHS: [&str; 10] = [
            "Ashen", "Brume", "Cindral", "Duskwane", "Emberfall", "Frosthold", "Galewatch",
            "Harrowmere", "Isenvale", "Jarlheim",
        ];

        let mut chain = TimeUnitChain::new(TimeUnit::new("Second", 60));
        chain.add_child(TimeUnit::new("Minute", 60));
        chain.add_child(TimeUnit::new("Hour", 24));
        chain.add_child(TimeUnit::new("Day", 5));
        chain.add_child(TimeUnit::new("Week", 10));
        let mut months = TimeUnit::new("Month", 10).with_names(MONTHS);
        for month in MONTHS {
            months = months.with_custom_length(month, 50);
        }
        chain.add_child(months);
        chain.add_child(TimeUnit::new("Year", 10));

        Calendar::new(chain, 0, 0)
    }
}

/// Wire shape of a calendar. The leap unit is serialized by name and
/// resolved against the chain on read; an unresolvable name reads as unset.
#[derive(Deserialize)]
struct CalendarWire {
    time_unit_list: TimeUnitChain,
    #[serde(default = "default_leap_freq")]
    leap_day_freq: u32,
    #[serde(default = "default_leap_amount")]
    leap_day_amount: u32,
    #[serde(default)]
    leap_unit: Option<String>,
}

fn default_leap_freq() -> u32 {
    4
}

fn default_leap_amount() -> u32 {
    1
}

#[derive(Serialize)]
struct CalendarWireRef<'a> {
    time_unit_list: &'a TimeUnitChain,
    leap_day_freq: u32,
    leap_day_amount: u32,
    leap_unit: Option<&'a str>,
}

impl Serialize for Calendar {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        CalendarWireRef {
            time_unit_list: &self.chain,
            leap_day_freq: self.leap_day_freq,
            leap_day_amount: self.leap_day_amount,
            leap_unit: self.leap_unit().map(|u| u.name.as_str()),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Calendar {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = CalendarWire::deserialize(deserializer)?;
        let mut calendar = Calendar::new(wire.time_unit_list, wire.leap_day_freq, wire.leap_day_amount);
        if let Some(name) = wire.leap_unit {
            calendar.leap_unit = calendar.chain.position(&name);
        }
        Ok(calendar)
    }
}
