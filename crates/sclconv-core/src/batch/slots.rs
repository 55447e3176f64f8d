//! Numbered output slots (`001.SCA` ... `999.SCA`).

use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;

/// Output file names: three ASCII digits and a case-insensitive `.SCA`.
const SLOT_FILENAME_PATTERN: &str = r"^([0-9]{3})\.(?i:sca)$";

static SLOT_FILENAME_REGEX: OnceLock<Regex> = OnceLock::new();

fn slot_filename_regex() -> &'static Regex {
    SLOT_FILENAME_REGEX
        .get_or_init(|| Regex::new(SLOT_FILENAME_PATTERN).expect("invalid regex pattern"))
}

/// Slot number of an existing output file name, if it is one.
pub fn parse_slot_filename(name: &str) -> Option<u16> {
    slot_filename_regex()
        .captures(name)
        .and_then(|caps| caps[1].parse().ok())
}

/// File name for a slot, zero-padded to three digits.
pub fn slot_filename(slot: u16) -> String {
    format!("{:03}.SCA", slot)
}

/// Tracks occupied slots and hands out the lowest free one.
///
/// The occupied set only grows: a slot found on disk or committed during a
/// batch is never handed out again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotAllocator {
    occupied: BTreeSet<u16>,
    first: u16,
    last: u16,
}

impl SlotAllocator {
    /// Allocator over `first..=last` with nothing occupied.
    pub fn new(first: u16, last: u16) -> Self {
        Self {
            occupied: BTreeSet::new(),
            first,
            last,
        }
    }

    /// Allocator with the slots of any matching file names marked occupied.
    pub fn from_filenames<I, S>(first: u16, last: u16, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut allocator = Self::new(first, last);
        allocator
            .occupied
            .extend(names.into_iter().filter_map(|n| parse_slot_filename(n.as_ref())));
        allocator
    }

    /// Lowest slot in range that is not occupied.
    pub fn next_free(&self) -> Option<u16> {
        (self.first..=self.last).find(|slot| !self.occupied.contains(slot))
    }

    /// Mark a slot as used.
    pub fn commit(&mut self, slot: u16) {
        self.occupied.insert(slot);
    }

    /// Occupied slots in ascending order.
    pub fn occupied(&self) -> impl Iterator<Item = u16> + '_ {
        self.occupied.iter().copied()
    }
}
