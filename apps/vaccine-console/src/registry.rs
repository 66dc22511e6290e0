//! Vaccine registry: an active set and an append-only archive.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

/// Registry errors. The console prints them and keeps running.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VaccineError {
    /// Lot code does not match `V` followed by digits.
    #[error("Lot must start with 'V' followed by digits (e.g. V001), got '{0}'")]
    InvalidLot(String),

    /// The same (name, manufacturer, lot) is already active.
    #[error("Vaccine already exists among active vaccines: {0}")]
    Duplicate(Vaccine),

    /// Index outside the active listing.
    #[error("Invalid number: {index} (expected 1 to {len})")]
    InvalidSelection {
        /// 1-based index supplied.
        index: usize,
        /// Number of active vaccines.
        len: usize,
    },

    /// Update or archive requested with no active vaccines.
    #[error("No active vaccines")]
    NoActiveVaccines,
}

/// Batch code such as `V001`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LotCode(String);

impl LotCode {
    /// Parse a lot code.
    ///
    /// # Errors
    ///
    /// Returns [`VaccineError::InvalidLot`] unless the input is `V` followed
    /// by one or more ASCII digits.
    #[allow(clippy::expect_used)] // Regex is compile-time constant
    pub fn parse(input: &str) -> Result<Self, VaccineError> {
        static LOT_REGEX: OnceLock<Regex> = OnceLock::new();
        let re = LOT_REGEX.get_or_init(|| Regex::new(r"^V[0-9]+$").expect("lot regex is valid"));

        if re.is_match(input) {
            Ok(Self(input.to_string()))
        } else {
            Err(VaccineError::InvalidLot(input.to_string()))
        }
    }

    /// The code as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LotCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A vaccine record.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Vaccine {
    /// Vaccine name.
    pub name: String,
    /// Manufacturer.
    pub manufacturer: String,
    /// Lot code.
    pub lot: LotCode,
}

impl fmt::Display for Vaccine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} ({})", self.name, self.manufacturer, self.lot)
    }
}

/// Replacement values for [`VaccineRegistry::update`]; `None` keeps the old value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VaccineChanges {
    /// New name.
    pub name: Option<String>,
    /// New manufacturer.
    pub manufacturer: Option<String>,
    /// New lot code, validated on apply.
    pub lot: Option<String>,
}

/// Whether an entry is active or archived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VaccineStatus {
    /// In the active set.
    Active,
    /// In the archive.
    Archived,
}

impl fmt::Display for VaccineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => f.write_str("Active"),
            Self::Archived => f.write_str("Archived"),
        }
    }
}

/// In-memory vaccine registry.
#[derive(Debug, Default)]
pub struct VaccineRegistry {
    active: BTreeSet<Vaccine>,
    archived: Vec<Vaccine>,
}

impl VaccineRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a vaccine to the active set.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        manufacturer: impl Into<String>,
        lot: &str,
    ) -> Result<Vaccine, VaccineError> {
        let vaccine = Vaccine {
            name: name.into(),
            manufacturer: manufacturer.into(),
            lot: LotCode::parse(lot)?,
        };
        if self.active.contains(&vaccine) {
            return Err(VaccineError::Duplicate(vaccine));
        }
        self.active.insert(vaccine.clone());
        tracing::debug!(vaccine = %vaccine, "Vaccine added");
        Ok(vaccine)
    }

    /// Active vaccines in listing order.
    pub fn active(&self) -> impl Iterator<Item = &Vaccine> {
        self.active.iter()
    }

    /// Archived vaccines in archive order.
    pub fn archived(&self) -> &[Vaccine] {
        &self.archived
    }

    /// Every entry, active first, numbered from 1.
    pub fn listing(&self) -> Vec<(usize, VaccineStatus, &Vaccine)> {
        self.active
            .iter()
            .map(|v| (VaccineStatus::Active, v))
            .chain(self.archived.iter().map(|v| (VaccineStatus::Archived, v)))
            .enumerate()
            .map(|(i, (status, v))| (i + 1, status, v))
            .collect()
    }

    /// Number of active vaccines.
    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    /// True when nothing is active or archived.
    pub fn is_empty(&self) -> bool {
        self.active.is_empty() && self.archived.is_empty()
    }

    /// Replace the active vaccine at 1-based `index` with `changes` applied.
    pub fn update(&mut self, index: usize, changes: VaccineChanges) -> Result<Vaccine, VaccineError> {
        let old = self.select(index)?.clone();

        let lot = match changes.lot.as_deref() {
            Some(lot) => LotCode::parse(lot)?,
            None => old.lot.clone(),
        };
        let new = Vaccine {
            name: changes.name.unwrap_or_else(|| old.name.clone()),
            manufacturer: changes.manufacturer.unwrap_or_else(|| old.manufacturer.clone()),
            lot,
        };

        if self.active.contains(&new) {
            return Err(VaccineError::Duplicate(new));
        }
        self.active.remove(&old);
        self.active.insert(new.clone());
        tracing::debug!(old = %old, new = %new, "Vaccine updated");
        Ok(new)
    }

    /// Move the active vaccine at 1-based `index` to the archive.
    pub fn archive(&mut self, index: usize) -> Result<Vaccine, VaccineError> {
        let vaccine = self.select(index)?.clone();
        self.active.remove(&vaccine);
        if !self.archived.contains(&vaccine) {
            self.archived.push(vaccine.clone());
        }
        tracing::debug!(vaccine = %vaccine, "Vaccine archived");
        Ok(vaccine)
    }

    fn select(&self, index: usize) -> Result<&Vaccine, VaccineError> {
        if self.active.is_empty() {
            return Err(VaccineError::NoActiveVaccines);
        }
        index
            .checked_sub(1)
            .and_then(|i| self.active.iter().nth(i))
            .ok_or(VaccineError::InvalidSelection {
                index,
                len: self.active.len(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("V001" ; "zero padded")]
    #[test_case("V7" ; "single digit")]
    #[test_case("V1234567890" ; "long")]
    fn valid_lots(lot: &str) {
        assert_eq!(LotCode::parse(lot).unwrap().as_str(), lot);
    }

    #[test_case("" ; "empty")]
    #[test_case("V" ; "prefix only")]
    #[test_case("v001" ; "lowercase prefix")]
    #[test_case("X001" ; "wrong prefix")]
    #[test_case("V00A" ; "letter in digits")]
    #[test_case("V 01" ; "space")]
    #[test_case("V١٢" ; "non ascii digits")]
    fn invalid_lots(lot: &str) {
        assert_eq!(
            LotCode::parse(lot),
            Err(VaccineError::InvalidLot(lot.to_string()))
        );
    }

    fn registry() -> VaccineRegistry {
        let mut registry = VaccineRegistry::new();
        registry.add("Flu", "Acme", "V002").unwrap();
        registry.add("Covid", "Pharma", "V001").unwrap();
        registry
    }

    #[test]
    fn add_rejects_duplicate_active() {
        let mut registry = registry();
        let err = registry.add("Flu", "Acme", "V002").unwrap_err();
        assert!(matches!(err, VaccineError::Duplicate(_)));
        assert_eq!(registry.active_len(), 2);
    }

    #[test]
    fn add_rejects_invalid_lot() {
        let mut registry = VaccineRegistry::new();
        assert!(matches!(
            registry.add("Flu", "Acme", "001"),
            Err(VaccineError::InvalidLot(_))
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn listing_is_sorted_active_then_archived() {
        let mut registry = registry();
        registry.add("Hepatitis", "Bio", "V010").unwrap();
        registry.archive(3).unwrap();

        let listing: Vec<_> = registry
            .listing()
            .into_iter()
            .map(|(n, status, v)| (n, status, v.name.as_str()))
            .collect();
        assert_eq!(
            listing,
            vec![
                (1, VaccineStatus::Active, "Covid"),
                (2, VaccineStatus::Active, "Flu"),
                (3, VaccineStatus::Archived, "Hepatitis"),
            ]
        );
    }

    #[test]
    fn update_keeps_unsupplied_fields() {
        let mut registry = registry();
        let updated = registry
            .update(
                2,
                VaccineChanges {
                    manufacturer: Some("Globex".to_string()),
                    ..VaccineChanges::default()
                },
            )
            .unwrap();

        assert_eq!(updated.name, "Flu");
        assert_eq!(updated.manufacturer, "Globex");
        assert_eq!(updated.lot.as_str(), "V002");
        assert_eq!(registry.active_len(), 2);
        assert!(registry.active().all(|v| v.manufacturer != "Acme"));
    }

    #[test]
    fn update_validates_lot() {
        let mut registry = registry();
        let err = registry
            .update(
                1,
                VaccineChanges {
                    lot: Some("L9".to_string()),
                    ..VaccineChanges::default()
                },
            )
            .unwrap_err();
        assert_eq!(err, VaccineError::InvalidLot("L9".to_string()));
    }

    #[test]
    fn update_rejects_collision_and_noop() {
        let mut registry = registry();
        let collide = VaccineChanges {
            name: Some("Flu".to_string()),
            manufacturer: Some("Acme".to_string()),
            lot: Some("V002".to_string()),
        };
        assert!(matches!(
            registry.update(1, collide),
            Err(VaccineError::Duplicate(_))
        ));
        assert!(matches!(
            registry.update(1, VaccineChanges::default()),
            Err(VaccineError::Duplicate(_))
        ));
    }

    #[test_case(0 ; "zero")]
    #[test_case(3 ; "past end")]
    fn selection_out_of_range(index: usize) {
        let mut registry = registry();
        assert_eq!(
            registry.archive(index),
            Err(VaccineError::InvalidSelection { index, len: 2 })
        );
    }

    #[test]
    fn archive_requires_active() {
        let mut registry = VaccineRegistry::new();
        assert_eq!(registry.archive(1), Err(VaccineError::NoActiveVaccines));
        assert_eq!(
            registry.update(1, VaccineChanges::default()),
            Err(VaccineError::NoActiveVaccines)
        );
    }

    #[test]
    fn archive_is_append_only_without_duplicates() {
        let mut registry = registry();
        registry.archive(1).unwrap();
        registry.add("Covid", "Pharma", "V001").unwrap();
        registry.archive(1).unwrap();
        registry.archive(1).unwrap();

        let names: Vec<_> = registry.archived().iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["Covid", "Flu"]);
        assert_eq!(registry.active_len(), 0);
    }
}
