//! Course catalog index.
//!
//! Groups raw occurrences by course name and answers "which slots does
//! this course run at" for the rest of the crate. Groups keep catalog
//! insertion order, and occurrences keep their order within a group,
//! so every downstream iteration is reproducible.
//!
//! Building the index is the validation boundary for catalog data:
//! records with missing ids, unknown day codes, or unparseable times
//! are rejected here and never reach the solver.

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::error::CatalogError;
use crate::models::{CourseOccurrence, OccurrenceRecord, TimeOfDay, Weekday};

/// All occurrences of one named course across the week.
///
/// A read-only view produced by [`CourseCatalogIndex`].
#[derive(Debug, Clone)]
pub struct CourseGroup {
    name: String,
    occurrences: Vec<CourseOccurrence>,
}

impl CourseGroup {
    /// Course display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Occurrences in catalog order.
    pub fn occurrences(&self) -> &[CourseOccurrence] {
        &self.occurrences
    }

    /// Number of occurrences.
    pub fn len(&self) -> usize {
        self.occurrences.len()
    }

    /// Whether the group has no occurrences.
    pub fn is_empty(&self) -> bool {
        self.occurrences.is_empty()
    }

    /// Whether every occurrence of this course requires a partner.
    pub fn pair_only(&self) -> bool {
        !self.occurrences.is_empty() && self.occurrences.iter().all(|o| o.pair_only)
    }

    /// Distinct locations, first-seen order.
    pub fn locations(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for occ in &self.occurrences {
            if !occ.location.is_empty() && !seen.contains(&occ.location.as_str()) {
                seen.push(occ.location.as_str());
            }
        }
        seen
    }

    /// Days on which this course runs.
    pub fn distinct_days(&self) -> BTreeSet<Weekday> {
        self.occurrences.iter().map(|o| o.day).collect()
    }
}

/// Insertion-ordered index of course groups.
///
/// Lookup by name is backed by a side map; iteration always follows
/// catalog order so the search sees candidates deterministically.
#[derive(Debug, Clone)]
pub struct CourseCatalogIndex {
    groups: Vec<CourseGroup>,
    by_name: HashMap<String, usize>,
}

impl CourseCatalogIndex {
    /// Builds the index from already-typed occurrences.
    ///
    /// Rejects empty ids, empty course names, duplicate ids, and
    /// explicit end times at or before the start.
    pub fn new(occurrences: Vec<CourseOccurrence>) -> Result<Self, CatalogError> {
        let mut groups: Vec<CourseGroup> = Vec::new();
        let mut by_name: HashMap<String, usize> = HashMap::new();
        let mut seen_ids: HashSet<String> = HashSet::new();

        for occ in occurrences {
            if occ.id.is_empty() {
                return Err(CatalogError::MissingId);
            }
            if occ.course.is_empty() {
                return Err(CatalogError::MissingCourseName { id: occ.id });
            }
            if !seen_ids.insert(occ.id.clone()) {
                return Err(CatalogError::DuplicateId { id: occ.id });
            }
            if let Some(end) = occ.end {
                if end <= occ.start {
                    return Err(CatalogError::EndBeforeStart { id: occ.id });
                }
            }

            match by_name.get(&occ.course) {
                Some(&idx) => groups[idx].occurrences.push(occ),
                None => {
                    by_name.insert(occ.course.clone(), groups.len());
                    groups.push(CourseGroup {
                        name: occ.course.clone(),
                        occurrences: vec![occ],
                    });
                }
            }
        }

        Ok(Self { groups, by_name })
    }

    /// Builds the index from raw records, parsing day codes and times.
    pub fn from_records(records: Vec<OccurrenceRecord>) -> Result<Self, CatalogError> {
        let mut occurrences = Vec::with_capacity(records.len());
        for record in records {
            occurrences.push(parse_record(record)?);
        }
        Self::new(occurrences)
    }

    /// All groups, catalog order.
    pub fn groups(&self) -> &[CourseGroup] {
        &self.groups
    }

    /// Looks up a group by course name.
    pub fn group(&self, name: &str) -> Option<&CourseGroup> {
        self.by_name.get(name).map(|&idx| &self.groups[idx])
    }

    /// Course names, catalog order.
    pub fn course_names(&self) -> Vec<&str> {
        self.groups.iter().map(|g| g.name()).collect()
    }

    /// Total occurrence count across all groups.
    pub fn occurrence_count(&self) -> usize {
        self.groups.iter().map(|g| g.len()).sum()
    }

    /// Whether the catalog holds no occurrences.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

fn parse_record(record: OccurrenceRecord) -> Result<CourseOccurrence, CatalogError> {
    if record.id.is_empty() {
        return Err(CatalogError::MissingId);
    }

    let day = Weekday::from_code(&record.day).ok_or_else(|| CatalogError::UnknownDayCode {
        id: record.id.clone(),
        code: record.day.clone(),
    })?;

    let start: TimeOfDay = record.start.parse().map_err(|_| CatalogError::InvalidTime {
        id: record.id.clone(),
        value: record.start.clone(),
    })?;

    let end = match &record.end {
        Some(raw) => Some(raw.parse().map_err(|_| CatalogError::InvalidTime {
            id: record.id.clone(),
            value: raw.clone(),
        })?),
        None => None,
    };

    let mut occ = CourseOccurrence::new(record.id, record.course, day, start)
        .with_location(record.location)
        .with_pair_only(record.pair_only)
        .with_registered(record.registered);
    if let Some(end) = end {
        occ = occ.with_end(end);
    }
    Ok(occ)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_records() -> Vec<OccurrenceRecord> {
        vec![
            OccurrenceRecord::new("s1", "Salsa A", "MO", "19:00").with_end("20:10"),
            OccurrenceRecord::new("s2", "Salsa A", "WE", "19:00").with_end("20:10"),
            OccurrenceRecord::new("b1", "Bachata B", "MO", "19:30").with_end("20:40"),
        ]
    }

    #[test]
    fn test_groups_preserve_catalog_order() {
        let index = CourseCatalogIndex::from_records(sample_records()).unwrap();
        assert_eq!(index.course_names(), vec!["Salsa A", "Bachata B"]);
        assert_eq!(index.occurrence_count(), 3);

        let salsa = index.group("Salsa A").unwrap();
        assert_eq!(salsa.len(), 2);
        assert_eq!(salsa.occurrences()[0].id, "s1");
        assert_eq!(salsa.occurrences()[1].id, "s2");
    }

    #[test]
    fn test_lookup_unknown_course() {
        let index = CourseCatalogIndex::from_records(sample_records()).unwrap();
        assert!(index.group("Zouk").is_none());
    }

    #[test]
    fn test_distinct_days() {
        let index = CourseCatalogIndex::from_records(sample_records()).unwrap();
        let days = index.group("Salsa A").unwrap().distinct_days();
        assert_eq!(days.len(), 2);
        assert!(days.contains(&Weekday::Monday));
        assert!(days.contains(&Weekday::Wednesday));
    }

    #[test]
    fn test_pair_only_requires_all_occurrences() {
        let records = vec![
            OccurrenceRecord::new("p1", "Pairs", "MO", "19:00").with_pair_only(true),
            OccurrenceRecord::new("p2", "Pairs", "TU", "19:00").with_pair_only(true),
            OccurrenceRecord::new("m1", "Mixed", "MO", "18:00").with_pair_only(true),
            OccurrenceRecord::new("m2", "Mixed", "TU", "18:00"),
        ];
        let index = CourseCatalogIndex::from_records(records).unwrap();
        assert!(index.group("Pairs").unwrap().pair_only());
        assert!(!index.group("Mixed").unwrap().pair_only());
    }

    #[test]
    fn test_rejects_missing_id() {
        let records = vec![OccurrenceRecord::new("", "Salsa A", "MO", "19:00")];
        assert!(matches!(
            CourseCatalogIndex::from_records(records),
            Err(CatalogError::MissingId)
        ));
    }

    #[test]
    fn test_rejects_duplicate_id() {
        let records = vec![
            OccurrenceRecord::new("x", "Salsa A", "MO", "19:00"),
            OccurrenceRecord::new("x", "Salsa A", "WE", "19:00"),
        ];
        assert!(matches!(
            CourseCatalogIndex::from_records(records),
            Err(CatalogError::DuplicateId { .. })
        ));
    }

    #[test]
    fn test_rejects_unknown_day_code() {
        let records = vec![OccurrenceRecord::new("x", "Salsa A", "XX", "19:00")];
        assert!(matches!(
            CourseCatalogIndex::from_records(records),
            Err(CatalogError::UnknownDayCode { .. })
        ));
    }

    #[test]
    fn test_rejects_unparseable_time() {
        let records = vec![OccurrenceRecord::new("x", "Salsa A", "MO", "25:00")];
        assert!(matches!(
            CourseCatalogIndex::from_records(records),
            Err(CatalogError::InvalidTime { .. })
        ));
    }

    #[test]
    fn test_rejects_end_before_start() {
        let records =
            vec![OccurrenceRecord::new("x", "Salsa A", "MO", "19:00").with_end("18:00")];
        assert!(matches!(
            CourseCatalogIndex::from_records(records),
            Err(CatalogError::EndBeforeStart { .. })
        ));
    }

    #[test]
    fn test_locations_first_seen_order() {
        let records = vec![
            OccurrenceRecord::new("a", "Salsa A", "MO", "19:00").with_location("Studio 2"),
            OccurrenceRecord::new("b", "Salsa A", "WE", "19:00").with_location("Studio 1"),
            OccurrenceRecord::new("c", "Salsa A", "FR", "19:00").with_location("Studio 2"),
        ];
        let index = CourseCatalogIndex::from_records(records).unwrap();
        assert_eq!(
            index.group("Salsa A").unwrap().locations(),
            vec!["Studio 2", "Studio 1"]
        );
    }
}
