use crate::domain::model::{parse_activities, DestinationRecord};
use crate::utils::error::{PlannerError, Result};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StorePolicy {
    /// When set, `add` refuses a city that is already present (case-insensitive).
    pub reject_duplicate_city: bool,
}

/// Ordered, in-memory collection of destinations. Insertion order is kept.
#[derive(Debug, Clone, Default)]
pub struct DestinationStore {
    records: Vec<DestinationRecord>,
    policy: StorePolicy,
}

impl DestinationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: StorePolicy) -> Self {
        Self {
            records: Vec::new(),
            policy,
        }
    }

    pub fn records(&self) -> &[DestinationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Replaces the whole collection, e.g. after loading from disk.
    pub fn replace_all(&mut self, records: Vec<DestinationRecord>) {
        tracing::debug!("Replacing {} records with {}", self.records.len(), records.len());
        self.records = records;
    }

    pub fn add(
        &mut self,
        city: &str,
        country: &str,
        start_date: &str,
        end_date: &str,
        budget: &str,
        activities_text: &str,
    ) -> Result<&DestinationRecord> {
        if self.policy.reject_duplicate_city && self.records.iter().any(|r| r.matches_city(city)) {
            return Err(PlannerError::DuplicateCity {
                city: city.to_string(),
            });
        }

        self.records.push(DestinationRecord::new(
            city,
            country,
            start_date,
            end_date,
            budget,
            activities_text,
        ));
        tracing::debug!("Added destination '{}' ({} total)", city, self.records.len());

        let index = self.records.len() - 1;
        Ok(&self.records[index])
    }

    /// Rewrites every field except `city` on the first case-insensitive match.
    /// Later records with the same city are left alone.
    pub fn update_first(
        &mut self,
        city: &str,
        country: &str,
        start_date: &str,
        end_date: &str,
        budget: &str,
        activities_text: &str,
    ) -> Result<&DestinationRecord> {
        let record = self
            .records
            .iter_mut()
            .find(|r| r.matches_city(city))
            .ok_or_else(|| PlannerError::DestinationNotFound {
                city: city.to_string(),
            })?;

        record.country = country.to_string();
        record.start_date = start_date.to_string();
        record.end_date = end_date.to_string();
        record.budget = budget.to_string();
        record.activities = parse_activities(activities_text);
        tracing::debug!("Updated destination '{}'", record.city);

        Ok(&*record)
    }

    /// Drops every record whose city matches case-insensitively and returns
    /// how many were removed.
    pub fn remove_all(&mut self, city: &str) -> Result<usize> {
        let before = self.records.len();
        self.records.retain(|r| !r.matches_city(city));
        let removed = before - self.records.len();

        if removed == 0 {
            return Err(PlannerError::DestinationNotFound {
                city: city.to_string(),
            });
        }

        tracing::debug!("Removed {} record(s) for '{}'", removed, city);
        Ok(removed)
    }

    /// Case-insensitive substring match on city, country or any activity.
    /// An empty query matches every record.
    pub fn search(&self, query: &str) -> Vec<&DestinationRecord> {
        let query = query.to_lowercase();
        self.records
            .iter()
            .filter(|r| r.matches_query(&query))
            .collect()
    }

    /// Renders all records in store order, or `None` when the store is empty.
    pub fn view(&self) -> Option<String> {
        if self.records.is_empty() {
            return None;
        }

        let lines: Vec<String> = self
            .records
            .iter()
            .map(|record| format!("- {}", record))
            .collect();
        Some(lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with_paris_twice() -> DestinationStore {
        let mut store = DestinationStore::new();
        store
            .add("Paris", "France", "2025-01-01", "2025-01-05", "900", "louvre")
            .unwrap();
        store
            .add("Lima", "Peru", "2025-02-01", "2025-02-10", "1200", "hiking")
            .unwrap();
        store
            .add("paris", "Texas", "2025-03-01", "2025-03-02", "100", "rodeo")
            .unwrap();
        store
    }

    #[test]
    fn test_replace_all_discards_existing_records() {
        let mut store = store_with_paris_twice();
        let loaded = vec![DestinationRecord::new(
            "Cairo", "Egypt", "2025-10-01", "2025-10-05", "700", "pyramids",
        )];

        store.replace_all(loaded.clone());

        assert_eq!(store.records(), loaded.as_slice());
        assert!(store.search("paris").is_empty());

        store.replace_all(Vec::new());
        assert!(store.is_empty());
    }

    #[test]
    fn test_add_splits_and_trims_activities() {
        let mut store = DestinationStore::new();
        let record = store
            .add("Oslo", "Norway", "2025-06-01", "2025-06-04", "2000", "hiking, museums ,food")
            .unwrap();

        assert_eq!(record.activities, vec!["hiking", "museums", "food"]);
        assert_eq!(store.len(), 1);
        assert!(store.view().unwrap().contains("Activities: hiking, museums, food"));
    }

    #[test]
    fn test_add_accepts_duplicates_and_empty_city_by_default() {
        let mut store = DestinationStore::new();
        store.add("Rome", "Italy", "", "", "", "").unwrap();
        store.add("ROME", "Italy", "", "", "", "").unwrap();
        store.add("", "", "", "", "", "").unwrap();

        assert_eq!(store.len(), 3);
        assert!(store.records()[2].activities.is_empty());
    }

    #[test]
    fn test_add_rejects_duplicate_when_policy_enabled() {
        let mut store = DestinationStore::with_policy(StorePolicy {
            reject_duplicate_city: true,
        });
        store.add("Rome", "Italy", "", "", "", "").unwrap();

        let err = store.add("rome", "Italy", "", "", "", "").unwrap_err();
        assert!(matches!(err, PlannerError::DuplicateCity { .. }));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_update_only_touches_first_match() {
        let mut store = store_with_paris_twice();

        store
            .update_first("PARIS", "France", "2025-04-01", "2025-04-09", "1500", "wine, art")
            .unwrap();

        let records = store.records();
        assert_eq!(records[0].city, "Paris");
        assert_eq!(records[0].start_date, "2025-04-01");
        assert_eq!(records[0].activities, vec!["wine", "art"]);
        assert_eq!(records[2].country, "Texas");
        assert_eq!(records[2].activities, vec!["rodeo"]);
    }

    #[test]
    fn test_update_missing_city_leaves_store_unchanged() {
        let mut store = store_with_paris_twice();
        let before = store.records().to_vec();

        let err = store
            .update_first("Tokyo", "Japan", "", "", "", "")
            .unwrap_err();

        assert!(matches!(err, PlannerError::DestinationNotFound { .. }));
        assert_eq!(store.records(), before.as_slice());
    }

    #[test]
    fn test_remove_drops_every_match() {
        let mut store = store_with_paris_twice();

        let removed = store.remove_all("Paris").unwrap();

        assert_eq!(removed, 2);
        assert_eq!(store.len(), 1);
        assert_eq!(store.records()[0].city, "Lima");
    }

    #[test]
    fn test_remove_missing_city_signals_not_found() {
        let mut store = store_with_paris_twice();
        assert!(matches!(
            store.remove_all("Berlin"),
            Err(PlannerError::DestinationNotFound { .. })
        ));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_search_matches_activities() {
        let mut store = DestinationStore::new();
        store.add("Rome", "Italy", "", "", "", "food tour").unwrap();
        store.add("Lima", "Peru", "", "", "", "hiking").unwrap();

        let results = store.search("food");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].city, "Rome");

        let by_country = store.search("PERU");
        assert_eq!(by_country.len(), 1);
        assert_eq!(by_country[0].city, "Lima");
    }

    #[test]
    fn test_empty_search_returns_all_in_order() {
        let store = store_with_paris_twice();
        let cities: Vec<&str> = store.search("").iter().map(|r| r.city.as_str()).collect();
        assert_eq!(cities, vec!["Paris", "Lima", "paris"]);
    }

    #[test]
    fn test_view_empty_store() {
        let store = DestinationStore::new();
        assert!(store.view().is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_view_lists_in_insertion_order() {
        let store = store_with_paris_twice();
        let view = store.view().unwrap();
        let lines: Vec<&str> = view.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("- Paris, France"));
        assert!(lines[1].starts_with("- Lima, Peru"));
        assert!(lines[2].starts_with("- paris, Texas"));
    }
}
