use crate::records::{DistrictRecord, FeedbackRecord};

/// Lifecycle of a remotely loaded feature collection.
///
/// A collection is created empty, transitions on its one load-completion
/// event, and a failed load leaves it empty for the rest of the session.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LoadState {
    Pending,
    Loaded,
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeatureCollection<T> {
    records: Vec<T>,
    state: LoadState,
}

impl<T> Default for FeatureCollection<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            state: LoadState::Pending,
        }
    }
}

impl<T> FeatureCollection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn is_loaded(&self) -> bool {
        self.state == LoadState::Loaded
    }

    /// Completes a load, replacing any previous records. Replacing is
    /// allowed so that a source reload stays well-defined; derived counts
    /// are recomputed from scratch after every completion.
    pub fn complete_load(&mut self, records: Vec<T>) {
        self.records = records;
        self.state = LoadState::Loaded;
    }

    /// Marks a failed load. Records stay as they were (empty unless a
    /// previous load had completed).
    pub fn fail_load(&mut self) {
        if self.state == LoadState::Pending {
            self.state = LoadState::Failed;
        }
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn records_mut(&mut self) -> &mut [T] {
        &mut self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Application context owning both feature collections.
///
/// Passed explicitly wherever the data is needed; there are no ambient
/// layer globals.
#[derive(Debug, Default)]
pub struct MapData {
    pub districts: FeatureCollection<DistrictRecord>,
    pub feedbacks: FeatureCollection<FeedbackRecord>,
}

impl MapData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn both_loaded(&self) -> bool {
        self.districts.is_loaded() && self.feedbacks.is_loaded()
    }
}

#[cfg(test)]
mod tests {
    use super::{FeatureCollection, LoadState, MapData};
    use crate::records::FeedbackRecord;
    use serde_json::Map;

    fn feedback(id: &str) -> FeedbackRecord {
        FeedbackRecord {
            id: id.to_string(),
            point: None,
            properties: Map::new(),
        }
    }

    #[test]
    fn starts_pending_and_empty() {
        let c: FeatureCollection<FeedbackRecord> = FeatureCollection::new();
        assert_eq!(c.state(), LoadState::Pending);
        assert!(c.is_empty());
    }

    #[test]
    fn complete_load_replaces_records() {
        let mut c = FeatureCollection::new();
        c.complete_load(vec![feedback("a"), feedback("b")]);
        assert!(c.is_loaded());
        assert_eq!(c.len(), 2);

        c.complete_load(vec![feedback("c")]);
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn failure_does_not_mask_a_completed_load() {
        let mut c = FeatureCollection::new();
        c.complete_load(vec![feedback("a")]);
        c.fail_load();
        assert!(c.is_loaded());
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn both_loaded_requires_both_signals() {
        let mut data = MapData::new();
        assert!(!data.both_loaded());
        data.districts.complete_load(Vec::new());
        assert!(!data.both_loaded());
        data.feedbacks.complete_load(Vec::new());
        assert!(data.both_loaded());
    }
}
