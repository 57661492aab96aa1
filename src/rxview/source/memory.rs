use super::RecordSource;
use crate::error::Result;
use crate::model::Record;

/// A source over a fixed list of records. Records can be swapped between
/// fetches to simulate a backend refresh.
#[derive(Debug, Default, Clone)]
pub struct InMemorySource {
    records: Vec<Record>,
    fetches: usize,
}

impl InMemorySource {
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records,
            fetches: 0,
        }
    }

    pub fn replace(&mut self, records: Vec<Record>) {
        self.records = records;
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches
    }
}

impl RecordSource for InMemorySource {
    fn describe(&self) -> String {
        "memory".to_string()
    }

    fn fetch_page(&mut self) -> Result<Vec<Record>> {
        self.fetches += 1;
        Ok(self.records.clone())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;

    /// A few task rows shaped like the `tasks` preset expects.
    pub fn task_records() -> Vec<Record> {
        vec![
            Record::new()
                .with("id", 1)
                .with("brand", "Biogesic")
                .with("generic", "Paracetamol")
                .with("appType", "Initial")
                .with("appStatus", "Approved")
                .with("assignee", "mcruz")
                .with("date", "2024-01-05"),
            Record::new()
                .with("id", 2)
                .with("brand", "Neozep")
                .with("generic", "Phenylephrine")
                .with("appType", "Renewal")
                .with("appStatus", "Approved")
                .with("date", "2024-01-01"),
            Record::new()
                .with("id", 3)
                .with("brand", "Alaxan")
                .with("generic", "Ibuprofen")
                .with("appType", "Initial")
                .with("appStatus", "Pending")
                .with("assignee", "jreyes")
                .with("date", "2024-01-10"),
        ]
    }

    pub struct SourceFixture {
        pub source: InMemorySource,
    }

    impl Default for SourceFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl SourceFixture {
        pub fn new() -> Self {
            Self {
                source: InMemorySource::default(),
            }
        }

        pub fn with_tasks(mut self) -> Self {
            self.source.records.extend(task_records());
            self
        }

        pub fn with_record(mut self, record: Record) -> Self {
            self.source.records.push(record);
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::SourceFixture;
    use super::*;

    #[test]
    fn fetch_returns_current_records() {
        let mut source = SourceFixture::new()
            .with_tasks()
            .with_record(Record::new().with("id", 4))
            .source;

        assert_eq!(source.fetch_page().unwrap().len(), 4);
        source.replace(vec![Record::new()]);
        assert_eq!(source.fetch_page().unwrap().len(), 1);
        assert_eq!(source.fetch_count(), 2);
    }
}
