use crate::error::Result;
use crate::schema::{Column, SalesRecord};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// The loaded dataset; immutable after construction, reporters borrow it.
#[derive(Debug, Clone, Default)]
pub struct SalesTable {
    records: Vec<SalesRecord>,
}

impl SalesTable {
    /// Derives revenue, period and year on every record while building.
    pub fn from_records(records: Vec<SalesRecord>) -> Self {
        let records = records
            .into_iter()
            .map(SalesRecord::with_derived)
            .collect();
        Self { records }
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn sample(&self, size: usize) -> Vec<&SalesRecord> {
        let mut rng = rand::thread_rng();
        self.records.choose_multiple(&mut rng, size).collect()
    }

    pub fn summary(&self) -> DataSummary {
        let columns = Column::ALL
            .iter()
            .map(|column| {
                let nulls = self
                    .records
                    .iter()
                    .filter(|record| record.is_null(*column))
                    .count();
                ColumnSummary {
                    name: column.header().to_string(),
                    non_null: self.records.len() - nulls,
                    nulls,
                }
            })
            .collect();

        DataSummary {
            record_count: self.records.len(),
            columns,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataSummary {
    pub record_count: usize,
    pub columns: Vec<ColumnSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnSummary {
    pub name: String,
    pub non_null: usize,
    pub nulls: usize,
}

impl DataSummary {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
