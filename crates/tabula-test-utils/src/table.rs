//! Generic JSON-backed test category with lifecycle recording.

use crate::lifecycle::{Hook, LifecycleLog};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tabula_protocol::{AsAnyArc, Category, CategoryError, CategorySet};

#[derive(Debug, Default, Serialize, Deserialize)]
struct TableData {
    #[serde(default)]
    rows: BTreeMap<String, String>,
    #[serde(default)]
    refs: Vec<String>,
    #[serde(default)]
    delay_ms: u64,
}

/// Reference bound during `resolve`, with the target's row count at the time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRef {
    pub name: String,
    pub rows: usize,
}

/// Category holding string rows and named references to other tables.
#[derive(Debug)]
pub struct TestTable {
    name: String,
    rows: RwLock<BTreeMap<String, String>>,
    refs: Vec<String>,
    resolved: RwLock<Vec<ResolvedRef>>,
    log: LifecycleLog,
}

impl TestTable {
    pub fn row(&self, key: &str) -> Option<String> {
        self.rows.read().get(key).cloned()
    }

    pub fn row_count(&self) -> usize {
        self.rows.read().len()
    }

    pub fn resolved(&self) -> Vec<ResolvedRef> {
        self.resolved.read().clone()
    }
}

impl Category for TestTable {
    fn name(&self) -> &str {
        &self.name
    }

    fn register(&self) -> Result<(), CategoryError> {
        self.log.record(&self.name, Hook::Registered);
        Ok(())
    }

    fn resolve(&self, categories: &CategorySet<'_>) -> Result<(), CategoryError> {
        let mut resolved = Vec::with_capacity(self.refs.len());
        for reference in &self.refs {
            let target = categories.require(&self.name, reference)?;
            let rows = Arc::clone(target)
                .as_any_arc()
                .downcast::<TestTable>()
                .map(|table| table.row_count())
                .unwrap_or_default();
            resolved.push(ResolvedRef {
                name: reference.clone(),
                rows,
            });
        }
        *self.resolved.write() = resolved;
        self.log.record(&self.name, Hook::Resolved);
        Ok(())
    }

    fn translate_text(&self, translator: &dyn Fn(&str, &str) -> String) {
        for (key, text) in self.rows.write().iter_mut() {
            *text = translator(key, text);
        }
        self.log.record(&self.name, Hook::Translated);
    }

    fn destroy(&self) {
        self.log.record(&self.name, Hook::Destroyed);
    }
}

/// Encode a table blob.
pub fn table_blob(rows: &[(&str, &str)], refs: &[&str]) -> Vec<u8> {
    slow_table_blob(rows, refs, 0)
}

/// Encode a table blob whose construction sleeps for `delay_ms`.
pub fn slow_table_blob(rows: &[(&str, &str)], refs: &[&str], delay_ms: u64) -> Vec<u8> {
    let data = TableData {
        rows: rows
            .iter()
            .map(|(key, text)| (key.to_string(), text.to_string()))
            .collect(),
        refs: refs.iter().map(|reference| reference.to_string()).collect(),
        delay_ms,
    };
    serde_json::to_vec(&data).expect("encode table blob")
}

/// Constructor decoding a `TestTable` named `name` and logging into `log`.
pub fn table_constructor(
    name: &str,
    log: &LifecycleLog,
) -> impl Fn(&[u8]) -> Result<Arc<dyn Category>, CategoryError> + Send + Sync + 'static {
    let name = name.to_string();
    let log = log.clone();
    move |bytes: &[u8]| {
        let data: TableData = serde_json::from_slice(bytes)
            .map_err(|err| CategoryError::Malformed(err.to_string()))?;
        if data.delay_ms > 0 {
            std::thread::sleep(Duration::from_millis(data.delay_ms));
        }
        log.record(&name, Hook::Constructed);
        let table: Arc<dyn Category> = Arc::new(TestTable {
            name: name.clone(),
            rows: RwLock::new(data.rows),
            refs: data.refs,
            resolved: RwLock::new(Vec::new()),
            log: log.clone(),
        });
        Ok(table)
    }
}
