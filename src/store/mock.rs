use super::GenerationLog;
use crate::models::GenerationLogEntry;
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct MockGenerationLog {
    entries: Arc<Mutex<Vec<GenerationLogEntry>>>,
    attempt_count: Arc<Mutex<usize>>,
    should_fail: Arc<Mutex<bool>>,
}

impl MockGenerationLog {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
            attempt_count: Arc::new(Mutex::new(0)),
            should_fail: Arc::new(Mutex::new(false)),
        }
    }

    pub fn with_failure(self, should_fail: bool) -> Self {
        *self.should_fail.lock().unwrap() = should_fail;
        self
    }

    pub fn get_entries(&self) -> Vec<GenerationLogEntry> {
        self.entries.lock().unwrap().clone()
    }

    pub fn get_attempt_count(&self) -> usize {
        *self.attempt_count.lock().unwrap()
    }
}

impl Default for MockGenerationLog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GenerationLog for MockGenerationLog {
    async fn record(&self, entry: &GenerationLogEntry) -> Result<()> {
        *self.attempt_count.lock().unwrap() += 1;

        if *self.should_fail.lock().unwrap() {
            return Err(Error::Store("Mock insert failure".to_string()));
        }

        self.entries.lock().unwrap().push(entry.clone());
        Ok(())
    }
}
