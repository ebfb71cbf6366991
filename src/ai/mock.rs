use super::{Extraction, IdeaExtractor};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct MockIdeaExtractor {
    responses: Arc<Mutex<Vec<Extraction>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockIdeaExtractor {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_response(self, response: Extraction) -> Self {
        self.responses.lock().unwrap().push(response);
        self
    }

    pub fn with_prompts(self, prompts: &[&str]) -> Self {
        self.with_response(Extraction::List(
            prompts.iter().map(|p| p.to_string()).collect(),
        ))
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

impl Default for MockIdeaExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdeaExtractor for MockIdeaExtractor {
    async fn extract(&self, text: &str) -> Extraction {
        let mut count = self.call_count.lock().unwrap();
        *count += 1;

        let responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Extraction::raw_text(text)
        } else {
            let index = (*count - 1) % responses.len();
            responses[index].clone()
        }
    }
}
