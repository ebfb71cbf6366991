//! Generation log
//!
//! Optionally mirrors each generated prompt/URL/seed into a hosted table.
//! When no store is configured the [`NoopLog`] stands in, so callers always
//! record through the same interface.

pub mod mock;
pub mod supabase;

pub use mock::MockGenerationLog;
pub use supabase::SupabaseLog;

use crate::models::GenerationLogEntry;
use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait GenerationLog: Send + Sync {
    async fn record(&self, entry: &GenerationLogEntry) -> Result<()>;
}

/// Discards every entry.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopLog;

#[async_trait]
impl GenerationLog for NoopLog {
    async fn record(&self, _entry: &GenerationLogEntry) -> Result<()> {
        Ok(())
    }
}
