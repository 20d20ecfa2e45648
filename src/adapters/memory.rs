use crate::core::FactSource;
use crate::domain::model::FactSnapshot;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Serves clones of a snapshot held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryFactSource {
    snapshot: FactSnapshot,
}

impl InMemoryFactSource {
    pub fn new(snapshot: FactSnapshot) -> Self {
        Self { snapshot }
    }
}

#[async_trait]
impl FactSource for InMemoryFactSource {
    fn name(&self) -> &str {
        "memory"
    }

    async fn snapshot(&self) -> Result<FactSnapshot> {
        Ok(self.snapshot.clone())
    }
}
