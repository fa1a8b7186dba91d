use std::error::Error;

use serde::{Serialize, Serializer};
use tracing::info;

use super::ConvertCmd;
use crate::commands::Execute;
use crate::config::ProfileConfig;
use crate::document::Document;

/// Documents resolved for one root table.
///
/// Serializes as the bare list of documents.
#[derive(Debug, Default)]
pub struct ConvertResult {
    pub root: String,
    pub documents: Vec<Document>,
}

impl Serialize for ConvertResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.documents.serialize(serializer)
    }
}

impl Execute for ConvertCmd {
    type Output = ConvertResult;

    fn execute(self, config: &ProfileConfig) -> Result<Self::Output, Box<dyn Error>> {
        let profile = config.build()?;
        let root = self.root.or_else(|| config.root.clone());
        let documents = profile.resolve_named(root.as_deref())?;

        let root = root.unwrap_or_default();
        info!(root = %root, documents = documents.len(), "converted");
        Ok(ConvertResult { root, documents })
    }
}
