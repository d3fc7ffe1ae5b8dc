use anyhow::{Context, Result, anyhow};
use serde_json::Value;

use super::document::StrategyDocument;

pub(super) fn parse_document(raw: &str) -> Result<StrategyDocument> {
    let parsed: Value = serde_json::from_str(raw).context("invalid JSON in strategy document")?;
    let object = parsed
        .as_object()
        .ok_or_else(|| anyhow!("strategy document must be a JSON object"))?;

    let body = match object.get("strategy") {
        Some(wrapped) => wrapped.clone(),
        None => parsed,
    };

    let document: StrategyDocument =
        serde_json::from_value(body).context("strategy document has invalid shape")?;

    if document.axes.is_empty() && document.rings.is_empty() && document.nodes.is_empty() {
        Err(anyhow!("strategy document contains no axes, rings or nodes"))
    } else {
        Ok(document)
    }
}
