//! Outcome normalization
//!
//! [`guard`] runs one operation and turns the two "nothing to report"
//! failures (not-found, permission-denied) into an empty value of the
//! operation's declared [`ResultShape`]. Every other failure propagates.

use crate::gcp::FailureClass;
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::future::Future;
use tracing::Instrument;
use uuid::Uuid;

/// What an operation returns on success, declared when it is registered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ResultShape {
    /// Ordered sequence; empty value is `[]`
    Collection,
    /// Single record or scalar; empty value is `{}`
    Record,
}

impl ResultShape {
    /// Empty value handed back on a classified failure
    pub fn empty(&self) -> Value {
        match self {
            Self::Collection => Value::Array(Vec::new()),
            Self::Record => Value::Object(serde_json::Map::new()),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Collection => "collection",
            Self::Record => "record",
        }
    }
}

/// Run `call` as operation `name`.
///
/// Logs the invocation and its arguments at info level, returns the result
/// unchanged on success, and on not-found / permission-denied logs the error
/// with its arguments and cause chain and returns `shape.empty()`.
pub async fn guard<T, F>(
    name: &str,
    shape: ResultShape,
    args: &[(&str, &str)],
    call: F,
) -> Result<Value>
where
    T: Serialize,
    F: Future<Output = Result<T>>,
{
    let call_id = Uuid::new_v4();
    let span = tracing::info_span!("gcp_call", function = name, %call_id, args = ?args);

    async move {
        tracing::info!(function = name, args = ?args, "executing_gcp_logic");

        match call.await {
            Ok(value) => serde_json::to_value(value).context("Failed to serialize result"),
            Err(err) => match FailureClass::of(&err) {
                Some(class) => {
                    tracing::error!(
                        function = name,
                        shape = shape.as_str(),
                        args = ?args,
                        error = %err,
                        cause = ?err,
                        "{}",
                        class.event()
                    );
                    Ok(shape.empty())
                }
                None => Err(err),
            },
        }
    }
    .instrument(span)
    .await
}
