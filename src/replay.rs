//! Reading recorded call history back as a report.

use serde::Serialize;
use std::fmt;

use crate::error::{Error, Result};
use crate::instrument::OperationName;
use crate::store::KvStore;

/// One recorded call. `output` is `None` when the call failed before a
/// result was logged.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallRecord {
    pub input: String,
    pub output: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub operation: String,
    pub calls: Vec<CallRecord>,
}

impl Report {
    /// Calls attempted, i.e. recorded inputs.
    pub fn call_count(&self) -> usize {
        self.calls.len()
    }

    /// Calls with an input but no recorded output.
    pub fn unanswered(&self) -> usize {
        self.calls.iter().filter(|c| c.output.is_none()).count()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} was called {} times:", self.operation, self.calls.len())?;
        for call in &self.calls {
            match &call.output {
                Some(output) => writeln!(f, "{}{} -> {}", self.operation, call.input, output)?,
                None => writeln!(f, "{}{} -> <no result>", self.operation, call.input)?,
            }
        }
        Ok(())
    }
}

/// Builds the history report for `name`.
///
/// Inputs and outputs are paired by index. Inputs past the end of the output
/// log are kept with no output.
pub async fn replay(store: &dyn KvStore, name: &OperationName) -> Result<Report> {
    let inputs = decode_log(&name.inputs_key(), store.lrange(&name.inputs_key(), 0, -1).await?)?;
    let outputs = decode_log(&name.outputs_key(), store.lrange(&name.outputs_key(), 0, -1).await?)?;

    if outputs.len() > inputs.len() {
        tracing::warn!(
            "{} has {} outputs for {} inputs; ignoring the extra outputs",
            name,
            outputs.len(),
            inputs.len()
        );
    }

    let mut outputs = outputs.into_iter();
    let calls = inputs
        .into_iter()
        .map(|input| CallRecord {
            input,
            output: outputs.next(),
        })
        .collect();

    Ok(Report {
        operation: name.to_string(),
        calls,
    })
}

fn decode_log(key: &str, items: Vec<Vec<u8>>) -> Result<Vec<String>> {
    items
        .into_iter()
        .map(|item| String::from_utf8(item).map_err(|e| Error::malformed(key, e)))
        .collect()
}
