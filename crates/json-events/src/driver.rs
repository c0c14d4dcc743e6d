//! Glue shared by the per-format `from_*` / `to_*` functions.

use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::events::{from_value, Consumer, Pipeline, ToValue};
use crate::value::Value;

/// Runs `produce` into `pipeline` ending in a [`ToValue`].
pub(crate) fn build_value(
    format: &'static str,
    input_len: usize,
    pipeline: &Pipeline,
    produce: impl FnOnce(&mut dyn Consumer) -> Result<()>,
) -> Result<Value<'static>> {
    debug!(format, input_len, layers = pipeline.len(), "decoding value");
    let mut to_value = ToValue::new();
    {
        let mut chain = pipeline.build(&mut to_value);
        produce(&mut chain)?;
    }
    to_value.into_value()
}

/// Replays `v` into `pipeline` ending in `sink`, returning the sink.
pub(crate) fn feed_value<C: Consumer>(
    format: &'static str,
    v: &Value<'_>,
    pipeline: &Pipeline,
    mut sink: C,
) -> Result<C> {
    debug!(format, layers = pipeline.len(), "encoding value");
    {
        let mut chain = pipeline.build(&mut sink);
        from_value(v, &mut chain)?;
    }
    Ok(sink)
}

pub(crate) fn read_file(format: &'static str, path: &Path) -> Result<Vec<u8>> {
    let data = std::fs::read(path)?;
    debug!(format, path = %path.display(), len = data.len(), "loaded file");
    Ok(data)
}
