//! Extraction of one group's values from a flat source

use crate::domain::{ArgValues, GroupParams, GroupSchema};

/// Copy the entries of `source` that belong to `schema` into a fresh [`GroupParams`].
///
/// Keys are matched directly or with the short-form marker re-added; everything
/// else in the source is ignored.
pub fn extract(schema: &GroupSchema, source: &impl ArgValues) -> GroupParams {
    let mut group = GroupParams::new(schema.clone());
    for (key, value) in source.values() {
        if let Some(spec) = schema.find(key) {
            group.set(spec.name(), value.cloned());
        }
    }
    group
}
