//! Structural mutation errors

use crate::types::{ModifierId, TargetId};
use thiserror::Error;

/// A mutation that would break a list or column invariant
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StructureError {
    #[error("cannot remove the last {0}")]
    LastEntry(&'static str),
    #[error("column count is already at the maximum of {0}")]
    TooManyColumns(usize),
    #[error("no {kind} at index {index}")]
    UnknownRow { kind: &'static str, index: usize },
    #[error("unknown modifier {0:?}")]
    UnknownModifier(ModifierId),
    #[error("unknown target {0:?}")]
    UnknownTarget(TargetId),
}

/// Remove `index` from a list that must keep at least one entry
pub(crate) fn remove_keeping_one<T>(
    items: &mut Vec<T>,
    index: usize,
    kind: &'static str,
) -> Result<T, StructureError> {
    if index >= items.len() {
        return Err(StructureError::UnknownRow { kind, index });
    }
    if items.len() == 1 {
        tracing::warn!(kind, "refused to remove the last entry");
        return Err(StructureError::LastEntry(kind));
    }
    Ok(items.remove(index))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_keeping_one() {
        let mut items = vec![1, 2];
        assert_eq!(remove_keeping_one(&mut items, 0, "row"), Ok(1));
        assert_eq!(
            remove_keeping_one(&mut items, 0, "row"),
            Err(StructureError::LastEntry("row"))
        );
        assert_eq!(
            remove_keeping_one(&mut items, 3, "row"),
            Err(StructureError::UnknownRow { kind: "row", index: 3 })
        );
        assert_eq!(items, vec![2]);
    }
}
