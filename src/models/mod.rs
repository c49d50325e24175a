pub mod document;
pub mod goal;
pub mod id;
pub mod task;

pub use document::*;
pub use goal::*;
pub use id::*;
pub use task::*;

use crate::error::TasquestError;

/// Resolve a reference (exact id first, then unique id prefix) to an index into `items`.
pub(crate) fn resolve_index<T>(
    items: &[T],
    reference: &str,
    id_of: impl Fn(&T) -> &str,
    label_of: impl Fn(&T) -> &str,
    not_found: impl Fn(&str) -> TasquestError,
) -> Result<usize, TasquestError> {
    if reference.is_empty() {
        return Err(not_found(reference));
    }
    if let Some(i) = items.iter().position(|item| id_of(item) == reference) {
        return Ok(i);
    }

    let matches: Vec<usize> = items
        .iter()
        .enumerate()
        .filter(|(_, item)| id_of(item).starts_with(reference))
        .map(|(i, _)| i)
        .collect();

    match matches.as_slice() {
        [] => Err(not_found(reference)),
        [only] => Ok(*only),
        _ => {
            let candidates: Vec<String> = matches
                .iter()
                .map(|&i| format!("{} ({})", label_of(&items[i]), id_of(&items[i])))
                .collect();
            Err(TasquestError::ambiguous_ref(reference, &candidates))
        }
    }
}
