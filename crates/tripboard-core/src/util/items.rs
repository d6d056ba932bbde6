// ── Replace-by-id ──

use std::borrow::Cow;

/// Anything with a stable identity inside a list.
pub trait Identified {
    type Id: PartialEq;

    fn id(&self) -> &Self::Id;
}

/// Replace the item whose id matches `update`.
///
/// Returns an owned copy with the single match swapped in place, or the
/// untouched borrowed slice when no id matches. Length and order are
/// always preserved, so no id is ever duplicated.
pub fn update_item<T>(items: &[T], update: T) -> Cow<'_, [T]>
where
    T: Identified + Clone,
{
    let Some(index) = items.iter().position(|item| item.id() == update.id()) else {
        return Cow::Borrowed(items);
    };

    let mut updated = Vec::with_capacity(items.len());
    updated.extend_from_slice(&items[..index]);
    updated.push(update);
    updated.extend_from_slice(&items[index + 1..]);
    Cow::Owned(updated)
}
