//! Load policies: how library entries land in an in-memory list

use crate::error::StructureError;

use super::LibraryEntry;

fn next_id<T: LibraryEntry>(current: &[T]) -> u32 {
    current
        .iter()
        .filter_map(|e| e.id())
        .max()
        .map_or(1, |highest| highest + 1)
}

/// Swap the whole list for the library's entries, renumbered from 1
///
/// An empty library leaves a single default entry.
pub fn replace_all<T: LibraryEntry>(current: &mut Vec<T>, library: &[T]) {
    *current = if library.is_empty() {
        vec![T::default()]
    } else {
        library.to_vec()
    };
    for (i, entry) in current.iter_mut().enumerate() {
        entry.set_id(i as u32 + 1);
    }
}

/// Put `entry` in slot `index`, keeping that slot's id
pub fn replace_one<T: LibraryEntry>(
    current: &mut [T],
    index: usize,
    entry: &T,
) -> Result<(), StructureError> {
    let slot = current.get_mut(index).ok_or(StructureError::UnknownRow {
        kind: T::KIND,
        index,
    })?;
    let id = slot.id();
    *slot = entry.clone();
    if let Some(id) = id {
        slot.set_id(id);
    }
    Ok(())
}

pub fn append_one<T: LibraryEntry>(current: &mut Vec<T>, entry: &T) {
    let mut entry = entry.clone();
    entry.set_id(next_id(current));
    current.push(entry);
}

pub fn append_all<T: LibraryEntry>(current: &mut Vec<T>, library: &[T]) {
    for entry in library {
        append_one(current, entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hero::{HeroInput, HeroSpell, Item};

    fn ids(items: &[Item]) -> Vec<u32> {
        items.iter().map(|i| i.item_id).collect()
    }

    #[test]
    fn test_replace_all() {
        let mut current = vec![Item::new("Old")];
        let library = vec![Item::new("Blade"), Item::new("Boots")];
        replace_all(&mut current, &library);
        assert_eq!(current.len(), 2);
        assert_eq!(current[1].name(), "Boots");
        assert_eq!(ids(&current), vec![1, 2]);
    }

    #[test]
    fn test_replace_all_empty_leaves_default() {
        let mut current = vec![HeroInput::new("Axe"), HeroInput::new("Lina")];
        replace_all(&mut current, &[]);
        assert_eq!(current.len(), 1);
        assert_eq!(current[0].name(), "Hero");
    }

    #[test]
    fn test_replace_one_keeps_slot_id() {
        let mut current = vec![Item::new("A"), Item::new("B")];
        current[1].item_id = 7;
        let mut incoming = Item::new("Blade");
        incoming.item_id = 99;

        replace_one(&mut current, 1, &incoming).unwrap();
        assert_eq!(current[1].name(), "Blade");
        assert_eq!(current[1].item_id, 7);

        let err = replace_one(&mut current, 5, &incoming).unwrap_err();
        assert_eq!(err, StructureError::UnknownRow { kind: "item", index: 5 });
    }

    #[test]
    fn test_append_assigns_fresh_ids() {
        let mut current = vec![Item::new("A")];
        current[0].item_id = 3;
        append_all(&mut current, &[Item::new("Blade"), Item::new("Boots")]);
        assert_eq!(ids(&current), vec![3, 4, 5]);
    }

    #[test]
    fn test_spells_have_no_ids() {
        let mut spells = Vec::new();
        append_one(&mut spells, &HeroSpell::new("Laguna"));
        append_one(&mut spells, &HeroSpell::new("Dragon Slave"));
        assert_eq!(spells.len(), 2);
        assert_eq!(spells[1].name, "Dragon Slave");
    }
}
