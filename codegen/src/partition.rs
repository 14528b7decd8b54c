//! Slices the classified entries into bounded partitions, one per output
//! file.

/// A contiguous slice of the classified entries.
#[derive(Debug, PartialEq)]
pub struct Partition<'e, T> {
    /// 0 when the entries were not split, otherwise the 1-based position of
    /// the partition.
    pub index: usize,
    pub entries: &'e [T],
}

impl<T> Partition<'_, T> {
    /// The name of the module generated for this partition.
    pub fn module_name(&self, base: &str) -> String {
        if self.index == 0 {
            base.to_string()
        } else {
            format!("{}_{}", base, self.index)
        }
    }
}

/// Splits the entries into partitions of at most `max` entries. A maximum of
/// 0 does not limit the size.
///
/// There is always at least one partition, even for no entries, so that a
/// module with an entry point is generated for every document.
pub fn plan_partitions<T>(entries: &[T], max: usize) -> Vec<Partition<'_, T>> {
    if max == 0 || entries.len() <= max {
        return vec![Partition { index: 0, entries }];
    }

    entries
        .chunks(max)
        .enumerate()
        .map(|(index, entries)| Partition {
            index: index + 1,
            entries,
        })
        .collect()
}
