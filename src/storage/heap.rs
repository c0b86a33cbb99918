//! Schematic heap file backing the index.
//!
//! Nothing is stored here: the heap only decides which page and slot each
//! input record would occupy, so leaf entries can point at a row id.

use rand::{Rng, seq::SliceRandom};

use crate::{
    db_debug,
    debugger::Component,
    storage::{
        errors::{StorageError, StorageResult},
        page::{PageId, RowId},
    },
};

/// Slot ids are `u16`, so a page holds at most 65536 rows.
pub const MAX_ROWS_PER_PAGE: usize = u16::MAX as usize + 1;

#[derive(Debug, Clone, PartialEq)]
pub struct HeapFile {
    rows_per_page: usize,
    /// Row id of each record, indexed by input ordinal.
    placement: Vec<RowId>,
}

impl HeapFile {
    /// Places records in input order, filling each page before the next.
    pub fn sequential(record_count: usize, rows_per_page: usize) -> StorageResult<Self> {
        Self::with_order(rows_per_page, (0..record_count).collect())
    }

    /// Places records on randomly chosen slots.
    pub fn scattered<R: Rng + ?Sized>(
        record_count: usize,
        rows_per_page: usize,
        rng: &mut R,
    ) -> StorageResult<Self> {
        let mut order: Vec<usize> = (0..record_count).collect();
        order.shuffle(rng);
        Self::with_order(rows_per_page, order)
    }

    /// `order[slot_index]` is the input ordinal stored at that slot.
    fn with_order(rows_per_page: usize, order: Vec<usize>) -> StorageResult<Self> {
        if rows_per_page == 0 || rows_per_page > MAX_ROWS_PER_PAGE {
            return Err(StorageError::InvalidPageCapacity { rows_per_page });
        }

        let mut placement = vec![
            RowId {
                page_id: PageId(0),
                slot_id: 0,
            };
            order.len()
        ];

        for (position, source) in order.iter().enumerate() {
            placement[*source] = RowId {
                page_id: PageId((position / rows_per_page) as u64),
                slot_id: (position % rows_per_page) as u16,
            };
        }

        db_debug!(
            Component::Heap,
            "placed {} rows on {} pages",
            placement.len(),
            placement.len().div_ceil(rows_per_page)
        );

        Ok(Self {
            rows_per_page,
            placement,
        })
    }

    pub fn rows_per_page(&self) -> usize {
        self.rows_per_page
    }

    pub fn len(&self) -> usize {
        self.placement.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placement.is_empty()
    }

    pub fn page_count(&self) -> usize {
        self.placement.len().div_ceil(self.rows_per_page)
    }

    pub fn row_id(&self, source: usize) -> Option<RowId> {
        self.placement.get(source).copied()
    }

    /// Input ordinals per page, in slot order.
    pub fn pages(&self) -> Vec<Vec<usize>> {
        let mut pages = vec![vec![None; self.rows_per_page]; self.page_count()];

        for (source, rid) in self.placement.iter().enumerate() {
            pages[rid.page_id.0 as usize][rid.slot_id as usize] = Some(source);
        }

        pages
            .into_iter()
            .map(|slots| slots.into_iter().flatten().collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn sequential_fills_pages_in_order() {
        let heap = HeapFile::sequential(5, 2).unwrap();

        assert_eq!(heap.page_count(), 3);
        assert_eq!(
            heap.row_id(3),
            Some(RowId {
                page_id: PageId(1),
                slot_id: 1
            })
        );
        assert_eq!(heap.pages(), vec![vec![0, 1], vec![2, 3], vec![4]]);
        assert_eq!(heap.row_id(5), None);
    }

    #[test]
    fn scattered_is_a_permutation() {
        let mut rng = StdRng::seed_from_u64(7);
        let heap = HeapFile::scattered(21, 4, &mut rng).unwrap();

        let mut seen: Vec<usize> = heap.pages().into_iter().flatten().collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..21).collect::<Vec<_>>());

        let mut rids: Vec<RowId> = (0..21).filter_map(|i| heap.row_id(i)).collect();
        rids.sort();
        rids.dedup();
        assert_eq!(rids.len(), 21);
    }

    #[test]
    fn same_seed_same_layout() {
        let a = HeapFile::scattered(10, 3, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = HeapFile::scattered(10, 3, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn zero_rows_per_page_is_rejected() {
        assert_eq!(
            HeapFile::sequential(3, 0),
            Err(StorageError::InvalidPageCapacity { rows_per_page: 0 })
        );
    }

    #[test]
    fn page_capacity_is_bounded_by_slot_width() {
        assert_eq!(
            HeapFile::sequential(3, MAX_ROWS_PER_PAGE + 1),
            Err(StorageError::InvalidPageCapacity {
                rows_per_page: MAX_ROWS_PER_PAGE + 1
            })
        );

        let heap = HeapFile::sequential(MAX_ROWS_PER_PAGE, MAX_ROWS_PER_PAGE).unwrap();
        assert_eq!(heap.page_count(), 1);
        assert_eq!(
            heap.row_id(MAX_ROWS_PER_PAGE - 1).map(|r| r.slot_id),
            Some(u16::MAX)
        );
        assert_eq!(heap.pages()[0].len(), MAX_ROWS_PER_PAGE);
    }
}
