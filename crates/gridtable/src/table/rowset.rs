//! Row insertion and deletion, rowsets and separator markers.
//!
//! Every stored row index (rowset members, line-before and line-after
//! markers) is renumbered when rows move, so the bookkeeping keeps pointing
//! at the same logical rows.

use tracing::debug;

use super::{Row, Table};
use crate::config::InsertMembership;
use crate::error::{Result, TableError};

/// Handle to a rowset created with [`Table::create_rowset`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowsetId(usize);

impl RowsetId {
    pub fn index(&self) -> usize {
        self.0
    }
}

fn shift_up(indices: &mut [usize], at: usize) {
    for idx in indices.iter_mut().filter(|idx| **idx >= at) {
        *idx += 1;
    }
}

fn remove_and_shift_down(indices: &mut Vec<usize>, at: usize) {
    indices.retain(|idx| *idx != at);
    for idx in indices.iter_mut().filter(|idx| **idx > at) {
        *idx -= 1;
    }
}

fn insert_sorted(indices: &mut Vec<usize>, row: usize) {
    if let Err(pos) = indices.binary_search(&row) {
        indices.insert(pos, row);
    }
}

impl Table {
    /// Inserts an empty row at `at` and returns its index.
    ///
    /// An `at` at or past the end appends instead. Rowset members and
    /// separator markers at or after `at` move down with their rows. With
    /// [`InsertMembership::AllRowsets`] the new row also joins every rowset.
    pub fn insert_row(&mut self, at: usize) -> usize {
        if at >= self.rows.len() {
            return self.add_row();
        }
        self.rows.insert(at, Row::blank(self.columns.len()));

        shift_up(&mut self.line_after, at);
        shift_up(&mut self.line_before, at);
        let join = self.config.insert_membership == InsertMembership::AllRowsets;
        for members in &mut self.rowsets {
            shift_up(members, at);
            if join {
                members.push(at);
            }
        }
        debug!(row = at, rowsets = self.rowsets.len(), joined = join, "inserted row");
        at
    }

    /// Removes row `at`, dropping it from every rowset and marker list and
    /// moving later indices up by one.
    pub fn delete_row(&mut self, at: usize) -> Result<()> {
        self.check_row(at)?;
        self.rows.remove(at);

        remove_and_shift_down(&mut self.line_after, at);
        remove_and_shift_down(&mut self.line_before, at);
        for members in &mut self.rowsets {
            remove_and_shift_down(members, at);
        }
        debug!(row = at, rowsets = self.rowsets.len(), "deleted row");
        Ok(())
    }

    /// Creates an empty rowset.
    pub fn create_rowset(&mut self) -> RowsetId {
        self.rowsets.push(Vec::new());
        RowsetId(self.rowsets.len() - 1)
    }

    pub fn rowset_count(&self) -> usize {
        self.rowsets.len()
    }

    /// Adds `row` to the rowset. Members keep insertion order.
    pub fn append_to_rowset(&mut self, id: RowsetId, row: usize) -> Result<()> {
        self.check_rowset(id)?;
        self.check_row(row)?;
        self.rowsets[id.0].push(row);
        Ok(())
    }

    /// Members of the rowset in insertion order; empty for an unknown id.
    pub fn get_rowset(&self, id: RowsetId) -> &[usize] {
        self.rowsets.get(id.0).map(Vec::as_slice).unwrap_or(&[])
    }

    pub(crate) fn check_rowset(&self, id: RowsetId) -> Result<()> {
        if id.0 >= self.rowsets.len() {
            return Err(TableError::UnknownRowset {
                id: id.0,
                count: self.rowsets.len(),
            });
        }
        Ok(())
    }

    /// Draws a separator line after `row`.
    pub fn add_line_after(&mut self, row: usize) -> Result<()> {
        self.check_row(row)?;
        insert_sorted(&mut self.line_after, row);
        Ok(())
    }

    /// Draws a separator line before `row`.
    pub fn add_line_before(&mut self, row: usize) -> Result<()> {
        self.check_row(row)?;
        insert_sorted(&mut self.line_before, row);
        Ok(())
    }

    /// Rows followed by a separator, ascending.
    pub fn line_after(&self) -> &[usize] {
        &self.line_after
    }

    /// Rows preceded by a separator, ascending.
    pub fn line_before(&self) -> &[usize] {
        &self.line_before
    }

    pub fn has_line_after(&self, row: usize) -> bool {
        self.line_after.binary_search(&row).is_ok()
    }

    /// Whether a separator is drawn above `row`.
    ///
    /// A line-before marker is skipped when the previous row already draws a
    /// line after itself, so the two never double up.
    pub fn has_line_before(&self, row: usize) -> bool {
        let previous_draws = row
            .checked_sub(1)
            .is_some_and(|prev| self.has_line_after(prev));
        self.line_before.binary_search(&row).is_ok() && !previous_draws
    }
}

#[cfg(test)]
mod tests {
    use crate::{CellType, InsertMembership, Justify, Table, TableConfig, TableError};

    fn table(rows: usize, membership: InsertMembership) -> Table {
        let mut t = Table::with_config(TableConfig {
            insert_membership: membership,
            ..TableConfig::default()
        });
        t.add_column("V", 6, CellType::Int, Justify::Right);
        for i in 0..rows {
            let r = t.add_row();
            t.put_int(r, 0, i as i64).unwrap();
        }
        t
    }

    #[test]
    fn test_insert_past_end_appends() {
        let mut t = table(2, InsertMembership::None);
        assert_eq!(t.insert_row(10), 2);
        assert_eq!(t.row_count(), 3);
    }

    #[test]
    fn test_insert_shifts_rows_and_markers() {
        let mut t = table(4, InsertMembership::None);
        t.add_line_after(1).unwrap();
        t.add_line_before(2).unwrap();
        let rs = t.create_rowset();
        t.append_to_rowset(rs, 0).unwrap();
        t.append_to_rowset(rs, 2).unwrap();

        assert_eq!(t.insert_row(1), 1);
        assert!(t.get(1, 0).is_empty());
        assert_eq!(t.get_int(2, 0), 1);
        assert_eq!(t.line_after(), [2]);
        assert_eq!(t.line_before(), [3]);
        assert_eq!(t.get_rowset(rs), [0, 3]);
    }

    #[test]
    fn test_insert_joins_rowsets_when_configured() {
        let mut t = table(4, InsertMembership::AllRowsets);
        let rs = t.create_rowset();
        t.append_to_rowset(rs, 3).unwrap();
        t.insert_row(2);
        assert_eq!(t.get_rowset(rs), [4, 2]);
    }

    #[test]
    fn test_delete_drops_and_shifts() {
        let mut t = table(5, InsertMembership::None);
        let rs = t.create_rowset();
        for r in [1, 2, 4] {
            t.append_to_rowset(rs, r).unwrap();
        }
        t.add_line_after(2).unwrap();
        t.add_line_after(4).unwrap();
        t.add_line_before(3).unwrap();

        t.delete_row(2).unwrap();
        assert_eq!(t.row_count(), 4);
        assert_eq!(t.get_int(2, 0), 3);
        assert_eq!(t.get_rowset(rs), [1, 3]);
        assert_eq!(t.line_after(), [3]);
        assert_eq!(t.line_before(), [2]);
    }

    #[test]
    fn test_delete_row_zero_renumbers() {
        let mut t = table(3, InsertMembership::None);
        let rs = t.create_rowset();
        t.append_to_rowset(rs, 0).unwrap();
        t.append_to_rowset(rs, 2).unwrap();
        t.add_line_after(0).unwrap();
        t.delete_row(0).unwrap();
        assert_eq!(t.get_rowset(rs), [1]);
        assert!(t.line_after().is_empty());
    }

    #[test]
    fn test_delete_out_of_range() {
        let mut t = table(1, InsertMembership::None);
        assert_eq!(
            t.delete_row(1),
            Err(TableError::RowOutOfRange { row: 1, count: 1 })
        );
    }

    #[test]
    fn test_rowset_handles() {
        let mut t = table(3, InsertMembership::None);
        let a = t.create_rowset();
        let b = t.create_rowset();
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(t.rowset_count(), 2);
        t.append_to_rowset(b, 2).unwrap();
        t.append_to_rowset(b, 0).unwrap();
        assert_eq!(t.get_rowset(b), [2, 0]);
        assert!(t.get_rowset(a).is_empty());
        assert!(t.append_to_rowset(b, 3).is_err());

        let mut other = Table::new();
        other.create_rowset();
        other.create_rowset();
        let unknown = other.create_rowset();
        assert!(t.get_rowset(unknown).is_empty());
        assert_eq!(
            t.append_to_rowset(unknown, 0),
            Err(TableError::UnknownRowset { id: 2, count: 2 })
        );
    }

    #[test]
    fn test_markers_sorted_and_unique() {
        let mut t = table(6, InsertMembership::None);
        for r in [4, 1, 4, 3] {
            t.add_line_after(r).unwrap();
        }
        assert_eq!(t.line_after(), [1, 3, 4]);
        assert!(t.add_line_before(6).is_err());
    }

    #[test]
    fn test_line_before_suppressed_after_line_after() {
        let mut t = table(4, InsertMembership::None);
        t.add_line_after(0).unwrap();
        t.add_line_before(1).unwrap();
        t.add_line_before(3).unwrap();
        assert!(!t.has_line_before(1));
        assert!(t.has_line_before(3));
        assert!(t.has_line_after(0));
        assert!(!t.has_line_before(0));
    }
}
