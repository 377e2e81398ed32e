//! Sorting, summation and column tightening.

use std::cmp::Ordering;

use tracing::debug;

use super::Table;
use crate::cell::{Cell, CellType};
use crate::error::Result;
use crate::table::RowsetId;
use crate::wrap::{display_width, wrap};

/// Adds up the numeric cells of `cells`.
///
/// The first numeric cell fixes the result type. Cells of the other numeric
/// type are converted to it (floats truncate when summed into an integer);
/// non-numeric cells are skipped. With no numeric cells the result is empty.
fn accumulate<'a>(cells: impl IntoIterator<Item = &'a Cell>) -> Cell {
    cells.into_iter().fold(Cell::Empty, |total, cell| match (total, cell) {
        (Cell::Empty, Cell::Int(v)) => Cell::Int(*v),
        (Cell::Empty, Cell::Float(v)) => Cell::Float(*v),
        (Cell::Int(t), Cell::Int(v)) => Cell::Int(t.wrapping_add(*v)),
        (Cell::Int(t), Cell::Float(v)) => Cell::Int(t.wrapping_add(*v as i64)),
        (Cell::Float(t), Cell::Float(v)) => Cell::Float(t + v),
        (Cell::Float(t), Cell::Int(v)) => Cell::Float(t + *v as f64),
        (total, _) => total,
    })
}

impl Table {
    /// Sorts rows `from..=to` ascending by column `col`.
    ///
    /// `to` is clamped to the last row. Rows are compared with
    /// [`Cell::sort_cmp`] and exchanged pairwise, so ties may change order.
    /// Rowsets and separator markers are positional and do not follow the
    /// rows they were attached to.
    pub fn sort(&mut self, from: usize, to: usize, col: usize) -> Result<()> {
        self.check_column(col)?;
        let Some(last) = self.last_row() else {
            return Ok(());
        };
        let to = to.min(last);
        for i in from..to {
            for j in i + 1..=to {
                if self.rows[i].cells[col].sort_cmp(&self.rows[j].cells[col]) == Ordering::Greater {
                    self.rows.swap(i, j);
                }
            }
        }
        Ok(())
    }

    /// Sum of column `col` over every row.
    pub fn sum(&self, col: usize) -> Cell {
        match self.last_row() {
            Some(last) => self.sum_rows(col, 0, last),
            None => Cell::Empty,
        }
    }

    /// Sum of column `col` over rows `from..=to`; `to` is clamped to the last
    /// row.
    pub fn sum_rows(&self, col: usize, from: usize, to: usize) -> Cell {
        let to = to.saturating_add(1).min(self.rows.len());
        if from >= to {
            return Cell::Empty;
        }
        accumulate(self.rows[from..to].iter().filter_map(|r| r.cells.get(col)))
    }

    /// Sum of column `col` over the members of a rowset.
    pub fn sum_rowset(&self, id: RowsetId, col: usize) -> Result<Cell> {
        self.check_rowset(id)?;
        Ok(accumulate(
            self.get_rowset(id).iter().map(|&row| self.get(row, col)),
        ))
    }

    /// Inserts a row at `at` holding, for each of `cols`, the sum over rows
    /// `from..=to`. Sums are taken before the row is inserted.
    ///
    /// Returns the index of the new row.
    pub fn insert_sum_row(
        &mut self,
        at: usize,
        from: usize,
        to: usize,
        cols: &[usize],
    ) -> Result<usize> {
        let sums = cols
            .iter()
            .map(|&col| -> Result<(usize, Cell)> {
                self.check_column(col)?;
                Ok((col, self.sum_rows(col, from, to)))
            })
            .collect::<Result<Vec<_>>>()?;
        self.put_sums(at, sums)
    }

    /// Inserts a row at `at` holding, for each of `cols`, the sum over the
    /// rowset's members. Sums are taken before the row is inserted.
    ///
    /// Returns the index of the new row.
    pub fn insert_sum_rowset_cols(
        &mut self,
        id: RowsetId,
        at: usize,
        cols: &[usize],
    ) -> Result<usize> {
        let sums = cols
            .iter()
            .map(|&col| -> Result<(usize, Cell)> {
                self.check_column(col)?;
                Ok((col, self.sum_rowset(id, col)?))
            })
            .collect::<Result<Vec<_>>>()?;
        self.put_sums(at, sums)
    }

    fn put_sums(&mut self, at: usize, sums: Vec<(usize, Cell)>) -> Result<usize> {
        let row = self.insert_row(at);
        for (col, cell) in sums {
            self.put(row, col, cell)?;
        }
        Ok(row)
    }

    /// Shrinks every bounded string column to the widest line it has to show,
    /// counting header lines and wrapped cell lines. Never widens.
    pub fn tighten_columns(&mut self) {
        for col in 0..self.columns.len() {
            let def = &self.columns[col];
            if def.cell_type() != CellType::String || def.width() == 0 {
                continue;
            }
            let width = def.width();
            let header = def.header().iter().map(|l| display_width(l)).max().unwrap_or(0);
            let cells = self
                .rows
                .iter()
                .filter_map(|r| r.cells[col].as_str())
                .filter_map(|s| wrap(s, width).widest)
                .max()
                .unwrap_or(0);
            let needed = header.max(cells);
            if needed > 0 && needed < width {
                debug!(column = %def.title(), from = width, to = needed, "tightening column");
                self.columns[col].set_width(needed);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Justify, TableError};

    fn numbers(values: &[i64]) -> Table {
        let mut t = Table::new();
        t.add_column("N", 6, CellType::Int, Justify::Right);
        t.add_column("F", 8, CellType::Float, Justify::Right);
        for v in values {
            let r = t.add_row();
            t.put_int(r, 0, *v).unwrap();
            t.put_float(r, 1, *v as f64 / 2.0).unwrap();
        }
        t
    }

    fn column(t: &Table, col: usize) -> Vec<i64> {
        (0..t.row_count()).map(|r| t.get_int(r, col)).collect()
    }

    #[test]
    fn test_sort_whole_table() {
        let mut t = numbers(&[5, 3, 9, 1]);
        t.sort(0, 3, 0).unwrap();
        assert_eq!(column(&t, 0), [1, 3, 5, 9]);
        // rows move as a whole
        assert_eq!(t.get_float(0, 1), 0.5);
    }

    #[test]
    fn test_sort_range_leaves_outside_rows() {
        let mut t = numbers(&[9, 5, 3, 1, 0]);
        t.sort(1, 3, 0).unwrap();
        assert_eq!(column(&t, 0), [9, 1, 3, 5, 0]);
    }

    #[test]
    fn test_sort_clamps_and_validates() {
        let mut t = numbers(&[2, 1]);
        t.sort(0, 100, 0).unwrap();
        assert_eq!(column(&t, 0), [1, 2]);
        assert_eq!(
            t.sort(0, 1, 5),
            Err(TableError::ColumnOutOfRange { col: 5, count: 2 })
        );
        let mut empty = numbers(&[]);
        assert!(empty.sort(0, 10, 0).is_ok());
    }

    #[test]
    fn test_sort_strings_ignores_case() {
        let mut t = Table::new();
        t.add_column("S", 10, CellType::String, Justify::Left);
        for s in ["pear", "Apple", "banana"] {
            let r = t.add_row();
            t.put_str(r, 0, s).unwrap();
        }
        t.sort(0, 2, 0).unwrap();
        let sorted: Vec<_> = (0..3).map(|r| t.get_str(r, 0).to_string()).collect();
        assert_eq!(sorted, ["Apple", "banana", "pear"]);
    }

    #[test]
    fn test_sums() {
        let t = numbers(&[1, 2, 3, 4]);
        assert_eq!(t.sum(0), Cell::Int(10));
        assert_eq!(t.sum(1), Cell::Float(5.0));
        assert_eq!(t.sum_rows(0, 1, 2), Cell::Int(5));
        assert_eq!(t.sum_rows(0, 2, 99), Cell::Int(7));
        assert_eq!(t.sum_rows(0, 3, 1), Cell::Empty);
        assert_eq!(numbers(&[]).sum(0), Cell::Empty);
    }

    #[test]
    fn test_sum_mixed_types_follow_first() {
        let mut t = Table::new();
        t.add_column("X", 6, CellType::Float, Justify::Right);
        for _ in 0..4 {
            t.add_row();
        }
        t.put_str(0, 0, "n/a").unwrap();
        t.put_int(1, 0, 2).unwrap();
        t.put_float(2, 0, 1.5).unwrap();
        t.put_int(3, 0, 3).unwrap();
        assert_eq!(t.sum(0), Cell::Int(6));
        assert_eq!(t.sum_rows(0, 2, 3), Cell::Float(4.5));
    }

    #[test]
    fn test_sum_rowset() {
        let mut t = numbers(&[10, 20, 30, 40]);
        let rs = t.create_rowset();
        t.append_to_rowset(rs, 0).unwrap();
        t.append_to_rowset(rs, 3).unwrap();
        assert_eq!(t.sum_rowset(rs, 0).unwrap(), Cell::Int(50));
        assert_eq!(t.sum_rowset(rs, 1).unwrap(), Cell::Float(25.0));
    }

    #[test]
    fn test_insert_sum_row_sums_before_inserting() {
        let mut t = numbers(&[1, 2, 3]);
        let row = t.insert_sum_row(1, 0, 2, &[0, 1]).unwrap();
        assert_eq!(row, 1);
        assert_eq!(t.row_count(), 4);
        assert_eq!(t.get(1, 0), &Cell::Int(6));
        assert_eq!(t.get(1, 1), &Cell::Float(3.0));
        assert_eq!(column(&t, 0), [1, 6, 2, 3]);
    }

    #[test]
    fn test_insert_sum_row_appends_totals() {
        let mut t = numbers(&[4, 5]);
        let row = t.insert_sum_row(usize::MAX, 0, usize::MAX, &[0]).unwrap();
        assert_eq!(row, 2);
        assert_eq!(t.get_int(2, 0), 9);
        assert!(t.get(2, 1).is_empty());
    }

    #[test]
    fn test_insert_sum_rowset_cols() {
        let mut t = numbers(&[1, 2, 3, 4]);
        let rs = t.create_rowset();
        t.append_to_rowset(rs, 1).unwrap();
        t.append_to_rowset(rs, 3).unwrap();
        let row = t.insert_sum_rowset_cols(rs, 4, &[0]).unwrap();
        assert_eq!(t.get_int(row, 0), 6);
        assert!(t.insert_sum_rowset_cols(rs, 0, &[9]).is_err());
        assert_eq!(t.row_count(), 5);
    }

    #[test]
    fn test_tighten_shrinks_string_columns_only() {
        let mut t = Table::new();
        t.add_column("Name", 20, CellType::String, Justify::Left);
        t.add_column("Qty", 10, CellType::Int, Justify::Right);
        let r = t.add_row();
        t.put_str(r, 0, "Widget").unwrap();
        t.put_int(r, 1, 3).unwrap();
        t.tighten_columns();
        assert_eq!(t.column(0).unwrap().width(), 6);
        assert_eq!(t.column(1).unwrap().width(), 10);
    }

    #[test]
    fn test_tighten_respects_header_and_wrapped_lines() {
        let mut t = Table::new();
        t.add_column("Long Header", 20, CellType::String, Justify::Left);
        let r = t.add_row();
        t.put_str(r, 0, "abc").unwrap();
        t.tighten_columns();
        assert_eq!(t.column(0).unwrap().width(), 11);

        let mut t = Table::new();
        t.add_column("X", 10, CellType::String, Justify::Left);
        let r = t.add_row();
        t.put_str(r, 0, "aaaa bbbb cccc dddd").unwrap();
        t.tighten_columns();
        // wrapped as "aaaa bbbb" / "cccc dddd"
        assert_eq!(t.column(0).unwrap().width(), 9);
        assert_eq!(t.row_height(r), 2);
    }
}
