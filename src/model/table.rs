//! Table model: rows of cells addressed by row index and column.
//!
//! The model is shared between session threads, so every access goes through
//! one mutex. Single-cell calls lock per call; [`TableModel::read`] holds the
//! lock for a whole closure and [`TableModel::rows_snapshot`] copies all rows
//! under it, so multi-step reads never observe a half-applied write.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::{Error, Result};
use crate::event::{ListenerId, ListenerList};

static NEXT_COLUMN_ID: AtomicU64 = AtomicU64::new(1);

// ---------------------------------------------------------------------------
// TableColumn
// ---------------------------------------------------------------------------

/// A column descriptor. Two columns are equal only if they are the same column.
#[derive(Debug, Clone)]
pub struct TableColumn {
    id: u64,
    label: String,
}

impl TableColumn {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            id: NEXT_COLUMN_ID.fetch_add(1, Ordering::Relaxed),
            label: label.into(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl PartialEq for TableColumn {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TableColumn {}

impl std::hash::Hash for TableColumn {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

// ---------------------------------------------------------------------------
// Cell
// ---------------------------------------------------------------------------

/// Address of one cell, usable as a map key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cell {
    pub row_index: usize,
    pub column: TableColumn,
}

impl Cell {
    pub fn new(row_index: usize, column: TableColumn) -> Self {
        Self { row_index, column }
    }
}

/// A cell value changed from `old` to `new`.
///
/// Changes are delivered after the table lock is released, so racing writers
/// may deliver them out of order. `sequence` is taken under the lock and
/// orders the changes of one table as they were applied.
#[derive(Debug, Clone, PartialEq)]
pub struct CellChange<V> {
    pub cell: Cell,
    pub old: Option<V>,
    pub new: Option<V>,
    pub sequence: u64,
}

// ---------------------------------------------------------------------------
// TableModel
// ---------------------------------------------------------------------------

/// Thread-safe table of optional values.
pub struct TableModel<V> {
    columns: Vec<TableColumn>,
    rows: Mutex<Vec<Vec<Option<V>>>>,
    changes: AtomicU64,
    listeners: ListenerList<CellChange<V>>,
}

impl<V: Clone + PartialEq> TableModel<V> {
    pub fn new(columns: Vec<TableColumn>) -> Self {
        Self {
            columns,
            rows: Mutex::new(Vec::new()),
            changes: AtomicU64::new(0),
            listeners: ListenerList::new(),
        }
    }

    pub fn columns(&self) -> &[TableColumn] {
        &self.columns
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.lock().len()
    }

    fn column_index(&self, column: &TableColumn) -> Result<usize> {
        self.columns
            .iter()
            .position(|candidate| candidate == column)
            .ok_or_else(|| {
                Error::invalid_argument(format!("column {:?} is not in this table", column.label()))
            })
    }

    /// Append a row. Missing trailing cells are empty; extra cells are an error.
    ///
    /// Returns the new row's index.
    pub fn add_row(&self, mut row: Vec<Option<V>>) -> Result<usize> {
        if row.len() > self.columns.len() {
            return Err(Error::invalid_argument(format!(
                "row has {} cells but the table has {} columns",
                row.len(),
                self.columns.len()
            )));
        }
        row.resize(self.columns.len(), None);
        let mut rows = self.rows.lock();
        rows.push(row);
        Ok(rows.len() - 1)
    }

    /// The value at `(row_index, column)`.
    pub fn get_cell_value(&self, row_index: usize, column: &TableColumn) -> Result<Option<V>> {
        let col = self.column_index(column)?;
        let rows = self.rows.lock();
        let row = rows.get(row_index).ok_or(Error::IndexOutOfBounds {
            index: row_index,
            len: rows.len(),
        })?;
        Ok(row[col].clone())
    }

    /// Store `value` at `(row_index, column)` and return the previous value.
    ///
    /// Cell listeners are notified after the lock is released, and only if
    /// the value changed. See [`CellChange::sequence`] for ordering.
    pub fn set_cell_value(
        &self,
        row_index: usize,
        column: &TableColumn,
        value: Option<V>,
    ) -> Result<Option<V>> {
        let col = self.column_index(column)?;
        let (old, sequence) = {
            let mut rows = self.rows.lock();
            let len = rows.len();
            let row = rows
                .get_mut(row_index)
                .ok_or(Error::IndexOutOfBounds { index: row_index, len })?;
            let old = std::mem::replace(&mut row[col], value.clone());
            let sequence = (old != value).then(|| self.changes.fetch_add(1, Ordering::Relaxed));
            (old, sequence)
        };
        tracing::trace!(target: "guise::model", row = row_index, column = column.label(), "cell set");
        if let Some(sequence) = sequence {
            self.listeners.fire(&CellChange {
                cell: Cell::new(row_index, column.clone()),
                old: old.clone(),
                new: value,
                sequence,
            });
        }
        Ok(old)
    }

    /// Run `f` over all rows with the lock held for its whole duration.
    pub fn read<R>(&self, f: impl FnOnce(&[Vec<Option<V>>]) -> R) -> R {
        let rows = self.rows.lock();
        f(&rows)
    }

    /// A consistent copy of every row.
    pub fn rows_snapshot(&self) -> Vec<Vec<Option<V>>> {
        self.rows.lock().clone()
    }

    pub fn add_cell_listener(
        &self,
        listener: impl Fn(&CellChange<V>) + Send + Sync + 'static,
    ) -> ListenerId {
        self.listeners.add(listener)
    }

    pub fn remove_cell_listener(&self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }
}

impl<V: fmt::Debug> fmt::Debug for TableModel<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableModel")
            .field("columns", &self.columns)
            .field("rows", &self.rows.lock().len())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// TableSource
// ---------------------------------------------------------------------------

/// Text view of a table, as depictors read it.
pub trait TableSource: Send + Sync {
    fn column_labels(&self) -> Vec<String>;

    /// Every row as display text, taken under one lock.
    fn rows_text(&self) -> Vec<Vec<String>>;
}

impl<V> TableSource for TableModel<V>
where
    V: Clone + PartialEq + fmt::Display + Send + Sync,
{
    fn column_labels(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.label().to_owned()).collect()
    }

    fn rows_text(&self) -> Vec<Vec<String>> {
        self.read(|rows| {
            rows.iter()
                .map(|row| {
                    row.iter()
                        .map(|cell| cell.as_ref().map(ToString::to_string).unwrap_or_default())
                        .collect()
                })
                .collect()
        })
    }
}

/// Shorthand for a table shared between components and application code.
pub type SharedTable<V> = Arc<TableModel<V>>;
