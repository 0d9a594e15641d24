use crate::core::column::Column;
use crate::core::cosmology::Cosmology;
use crate::error::Result;
use arrow::array::{ArrayRef, Float64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::{RecordBatch, RecordBatchOptions};
use ndarray::{Array2, ArrayView1, Axis};
use std::sync::Arc;

/// Identifies which mock file a table was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Realization {
    pub cosmology: Cosmology,
    pub nbody: u32,
    pub hod: u32,
}

/// Row-major galaxy table: one row per galaxy, one column per requested field.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogTable {
    realization: Realization,
    columns: Vec<Column>,
    data: Array2<f64>,
}

impl CatalogTable {
    /// `data` must have one column per entry of `columns`.
    pub(crate) fn new(realization: Realization, columns: Vec<Column>, data: Array2<f64>) -> Self {
        debug_assert_eq!(columns.len(), data.ncols());
        Self {
            realization,
            columns,
            data,
        }
    }

    pub fn realization(&self) -> Realization {
        self.realization
    }

    pub fn cosmology(&self) -> Cosmology {
        self.realization.cosmology
    }

    pub fn nbody(&self) -> u32 {
        self.realization.nbody
    }

    pub fn hod(&self) -> u32 {
        self.realization.hod
    }

    pub fn num_rows(&self) -> usize {
        self.data.nrows()
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&'static str> {
        self.columns.iter().map(Column::name).collect()
    }

    /// First column matching `column`, if it was requested.
    pub fn column(&self, column: Column) -> Option<ArrayView1<'_, f64>> {
        let idx = self.columns.iter().position(|c| *c == column)?;
        Some(self.data.index_axis(Axis(1), idx))
    }

    pub fn data(&self) -> &Array2<f64> {
        &self.data
    }

    pub fn into_data(self) -> Array2<f64> {
        self.data
    }

    /// Convert to an Arrow batch with one non-nullable Float64 field per column.
    pub fn to_record_batch(&self) -> Result<RecordBatch> {
        let fields: Vec<Field> = self
            .columns
            .iter()
            .map(|c| Field::new(c.name(), DataType::Float64, false))
            .collect();
        let arrays: Vec<ArrayRef> = self
            .data
            .axis_iter(Axis(1))
            .map(|col| Arc::new(Float64Array::from_iter_values(col.iter().copied())) as ArrayRef)
            .collect();

        let schema = Arc::new(Schema::new(fields));
        // Row count is explicit so a table with no columns keeps its length.
        let options = RecordBatchOptions::new().with_row_count(Some(self.num_rows()));
        Ok(RecordBatch::try_new_with_options(schema, arrays, &options)?)
    }
}

/// Result of a read: a bare table for a single realization pair, otherwise
/// one table per pair in (nbody, hod) iteration order.
#[derive(Debug, Clone, PartialEq)]
pub enum Catalogs {
    Single(CatalogTable),
    Many(Vec<CatalogTable>),
}

impl Catalogs {
    pub(crate) fn from_tables(mut tables: Vec<CatalogTable>) -> Self {
        if tables.len() == 1 {
            if let Some(table) = tables.pop() {
                return Catalogs::Single(table);
            }
        }
        Catalogs::Many(tables)
    }

    pub fn len(&self) -> usize {
        match self {
            Catalogs::Single(_) => 1,
            Catalogs::Many(tables) => tables.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_single(&self) -> bool {
        matches!(self, Catalogs::Single(_))
    }

    pub fn single(self) -> Option<CatalogTable> {
        match self {
            Catalogs::Single(table) => Some(table),
            Catalogs::Many(_) => None,
        }
    }

    pub fn into_vec(self) -> Vec<CatalogTable> {
        match self {
            Catalogs::Single(table) => vec![table],
            Catalogs::Many(tables) => tables,
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CatalogTable> {
        match self {
            Catalogs::Single(table) => std::slice::from_ref(table).iter(),
            Catalogs::Many(tables) => tables.iter(),
        }
    }
}

impl IntoIterator for Catalogs {
    type Item = CatalogTable;
    type IntoIter = std::vec::IntoIter<CatalogTable>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_vec().into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::Array;
    use ndarray::array;

    fn table(nbody: u32) -> CatalogTable {
        CatalogTable::new(
            Realization {
                cosmology: Cosmology::Fiducial,
                nbody,
                hod: 0,
            },
            vec![Column::Z, Column::MHalo],
            array![[1.0, 1e13], [2.0, 2e13], [3.0, 3e13]],
        )
    }

    #[test]
    fn test_column_lookup() {
        let t = table(0);
        assert_eq!(t.shape(), (3, 2));
        assert_eq!(t.column_names(), vec!["z", "m_halo"]);
        assert_eq!(t.column(Column::MHalo).unwrap().to_vec(), vec![1e13, 2e13, 3e13]);
        assert!(t.column(Column::X).is_none());
    }

    #[test]
    fn test_record_batch() {
        let batch = table(0).to_record_batch().unwrap();
        assert_eq!(batch.num_rows(), 3);
        assert_eq!(batch.num_columns(), 2);
        assert_eq!(batch.schema().field(1).name(), "m_halo");
        let z = batch
            .column(0)
            .as_any()
            .downcast_ref::<Float64Array>()
            .unwrap();
        assert_eq!(z.value(2), 3.0);
    }

    #[test]
    fn test_record_batch_without_columns() {
        let t = CatalogTable::new(
            Realization {
                cosmology: Cosmology::HM,
                nbody: 0,
                hod: 0,
            },
            Vec::new(),
            Array2::zeros((5, 0)),
        );
        let batch = t.to_record_batch().unwrap();
        assert_eq!(batch.num_columns(), 0);
        assert_eq!(batch.num_rows(), 5);
    }

    #[test]
    fn test_single_vs_many() {
        let one = Catalogs::from_tables(vec![table(0)]);
        assert!(one.is_single());
        assert_eq!(one.len(), 1);

        let many = Catalogs::from_tables(vec![table(0), table(1)]);
        assert!(!many.is_single());
        assert_eq!(many.iter().map(|t| t.nbody()).collect::<Vec<_>>(), vec![0, 1]);
        assert!(many.single().is_none());
    }
}
