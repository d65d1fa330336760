use std::fmt;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::{cast, cast_with_options, CastOptions};
use arrow::datatypes::{DataType, Float64Type, Int64Type};
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;

use crate::error::{PlotError, Result};

// ---------------------------------------------------------------------------
// Category – a single cell of a categorical column
// ---------------------------------------------------------------------------

/// A dynamically-typed categorical value.
///
/// Ordered like a dataframe group-by key: numbers numerically, text
/// lexicographically. Values of different kinds never meet in one column in
/// practice, the discriminant order only keeps `Ord` total.
#[derive(Debug, Clone, PartialEq)]
pub enum Category {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl Eq for Category {}

impl PartialOrd for Category {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Category {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use Category::*;
        fn discriminant(v: &Category) -> u8 {
            match v {
                Bool(_) => 0,
                Integer(_) => 1,
                Float(_) => 2,
                Text(_) => 3,
            }
        }
        match (self, other) {
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (Text(a), Text(b)) => a.cmp(b),
            _ => discriminant(self).cmp(&discriminant(other)),
        }
    }
}

impl std::hash::Hash for Category {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Category::Text(s) => s.hash(state),
            Category::Integer(i) => i.hash(state),
            Category::Float(f) => f.to_bits().hash(state),
            Category::Bool(b) => b.hash(state),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Text(s) => write!(f, "{s}"),
            Category::Integer(i) => write!(f, "{i}"),
            Category::Float(v) => write!(f, "{v}"),
            Category::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for Category {
    fn from(s: &str) -> Self {
        Category::Text(s.to_string())
    }
}

// ---------------------------------------------------------------------------
// Dataset – a read-only view over one record batch
// ---------------------------------------------------------------------------

/// A table of records with named columns.
///
/// No schema is enforced up front; a column is looked up (and converted) only
/// when an operation asks for it.
#[derive(Debug, Clone)]
pub struct Dataset {
    batch: RecordBatch,
}

impl From<RecordBatch> for Dataset {
    fn from(batch: RecordBatch) -> Self {
        Dataset { batch }
    }
}

impl Dataset {
    /// Build a dataset from `(name, array)` pairs of equal length.
    pub fn try_from_columns<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, ArrayRef)>,
        S: AsRef<str>,
    {
        let batch = RecordBatch::try_from_iter(columns)?;
        Ok(Dataset { batch })
    }

    /// Number of records, nulls included.
    pub fn len(&self) -> usize {
        self.batch.num_rows()
    }

    /// Whether the dataset has no records.
    pub fn is_empty(&self) -> bool {
        self.batch.num_rows() == 0
    }

    /// Ordered column names.
    pub fn column_names(&self) -> Vec<String> {
        self.batch
            .schema()
            .fields()
            .iter()
            .map(|f| f.name().clone())
            .collect()
    }

    pub fn batch(&self) -> &RecordBatch {
        &self.batch
    }

    /// The first `rows` records as a text table.
    pub fn preview(&self, rows: usize) -> Result<String> {
        let head = self.batch.slice(0, rows.min(self.len()));
        Ok(pretty_format_batches(&[head])?.to_string())
    }

    fn column(&self, name: &str) -> Result<&dyn Array> {
        self.batch
            .column_by_name(name)
            .map(|c| c.as_ref())
            .ok_or_else(|| PlotError::ColumnNotFound(name.to_string()))
    }

    /// Read a column as categories, one entry per row (`None` for nulls).
    pub fn categorical(&self, name: &str) -> Result<Vec<Option<Category>>> {
        let col = self.column(name)?;
        let values = match col.data_type() {
            DataType::Boolean => col
                .as_boolean()
                .iter()
                .map(|v| v.map(Category::Bool))
                .collect(),
            DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64 => {
                let ints = cast(col, &DataType::Int64)?;
                ints.as_primitive::<Int64Type>()
                    .iter()
                    .map(|v| v.map(Category::Integer))
                    .collect()
            }
            DataType::Float16 | DataType::Float32 | DataType::Float64 => {
                let floats = cast(col, &DataType::Float64)?;
                floats
                    .as_primitive::<Float64Type>()
                    .iter()
                    .map(|v| v.filter(|x| !x.is_nan()).map(Category::Float))
                    .collect()
            }
            // Strings, dictionaries, dates … anything arrow can print.
            _ => {
                let text = cast(col, &DataType::Utf8)?;
                text.as_string::<i32>()
                    .iter()
                    .map(|v| v.map(|s| Category::Text(s.to_string())))
                    .collect()
            }
        };
        Ok(values)
    }

    /// Read a column as floats, one entry per row (`None` for nulls and NaN).
    ///
    /// Values that cannot be converted are an error rather than silently null.
    pub fn numeric(&self, name: &str) -> Result<Vec<Option<f64>>> {
        let col = self.column(name)?;
        let options = CastOptions {
            safe: false,
            ..Default::default()
        };
        let floats = cast_with_options(col, &DataType::Float64, &options)?;
        Ok(floats
            .as_primitive::<Float64Type>()
            .iter()
            .map(|v| v.filter(|x| !x.is_nan()))
            .collect())
    }
}
