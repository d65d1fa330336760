/// Data layer: dataset access and the aggregations the charts are drawn from.
///
/// Architecture:
/// ```text
///   arrow RecordBatch
///        │
///        ▼
///   ┌──────────┐
///   │  model    │  Dataset: typed column access, Category cells
///   └──────────┘
///        │
///        ├──────────────┐
///        ▼              ▼
///   ┌──────────┐   ┌───────────┐
///   │  filter   │   │ aggregate │  value counts, crosstabs,
///   └──────────┘   └───────────┘  histogram bins, box stats
///   column lists,
///   row subsets per target level
/// ```

pub mod aggregate;
pub mod filter;
pub mod model;
