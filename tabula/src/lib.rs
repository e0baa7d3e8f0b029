//! Data table engine
//!
//! Turns a row collection plus query, sort, page and selection state into
//! the exact rows a data table displays:
//!
//! 1. **filter** keeps rows whose text contains the query in any column
//! 2. **sort** orders them stably by one column
//! 3. **paginate** slices out the requested page
//!
//! Selection is tracked by row identity beside the pipeline, so it survives
//! every filter, sort and page change. [`DataTable`] is the host-facing
//! surface tying these together.

pub mod column;
pub mod config;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod selection;
pub mod state;
pub mod table;

pub use column::Column;
pub use config::TableConfig;
pub use error::{ConfigError, TableError};
pub use pipeline::{Comparison, DerivedView, SortDirection};
pub use selection::{PageSelection, PageToggle, Selection, SelectionMode};
pub use state::EngineState;
pub use table::{
    DataTable, DataTableBuilder, PageInfo, SelectionChanged, SortIndicator, SubscriptionId, TableId,
};

pub mod prelude {
    pub use crate::column::Column;
    pub use crate::config::TableConfig;
    pub use crate::model::{Record, RowId, RowIdentity, TableRow, Value};
    pub use crate::pipeline::{Comparison, SortDirection};
    pub use crate::selection::{PageSelection, PageToggle, SelectionMode};
    pub use crate::table::{DataTable, SelectionChanged, SortIndicator};
}
