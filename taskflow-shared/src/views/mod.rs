/// Client data-shaping
///
/// Pure functions over a fetched task list, mirroring what the web client
/// computes to drive its views:
///
/// - `filter`: status/priority/search filtering and due-date/priority/title
///   sorting for the list view
/// - `calendar`: the 42-cell month grid for the calendar view
/// - `score`: the productivity percentage shown on the analytics view
///
/// Nothing here touches the database; everything is deterministic and
/// unit-testable.
pub mod calendar;
pub mod filter;
pub mod score;

pub use calendar::{month_grid, CalendarDay, GRID_CELLS};
pub use filter::{filter_and_sort, SortKey, TaskQuery};
pub use score::productivity_score;
