//! The three chart renderers.
//!
//! Each renderer is a read-only consumer of the shared cleaned series: it
//! derives its own private aggregate, draws one PNG, and leaves the series
//! untouched. They run in a fixed order (line, bar, box) with no
//! interdependency.

pub mod bar;
pub mod boxplot;
pub mod line;
