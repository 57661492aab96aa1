//! # Field System
//!
//! Records are loosely typed rows, so everything the engine knows about them
//! comes from the field declarations of a view definition:
//!
//! - **Specifications**: which fields exist and how they sort ([`FieldSpec`], [`FieldKind`])
//! - **Facets**: which fields are offered as single-select filters ([`FacetSpec`])
//! - **Tabs**: declarative membership predicates for the tabs ([`TabSpec`], [`TabRule`])
//! - **Value coercion**: facet values, search text and sort keys ([`SortKey`])
//!
//! | Kind | Sorts as | Example fields |
//! |------|----------|----------------|
//! | `text` | case-sensitive string | `brand_name`, `appType` |
//! | `number` | numeric | `reg_count`, `id` |
//! | `date` | parsed timestamp | `expiry_date`, `logdate` |

mod rule;
mod spec;
pub mod value;

pub use rule::TabRule;
pub use spec::{FacetSpec, FieldKind, FieldSpec, TabSpec};
pub use value::SortKey;
