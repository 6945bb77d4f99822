//! unitr-core: SI prefixed unit algebra
//!
//! Units are values: prefixed atomic terms (`nN`, `ms`, `h`), canonical
//! products of terms (`(kg m)`), and rational forms (`µm/V`). They can be
//! multiplied, divided, raised to integer powers, compared for
//! compatibility by dimension name, and re-prefixed so a value reads
//! naturally. The crate has no I/O and no global mutable state.
//!
//! # Example
//!
//! ```
//! use unitr_core::{PrefixedUnit, SiPrefix, UnitExpression};
//!
//! let force: UnitExpression = "5000 nN".parse().unwrap();
//! assert_eq!(force.derive_simple_form().to_string(), "5 µN");
//!
//! let n = PrefixedUnit::simple("N", SiPrefix::Empty);
//! let m = PrefixedUnit::simple("m", SiPrefix::Empty);
//! assert_eq!(n.divide(&m).simplify().to_string(), "N/m");
//!
//! // Adding lengths converts into the left operand's unit
//! let a: UnitExpression = "1 km".parse().unwrap();
//! let b: UnitExpression = "250 m".parse().unwrap();
//! assert_eq!(a.add(&b).unwrap().to_string(), "1.25 km");
//! ```

pub mod composition;
pub mod dimension;
pub mod error;
pub mod format;
pub mod parser;
pub mod prefix;
pub mod types;

pub use dimension::{DimensionElement, DimensionVector};
pub use error::{Direction, Result, UnitError};
pub use format::{format_number, FormatOptions};
pub use parser::{parse_expression, parse_unit};
pub use prefix::SiPrefix;
pub use types::{
    CompositeUnit, PrefixedUnit, RationalUnit, SimpleUnit, TimeUnit, UnitExpression, UnitTerm,
    MAX_TERM_EXPONENT,
};
