pub mod error;
pub mod freetext;
pub mod lookup;
pub mod resolver;

pub use error::{ResolveError, Result};
pub use freetext::{ParsedVariable, TokenRule, parse_geography_list, parse_variable_list};
pub use lookup::lookup_dataset;
pub use resolver::resolve;
