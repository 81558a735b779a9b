pub mod errors;
pub mod types;

pub use errors::{Error, Result};
pub use types::{
    title_case, Analysis, ModelFamily, Output, OutputKind, Parameter, ParameterKind,
};
