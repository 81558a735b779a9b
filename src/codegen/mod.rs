pub mod stub;

pub use stub::{generate_stub, inject_stub};
