pub mod errors;
pub mod pipeline;
pub mod ports;
pub mod use_cases;
