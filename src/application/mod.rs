pub mod alert;
pub mod features;
pub mod model;
pub mod pipeline;
