pub mod error;
pub mod impl_fake;
pub mod impl_tract_onnx;
pub mod interface;
pub mod labels;
pub mod models;
pub mod pipeline;
