#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_doc_code_examples)]
#![warn(clippy::missing_docs_in_private_items)]
#![doc = include_str!("../README.md")]

mod adapter;
mod errors;
mod field;
mod reducer;
mod tensor;

pub use adapter::{
    decode_cell_data, encode_cell_data, CellDataSink, ColorMapController, StepInput, StepReport,
    StressSource, TextCellData,
};
pub use errors::{AggregationError, CellDataError, DegenerateCell, LayoutError};
pub use field::{Aggregation, DisplayBuffer, FieldAggregator, QuadLayout};
pub use reducer::von_mises;
pub use tensor::{sample, TensorSample};
