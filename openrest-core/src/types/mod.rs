mod operation;
mod output;
mod parameter;
mod value_type;
mod verb;

pub use operation::OperationMetadata;
pub use output::{ExpectedOutput, ResultShape, StepOutput};
pub use parameter::{ParameterKind, ParameterLocation, ParameterSpec, BODY_PARAMETER_NAME};
pub use value_type::ValueType;
pub use verb::HttpVerb;
