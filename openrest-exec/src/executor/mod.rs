mod bound;
mod cancel;
mod dispatch;
pub mod http;
mod request;
mod response;
mod rest_steps;
mod source;
mod state;

pub use bound::{BoundOperation, BoundParameter};
pub use cancel::{CancelHandle, CancelSignal};
pub use http::{
    HttpClient, HttpClientFactory, HttpError, ReqwestClientFactory, ReqwestHttpClient,
    RestResponse,
};
pub use request::{primitive_text, RequestParameter, RestRequest};
pub use response::{body_text, ResultConverter};
pub use rest_steps::{RestStep, RestStepKind};
pub use source::{source_from_text, LiteralSource, TemplateSource, ValueSource, VariableSource};
pub use state::RuntimeState;
