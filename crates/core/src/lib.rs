pub mod error;
pub mod form;
pub mod handler;
pub mod invocation;
pub mod params;
pub mod request;
pub mod response;
pub mod value;

pub use error::{FormError, SlashError};
pub use handler::{handle, process, respond};
pub use invocation::Invocation;
pub use params::{Params, extract};
pub use request::{Envelope, RequestBody, SlashCommandRequest, decode_event};
pub use response::{IN_CHANNEL, LINES_GREETING, MAPPING_GREETING, SlackResponse, build_response};
pub use value::ParamValue;
