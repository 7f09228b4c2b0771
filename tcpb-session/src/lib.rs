pub mod constants;
pub mod defaults;
pub mod driver;
pub mod initialization;
pub mod interface;
pub mod status;

pub use driver::Driver;
pub use initialization::{Frame, GlobalTreatment, SessionConfiguration, SystemData};
pub use interface::{ComputeResult, TcpbInterface};
pub use status::{interpret_status, CallSite, SessionError};
