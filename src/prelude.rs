pub use crate::base::{
    config::Config,
    event_log::EventLog,
    types::{Err, Res, Void},
};
pub use anyhow::anyhow;
pub use tracing::{debug, error, info, instrument, warn};
