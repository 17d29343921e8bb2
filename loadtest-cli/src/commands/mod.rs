//! One module per deployment action.

pub mod delete;
pub mod deploy;
pub mod info;
pub mod logs;
pub mod port_forward;
pub mod probe;
pub mod restart;
pub mod status;
