//! Script interpreter for the placement checker.
//!
//! A [`Session`] owns everything a script loads (cell library, device,
//! design) together with the Steiner tree engine and the diagnostic sink.
//! [`run_script`] feeds it one [`Command`] per script line, stopping at the
//! first failure.

#![warn(missing_docs)]

pub mod command;
pub mod error;
pub mod script;
pub mod session;

pub use command::Command;
pub use error::SessionError;
pub use script::{run_script, ScriptOptions, BANNER};
pub use session::{build_flute, resolve_config, Session};
