//! Helpers of the preferences dialog that don't depend on any toolkit:
//! the external mixer command and the shipped icon themes.

pub mod cmd;
pub mod themes;
