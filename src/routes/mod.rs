//! Route handlers. Each takes the raw query or form body and returns an
//! HTML fragment (or JSON / a script for the storage bridge).

pub mod history;
pub mod profiles;
pub mod settings;
pub mod storage;
pub mod util;
pub mod wheel;
