pub mod predict;
pub mod probe;
pub mod result;

pub mod prelude {
    pub use super::probe::Prober;
    pub use super::report;
    pub use super::result::{ProbeError, ProbeResult, ProbeSuccess};
}

use std::fmt::Write;

/// Render an error with its whole `source()` chain.
pub fn report(mut err: &(dyn std::error::Error + 'static)) -> String {
    let mut s = format!("{}", err);
    while let Some(src) = err.source() {
        let _ = write!(s, "\n\nCaused by: {}", src);
        err = src;
    }
    s
}
