//! Small adapters over system facilities.

mod system_clock;

pub use system_clock::SystemClock;
