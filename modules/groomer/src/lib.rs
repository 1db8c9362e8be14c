pub mod classifier;
pub mod config;
pub mod csv_io;
pub mod extract;
pub mod prompt;
pub mod runner;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;
pub mod ticket;
pub mod verdict;
