//! Data Processor Library
//!
//! A small library for wrapping user-supplied transformation functions as
//! processing stages.
//!
//! # Architecture
//!
//! This library is intentionally minimal:
//! - [`Data`] is the dynamic value that moves through a stage
//! - [`DataProcessor`] is the single-method contract a stage exposes
//! - [`CustomDataProcessor`] adapts any `Fn(Data) -> Result<Data>` to that contract
//!
//! The library does NOT:
//! - Chain stages or aggregate failures across them
//! - Batch, shuffle or shard values
//! - Catch, wrap or log errors raised by user functions
//!
//! # Example Usage
//!
//! ```
//! use data_processor::{CustomDataProcessor, Data, DataProcessor, ProcessError};
//!
//! // Wrap a user function
//! let lengths = CustomDataProcessor::new(|d: Data| match d.as_str() {
//!     Some(s) => Ok(Data::Int(s.len() as i64)),
//!     None => Err(ProcessError::InvalidData(format!("expected text, got {}", d))),
//! });
//!
//! // Process values one at a time
//! assert_eq!(lengths.process(Data::from("hello")).unwrap(), Data::Int(5));
//!
//! // Or feed a sequence through it
//! for result in lengths.process_iter(vec![Data::from("a"), Data::Int(3)]) {
//!     match result {
//!         Ok(len) => println!("length: {}", len),
//!         Err(e) => eprintln!("Process error: {}", e),
//!     }
//! }
//! ```

// Public modules
pub mod processor;
pub mod types;

// Re-export main types for convenience
pub use processor::{BoxedDataProcessor, CustomDataProcessor, DataProcessor, ProcessedIter};
pub use types::{Data, DataKind, ProcessError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
