//! devkit - Developer Toolbox
//!
//! Small converters for everyday development chores.
//!
//! # Architecture
//!
//! - [`core`] - Naming convention engine, timestamp converter, batch splitting, histories
//! - [`config`] - Configuration persistence
//! - [`utils`] - Utility functions (XDG directories, atomic writes, etc.)
//!
//! # Naming conventions
//!
//! ```
//! use devkit::{NamingConvention, convert_all, detect};
//!
//! assert_eq!(detect("user_name"), NamingConvention::SnakeCase);
//! let all = convert_all("user_name");
//! assert_eq!(all[&NamingConvention::CamelCase], "userName");
//! assert_eq!(all[&NamingConvention::UpperSnakeCase], "USER_NAME");
//! ```

// Allow pedantic clippy warnings that are not worth fixing for this codebase
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::missing_errors_doc)]

pub mod config;
pub mod core;
pub mod utils;

// Re-export commonly used types
pub use core::error::{Error, Result};
pub use core::naming::{NamingConvention, convert, convert_all, detect, tokenize};
pub use core::timestamp::{TimestampError, TimestampUnit};
