//! Scanners for the human-readable output of the `pear` command.
//!
//! - [`ReportScanner`] turns `pear info` / `pear remote-info` output into a
//!   [`PackageReport`] (name, version, maintainers, licenses, dependencies).
//! - [`parse_channel_list`] turns `pear list-channels` output into
//!   [`ChannelListing`] rows.
//!
//! # Example
//!
//! ```
//! use pearl_report::ReportScanner;
//!
//! let text = "Name                  Archive_Tar\n\
//!             Release Version       1.3.7 (stable)\n\
//!             Required Dependencies Package pear.php.net/PEAR\n\
//!             \x20                     Version 1.5.4 or newer";
//! let report = ReportScanner::parse(text, "pear.php.net").unwrap();
//! assert_eq!(report.version.as_deref(), Some("1.3.7"));
//! assert_eq!(report.required_dependencies[0].full_name(), "pear.php.net/PEAR");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod channels;
pub mod cursor;
pub mod error;
pub mod report;
pub mod scanner;

pub use channels::{ChannelListing, parse_channel_list};
pub use cursor::LineCursor;
pub use error::{Result, StructuralError};
pub use report::{Dependency, License, Maintainer, PackageReport};
pub use scanner::ReportScanner;
