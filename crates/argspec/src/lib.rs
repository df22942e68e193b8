//! Declarative argument parsing and help rendering.
//!
//! Register positional parameters and named options on a [`SpecBuilder`],
//! freeze it into a [`Spec`], then hand raw argv tokens to [`Spec::parse`].
//! Parsing never fails: bad input is reported through [`Matches::errors`].
//!
//! ```
//! use argspec::Spec;
//!
//! let spec = Spec::builder()
//!     .parameter("src", "Source file")
//!     .value_option("o", "out", "FILE", "Output file")?
//!     .switch_option("v", "verbose", "Chatty output")?
//!     .build();
//!
//! let m = spec.parse(&["-v", "in.txt", "--out=out.txt"]);
//! assert!(m.is_ok());
//! assert_eq!(m.value("src"), Some("in.txt"));
//! assert_eq!(m.value("out"), Some("out.txt"));
//! assert!(m.is_on("verbose"));
//! assert_eq!(spec.arg_string(), "[options] <src>");
//! # Ok::<(), argspec::SpecError>(())
//! ```

pub mod error;
pub mod format;
pub mod parse;
pub mod spec;
pub mod token;

pub use error::{ArgError, SpecError};
pub use format::{LINE_ENDING, MAX_ROW_LENGTH, tabularize, wrap_line};
pub use parse::{Matches, Value};
pub use spec::{OptionSpec, Parameter, ParameterKind, Spec, SpecBuilder};
