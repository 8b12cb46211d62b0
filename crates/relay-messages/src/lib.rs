//! Wire protocol for agent-to-agent messages.
//!
//! Every message travels as a fenced plaintext block with one `KEY: value`
//! field per line:
//!
//! ~~~text
//! ```
//! FROM: CODER
//! TO: USER
//! ACTION: step-started
//! DETAILS: Starting step 2
//! ```
//! ~~~
//!
//! `FROM`, `TO` and `ACTION` are mandatory. The remaining fields depend on the
//! [`Action`], which is a closed set: every action has exactly one
//! [`Template`] that renders it and declares its required fields.
//!
//! # Modules
//!
//! - [`action`] - the enumerated protocol actions
//! - [`field`] - field names used on the wire
//! - [`message`] - the ordered field mapping produced by parsing
//! - [`parser`] - wire text to [`Message`]
//! - [`template`] - [`Message`] to wire text, plus action-name resolution

pub mod action;
pub mod error;
pub mod field;
pub mod message;
pub mod parser;
pub mod template;

pub use action::Action;
pub use error::{Error, Result};
pub use field::Field;
pub use message::Message;
pub use parser::{MessageAssembler, parse, split_messages};
pub use template::{FENCE, Template, resolve};
