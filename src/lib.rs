//! # PeriodQuiz Control Library
//!
//! This library provides the screen state machine behind a live PeriodQuiz
//! event. An admin advances a single per-event control row through the
//! quiz screens; the library validates each step against the transition
//! rules, resolves which period and question come next, records question
//! display windows, commits the change against the version it read, and
//! announces it to viewers.

#![cfg_attr(all(coverage_nightly, test), feature(coverage_attribute))]
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]

pub mod advancer;
pub mod constants;
pub mod error;
pub mod handlers;
pub mod ids;
pub mod model;
pub mod notify;
pub mod resolver;
pub mod screen;
pub mod session;
pub mod store;

pub use advancer::{Advancer, ControlView};
pub use error::{ActionResult, Error, Result};
pub use screen::Screen;
