//! Language Binding Layer (FFI)
//!
//! The marshaling and dispatch bridge between the QuickJS runtime and the
//! native collaborators in [`crate::services`].
//!
//! Architecture:
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  Script (QuickJS context)                   │
//! │          Kernel.Encryption.SHA256.hash("text")              │
//! │                          │                                  │
//! │                          v                                  │
//! │  ┌─────────────────────────────────────────────────────┐   │
//! │  │   Installation (js)  ->  Dispatch Contract          │   │
//! │  │   arity check, argument extraction, error throw     │   │
//! │  └───────────┬──────────────────────────┬──────────────┘   │
//! │              │                          │                   │
//! │              v                          v                   │
//! │  ┌───────────────────────┐  ┌──────────────────────────┐   │
//! │  │ Scalar Converter      │  │ Document Converter       │   │
//! │  │ + Resource Guard      │  │ (script tree <-> Document)│  │
//! │  └───────────┬───────────┘  └────────────┬─────────────┘   │
//! │              └────────────┬──────────────┘                  │
//! │                           v                                 │
//! │  ┌─────────────────────────────────────────────────────┐   │
//! │  │        Collaborators (files, crypto, codecs, ...)   │   │
//! │  └─────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod convert;
pub mod document;
pub mod guard;
pub mod js;
pub mod protocol;
pub mod scalar;

#[cfg(test)]
mod property_tests;

pub use convert::Converter;
pub use document::{Document, DocumentMap};
pub use guard::{BorrowedStr, CallScope, GuardLedger};
pub use protocol::{dispatch, invoke, Arity, Binding, Call, NativeFn};
pub use scalar::ScriptTag;
