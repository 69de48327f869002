//! # Script Host
//!
//! Embeds a QuickJS runtime and exposes a fixed catalogue of native functions
//! (console, file system, hashing, base64, xor, zlib/gzip, JSON and codec
//! hooks) under a single global namespace object.
//!
//! ## Architecture Design
//!
//! - **Bindings**: value marshaling between the script runtime and native types,
//!   plus the uniform dispatch contract every native function follows
//! - **Service**: native collaborators with plain Rust signatures, unaware of scripts
//! - **Scripting**: the binding catalogue and the runtime that installs it
//!
//! ### Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use script_host::config::HostConfig;
//! use script_host::scripting::ScriptingRuntime;
//! use script_host::services::StdShell;
//!
//! let runtime = ScriptingRuntime::new(&HostConfig::default(), Arc::new(StdShell::new()))?;
//! runtime.run_script("Kernel.Console.print(Kernel.Encryption.SHA256.hash('abc'))")?;
//! ```
//!
//! ## Modules
//!
//! - [`bindings`]: Scalar Converter, Resource Guard, Structured Document Converter, Dispatch Contract
//! - [`services`]: Native collaborators
//! - [`scripting`]: Binding catalogue and runtime
//! - [`config`]: Host configuration
//! - [`core`]: Errors, logging and the command-line host

/// Errors, logging and the host entry point
pub mod core;
/// Script ↔ native marshaling and dispatch
pub mod bindings;
/// Configuration system
pub mod config;
/// Native functions and the runtime that installs them
pub mod scripting;
/// Native collaborators
pub mod services;

pub use crate::bindings::{Converter, Document, DocumentMap};
pub use crate::config::HostConfig;
pub use crate::core::{BridgeError, HostError, KernelError};
pub use crate::scripting::{ScriptApi, ScriptingRuntime};
