//! Resource Guard
//!
//! Strings borrowed from the script heap for the duration of one native call.
//! A [`BorrowedStr`] keeps its runtime reference alive until it is dropped or
//! explicitly released, and it cannot outlive the [`CallScope`] that created
//! it. Release happens exactly once because it is tied to ownership.

use std::cell::Cell;
use std::ops::Deref;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use rquickjs::Value;

use super::scalar;
use crate::core::BridgeResult;

/// Running totals of borrowed handles across every call made through one set
/// of host services.
#[derive(Debug, Default)]
pub struct GuardLedger {
    acquired: AtomicU64,
    released: AtomicU64,
}

impl GuardLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn acquired(&self) -> u64 {
        self.acquired.load(Ordering::Acquire)
    }

    pub fn released(&self) -> u64 {
        self.released.load(Ordering::Acquire)
    }

    /// Handles acquired but not yet released. Zero between calls.
    ///
    /// The two totals are read separately, so the count is exact only while no
    /// call is in flight. With runtimes on several threads sharing one ledger a
    /// concurrent read can see a transient non-zero value.
    pub fn outstanding(&self) -> u64 {
        self.acquired().saturating_sub(self.released())
    }
}

/// Owner of every borrow made during a single native call.
pub struct CallScope<'l> {
    ledger: &'l GuardLedger,
    open: Cell<usize>,
}

impl<'l> CallScope<'l> {
    pub fn new(ledger: &'l GuardLedger) -> Self {
        Self {
            ledger,
            open: Cell::new(0),
        }
    }

    /// Borrows open in this scope right now.
    pub fn open(&self) -> usize {
        self.open.get()
    }

    /// Borrows the text of a script string. `position` is the 1-based
    /// parameter position reported on a type mismatch.
    pub fn borrow_str<'js>(
        &self,
        value: &Value<'js>,
        position: usize,
    ) -> BridgeResult<BorrowedStr<'js, '_>> {
        let handle = scalar::expect_string(value, position)?;
        let text = handle.to_string()?;
        self.open.set(self.open.get() + 1);
        self.ledger.acquired.fetch_add(1, Ordering::AcqRel);
        Ok(BorrowedStr {
            handle,
            text,
            scope: self,
        })
    }
}

/// Call-scoped view of a script string.
pub struct BorrowedStr<'js, 's> {
    handle: rquickjs::String<'js>,
    text: String,
    scope: &'s CallScope<'s>,
}

impl<'js, 's> BorrowedStr<'js, 's> {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn as_path(&self) -> &Path {
        Path::new(&self.text)
    }

    /// The runtime string this view was taken from.
    pub fn handle(&self) -> &rquickjs::String<'js> {
        &self.handle
    }

    /// Releases the borrow now instead of at the end of the call.
    pub fn release(self) {}
}

impl Deref for BorrowedStr<'_, '_> {
    type Target = str;

    fn deref(&self) -> &str {
        &self.text
    }
}

impl AsRef<Path> for BorrowedStr<'_, '_> {
    fn as_ref(&self) -> &Path {
        self.as_path()
    }
}

impl Drop for BorrowedStr<'_, '_> {
    fn drop(&mut self) {
        self.scope.open.set(self.scope.open.get() - 1);
        self.scope.ledger.released.fetch_add(1, Ordering::AcqRel);
    }
}
