// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Scoped host transactions.

use std::ops::{Deref, DerefMut};

use room_envelope_core::Result;

use crate::host::HostDocument;

/// An open host transaction.
///
/// Dereferences to the document so mutations read naturally. Dropping the
/// guard without a successful [`commit`](Transaction::commit) rolls back.
pub struct Transaction<'a, D: HostDocument + ?Sized> {
    doc: &'a mut D,
    label: String,
    finished: bool,
}

impl<'a, D: HostDocument + ?Sized> Transaction<'a, D> {
    pub fn start(doc: &'a mut D, label: &str) -> Result<Self> {
        doc.begin_transaction(label)?;
        tracing::trace!(label, "transaction started");
        Ok(Self {
            doc,
            label: label.to_string(),
            finished: false,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn commit(mut self) -> Result<()> {
        self.doc.commit()?;
        self.finished = true;
        tracing::trace!(label = %self.label, "transaction committed");
        Ok(())
    }

    pub fn rollback(mut self) -> Result<()> {
        self.finished = true;
        self.doc.rollback()
    }
}

impl<D: HostDocument + ?Sized> Deref for Transaction<'_, D> {
    type Target = D;

    fn deref(&self) -> &D {
        &*self.doc
    }
}

impl<D: HostDocument + ?Sized> DerefMut for Transaction<'_, D> {
    fn deref_mut(&mut self) -> &mut D {
        &mut *self.doc
    }
}

impl<D: HostDocument + ?Sized> Drop for Transaction<'_, D> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        match self.doc.rollback() {
            Ok(()) => tracing::warn!(label = %self.label, "transaction rolled back"),
            Err(e) => tracing::error!(label = %self.label, error = %e, "rollback failed"),
        }
    }
}
