//! Read-side views derived from the ledger. All of these are pure
//! recomputations over the ledger's current contents, nothing here is
//! materialized or cached.

pub mod commitment;
pub mod summary;
pub mod yesterday;
