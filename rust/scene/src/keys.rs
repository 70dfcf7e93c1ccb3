// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Handle types for drawables owned by a scene.
//!
//! Keys come from `slotmap::SlotMap`, so a key whose drawable was removed
//! never aliases a later drawable (generational indices).

use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    /// Handle to a drawable registered with a scene.
    pub struct DrawableKey;
}

/// Caller-chosen identity of a user function.
///
/// Closures cannot be compared, so layers fold this id into their
/// fingerprints instead. Give a new id whenever the function changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct FunctionId(pub u64);

impl FunctionId {
    /// Id of the zero height function
    pub const FLAT: FunctionId = FunctionId(0);
}

impl std::fmt::Display for FunctionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "fn#{}", self.0)
    }
}
