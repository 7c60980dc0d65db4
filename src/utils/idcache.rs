//! Memoized uid → user name lookup, used while rendering.

use log::debug;
use nix::unistd::{Uid, User};
use std::collections::HashMap;

/// One run's uid → name cache. Unknown uids resolve to their decimal form.
#[derive(Debug, Default)]
pub struct UserCache {
    names: HashMap<u32, String>,
}

impl UserCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name for `uid`, looked up once and remembered.
    pub fn name_of(&mut self, uid: u32) -> &str {
        self.names
            .entry(uid)
            .or_insert_with(|| lookup_user_name(uid).unwrap_or_else(|| uid.to_string()))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Query the password database. `None` when the uid has no entry or the lookup fails.
fn lookup_user_name(uid: u32) -> Option<String> {
    match User::from_uid(Uid::from_raw(uid)) {
        Ok(user) => user.map(|u| u.name),
        Err(e) => {
            debug!("user lookup for uid {}: {}", uid, e);
            None
        }
    }
}
