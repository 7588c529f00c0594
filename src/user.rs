use tracing::debug;

use crate::source::{self, ProcSource};

// Columns of a passwd(5) row.
const NAME: usize = 0;
const UID: usize = 2;

/// Represents an account from the system identity mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: u32,
    pub name: String,
}

impl User {
    pub fn new(id: u32, name: &str) -> Self {
        User {
            id,
            name: name.to_string(),
        }
    }

    /// Parses one `name:password:uid:gid:...` row; `None` for comments or
    /// rows without a numeric uid.
    pub fn from_passwd_line(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }
        let columns: Vec<&str> = line.split(':').collect();
        let name = columns.get(NAME).filter(|n| !n.is_empty())?;
        let id = columns.get(UID)?.parse().ok()?;
        Some(User::new(id, name))
    }
}

/// First account in `passwd` whose uid is `uid`.
pub fn find_in_passwd(passwd: &str, uid: u32) -> Option<User> {
    passwd
        .lines()
        .filter_map(User::from_passwd_line)
        .find(|user| user.id == uid)
}

/// Resolves `uid` through the source's identity mapping.
///
/// The mapping is re-read on every call; accounts can change while we run.
pub fn lookup(source: &ProcSource, uid: u32) -> Option<User> {
    let passwd = source::absorb(source.read_passwd())?;
    let user = find_in_passwd(&passwd, uid);
    if user.is_none() {
        debug!("No passwd entry for uid {}", uid);
    }
    user
}
