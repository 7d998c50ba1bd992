//! Change events derived from notify notifications

use notify::event::ModifyKind;
use notify::EventKind;
use std::fmt;
use std::ops::BitOr;
use std::path::PathBuf;

/// Operation bits carried by a change event.
///
/// Create and write are independent: one event may carry both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChangeOp(u8);

impl ChangeOp {
    /// Neither create nor write (rename, remove, chmod, access, ...)
    pub const OTHER: Self = Self(0);
    pub const CREATE: Self = Self(1);
    pub const WRITE: Self = Self(1 << 1);

    /// True when every bit of `other` is set
    pub fn contains(self, other: Self) -> bool {
        other.0 != 0 && self.0 & other.0 == other.0
    }

    pub fn is_other(self) -> bool {
        self.0 == 0
    }

    /// Map a notify event kind onto create/write bits
    pub fn from_kind(kind: &EventKind) -> Self {
        match kind {
            EventKind::Create(_) => Self::CREATE,
            EventKind::Modify(ModifyKind::Data(_)) | EventKind::Modify(ModifyKind::Any) => {
                Self::WRITE
            }
            // Backend could not classify the change
            EventKind::Any => Self::CREATE | Self::WRITE,
            _ => Self::OTHER,
        }
    }
}

impl BitOr for ChangeOp {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl fmt::Display for ChangeOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.contains(Self::CREATE), self.contains(Self::WRITE)) {
            (true, true) => f.write_str("CREATE|WRITE"),
            (true, false) => f.write_str("CREATE"),
            (false, true) => f.write_str("WRITE"),
            (false, false) => f.write_str("OTHER"),
        }
    }
}

/// An (operation, path) pair handed to the reconciler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub op: ChangeOp,
    pub path: PathBuf,
}

impl ChangeEvent {
    pub fn new(op: ChangeOp, path: impl Into<PathBuf>) -> Self {
        Self {
            op,
            path: path.into(),
        }
    }

    /// Split a notify event into one change event per affected path
    pub fn from_notify(event: notify::Event) -> Vec<Self> {
        let op = ChangeOp::from_kind(&event.kind);
        event
            .paths
            .into_iter()
            .map(|path| Self::new(op, path))
            .collect()
    }
}
