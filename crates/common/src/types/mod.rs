use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Fixed confirmation payload, e.g. `{"message":"DELETED"}`.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub message: &'static str,
}

impl Message {
    pub const DELETED: &'static str = "DELETED";

    pub fn deleted() -> Self {
        Self { message: Self::DELETED }
    }
}
