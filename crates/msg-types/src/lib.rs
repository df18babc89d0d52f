//! Message data model shared by both Causeway endpoints.

mod hash_lock;
mod intent;
mod status;
pub mod storage;

pub use hash_lock::{HashLock, UnlockSecret};
pub use intent::{compute_message_hash, IntentKind, MessageIntent, MSG_CODEC_VERSION};
pub use status::{MessageEntry, MessageStatus};
