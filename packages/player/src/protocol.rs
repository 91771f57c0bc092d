//! Editor ↔ player messages
//!
//! Both sides exchange JSON envelopes with a `command` discriminant and
//! an optional `payload`, so either end can dispatch without knowing
//! every message kind.

use parcour_model::ParcourObject;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", content = "payload", rename_all = "lowercase")]
pub enum PlayerMessage {
    /// Editor → player: (re)load the document as a flat object list
    Load(Vec<ParcourObject>),
    /// Player → editor: handshake once the runtime is up
    Ready,
}
