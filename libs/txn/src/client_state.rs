// [libs/txn/src/client_state.rs]
use cube_core_model::Value;
use std::collections::HashMap;
use std::time::Instant;

/// One client's open transaction: the snapshot it has read so far and the
/// writes it intends to apply at commit.
///
/// `writes` keeps the tagged [`Value`] rather than its canonical string so
/// that commit never has to re-parse `"TRUE"`/`"123"`/etc. back into a
/// type — a string value that happens to look like a boolean or integer
/// would otherwise be restored with the wrong tag.
pub(crate) struct ClientState {
    pub(crate) began_at: Instant,
    pub(crate) reads: HashMap<Vec<u8>, Vec<u8>>,
    pub(crate) writes: HashMap<Vec<u8>, Value>,
}

impl ClientState {
    pub(crate) fn new() -> Self {
        Self { began_at: Instant::now(), reads: HashMap::new(), writes: HashMap::new() }
    }
}
