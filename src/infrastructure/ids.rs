use crate::domain::ids::{IdGenerator, IdKind};
use std::sync::atomic::{AtomicU64, Ordering};

const SUFFIX_LEN: usize = 9;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Prefix plus nine random base-36 characters, e.g. `p_k3j9x0q2a`.
#[derive(Debug, Default, Clone)]
pub struct RandomIdGenerator;

impl RandomIdGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl IdGenerator for RandomIdGenerator {
    fn next_id(&self, kind: IdKind) -> String {
        let mut id = String::with_capacity(kind.prefix().len() + SUFFIX_LEN);
        id.push_str(kind.prefix());
        for _ in 0..SUFFIX_LEN {
            id.push(BASE36[fastrand::usize(..BASE36.len())] as char);
        }
        id
    }
}

/// Monotonic counter shared by all kinds: `u_1`, `f_2`, `p_3`, ...
#[derive(Debug, Default)]
pub struct SequentialIdGenerator {
    counter: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self, kind: IdKind) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{}{}", kind.prefix(), n)
    }
}
