use std::collections::HashSet;
use std::sync::Mutex;

const ALPHABET: &[u8; 36] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
pub const REFERENCE_LEN: usize = 8;

/// The low 62 bits of a v4 uuid are all random.
const RANDOM_BITS: u128 = (1 << 62) - 1;

/// Random 8-character booking reference drawn from `[A-Z0-9]`.
pub fn generate_reference() -> String {
    let mut n = uuid::Uuid::new_v4().as_u128() & RANDOM_BITS;
    (0..REFERENCE_LEN)
        .map(|_| {
            let c = ALPHABET[(n % 36) as usize] as char;
            n /= 36;
            c
        })
        .collect()
}

pub fn is_valid_reference(s: &str) -> bool {
    s.len() == REFERENCE_LEN && s.bytes().all(|b| ALPHABET.contains(&b))
}

/// Hands out references that have not been issued before in this process.
#[derive(Default)]
pub struct ReferenceIssuer {
    issued: Mutex<HashSet<String>>,
}

impl ReferenceIssuer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> String {
        let mut issued = self.issued.lock().unwrap_or_else(|e| e.into_inner());
        loop {
            let reference = generate_reference();
            if issued.insert(reference.clone()) {
                return reference;
            }
            tracing::debug!(reference = %reference, "reference collision, regenerating");
        }
    }

    pub fn issued_count(&self) -> usize {
        self.issued.lock().map(|s| s.len()).unwrap_or(0)
    }
}
