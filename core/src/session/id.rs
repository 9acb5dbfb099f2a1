use {rand::Rng, std::fmt};

/// Identity of one fetch cycle.
///
/// Cycles are told apart by `seq`, which the controller hands out in
/// increasing order. The random code only makes cycles easy to follow in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CycleId {
    seq: u64,
    code: [u8; 4],
}

impl CycleId {
    pub fn new(seq: u64) -> Self {
        let mut code = [0u8; 4];
        let mut rng = rand::rng();
        for x in code.iter_mut() {
            *x = rng.random_range(b'A'..=b'Z');
        }
        Self { seq, code }
    }

    pub fn seq(self) -> u64 {
        self.seq
    }
}

impl fmt::Display for CycleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = str::from_utf8(&self.code).map_err(|_| fmt::Error)?;
        write!(f, "{code}-{}", self.seq)
    }
}

#[test]
fn test_cycle_id() {
    let id = CycleId::new(7);
    let display = id.to_string();
    let (code, seq) = display.split_once('-').unwrap();
    assert_eq!(code.len(), 4);
    assert!(code.bytes().all(|b| b.is_ascii_uppercase()));
    assert_eq!(seq, "7");
    assert_eq!(id.seq(), 7);

    // Distinct sequence numbers never compare equal, whatever the codes.
    assert_ne!(CycleId::new(1), CycleId::new(2));
}
