/// Deterministic synthetic corpus for the container benchmarks.
///
/// A fixed xorshift stream keeps runs comparable; bodies are low-entropy
/// text so the compression benchmarks measure the codec path rather than
/// incompressible-input bailouts.
pub struct XorShift(pub u64);

impl XorShift {
    pub fn next(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
}

/// `entries` byte strings of length < `max_len`.
pub fn string_values(seed: u64, entries: usize, max_len: usize) -> Vec<Vec<u8>> {
    let mut rng = XorShift(seed);
    (0..entries)
        .map(|_| {
            let len = (rng.next() as usize) % max_len;
            let phase = (rng.next() % 26) as u8;
            (0..len).map(|j| b'a' + ((j as u8 / 3 + phase) % 26)).collect()
        })
        .collect()
}

/// `entries` mixed small integers.
pub fn int_values(seed: u64, entries: usize) -> Vec<i64> {
    let mut rng = XorShift(seed);
    (0..entries)
        .map(|_| {
            let v = (rng.next() % 100_000) as i64;
            if rng.next() % 2 == 0 {
                -v
            } else {
                v
            }
        })
        .collect()
}
