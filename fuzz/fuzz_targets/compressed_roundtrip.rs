#![no_main]
use libfuzzer_sys::fuzz_target;

use std::borrow::Cow;

use packlist::{CompressedList, Endpoint, PackList, Value};

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes through compressed-image adoption: no panics, and
    // accepted images either decompress to a valid container or report
    // Corrupt.
    if let Ok(z) = CompressedList::from_bytes(data.to_vec()) {
        let _ = z.decompress();
    }

    // Chunk the input into entries; whenever the wrapper accepts the
    // container, the round trip must be byte-exact.
    let mut list = PackList::new();
    for chunk in data.chunks(17) {
        let _ = list.push(&Value::Bytes(Cow::Borrowed(chunk)), Endpoint::Tail);
    }
    if let Ok(z) = list.compress() {
        let back = z.decompress().expect("own compressed image must expand");
        assert_eq!(back.as_bytes(), list.as_bytes());
    }
});
