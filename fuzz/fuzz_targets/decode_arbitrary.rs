#![no_main]
use libfuzzer_sys::fuzz_target;

use packlist::PackList;

fuzz_target!(|data: &[u8]| {
    // Feed arbitrary bytes through image adoption.  Err results are
    // expected and fine; what we verify is no panics and, on accept, a
    // self-consistent container.
    let Ok(list) = PackList::from_bytes(data.to_vec()) else {
        return;
    };

    // Forward walk agrees with the count field.
    let mut pos = list.head();
    let mut walked = 0u64;
    while pos < list.end() {
        pos = list.next(pos).expect("accepted image must walk forward");
        walked += 1;
    }
    assert_eq!(walked, list.count());

    // Backward walk visits the same number of entries.
    let mut pos = list.end();
    let mut walked = 0u64;
    while let Some(prev) = list.prev(pos) {
        pos = prev;
        walked += 1;
    }
    assert_eq!(walked, list.count());

    // Every entry decodes.
    for _ in list.iter() {}
});
