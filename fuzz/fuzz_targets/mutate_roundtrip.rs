#![no_main]
use libfuzzer_sys::fuzz_target;

use std::borrow::Cow;

use packlist::{Endpoint, PackList, Value};

// Drive the mutation engine with an op stream decoded from the fuzz
// input.  Whatever the sequence, no operation may panic and the image
// must stay adoptable via from_bytes after every step.
fuzz_target!(|data: &[u8]| {
    let mut list = PackList::new();
    let mut bytes = data.iter().copied();

    while let Some(op) = bytes.next() {
        let arg = bytes.next().unwrap_or(0);
        match op % 7 {
            0 => {
                let body: Vec<u8> = (&mut bytes).take(arg as usize % 80).collect();
                let _ = list.push(&Value::Bytes(Cow::Owned(body)), Endpoint::Tail);
            }
            1 => {
                let _ = list.push(&Value::Signed(arg as i64 - 128), Endpoint::Head);
            }
            2 => {
                if let Some(pos) = list.index(arg as i64 % 32 - 16) {
                    let _ = list.insert(pos, &Value::Unsigned(arg as u64));
                }
            }
            3 => {
                if let Some(pos) = list.index(arg as i64 % 32 - 16) {
                    let _ = list.replace(pos, &Value::from("replacement"));
                }
            }
            4 => {
                if let Some(pos) = list.index(arg as i64 % 32 - 16) {
                    let _ = list.delete(pos, 1 + arg as usize % 4, arg % 2 == 0);
                }
            }
            5 => {
                if let (Some(dst), Some(src)) = (
                    list.index(arg as i64 % 16),
                    list.index((arg / 16) as i64 % 16),
                ) {
                    let _ = list.insert_from(dst, src);
                }
            }
            _ => {
                let _ = list.split_range(arg as i64 % 8, 1 + arg as usize % 3);
            }
        }
        assert!(
            PackList::from_bytes(list.as_bytes().to_vec()).is_ok(),
            "mutation left an invalid image"
        );
    }
});
