#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let _ = pixprobe::probe_buffer(data);
    let _ = pixprobe::format_of_buffer(data);
    let _ = pixprobe::animated_buffer(data);
});
