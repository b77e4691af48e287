#![no_main]

use libfuzzer_sys::fuzz_target;
use stake_ledger::LedgerParams;

fuzz_target!(|data: &[u8]| {
    // Whatever parses must also validate.
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(params) = LedgerParams::from_toml_str(text) {
            assert!(params.validate().is_ok());
        }
    }
});
