#![no_main]

use efatura::core::{CurrencyTable, LayoutMode};
use libfuzzer_sys::fuzz_target;
use rust_decimal_macros::dec;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let rates = CurrencyTable::new().with_rate("TRY", dec!(1)).with_rate("USD", dec!(32.5));
        for mode in [LayoutMode::PurchaseList, LayoutMode::Sales] {
            // Errors are fine, panics are bugs.
            let _ = efatura::ubl::extract_invoice_lines(s, mode, Some(&rates));
        }
    }
});
