//! Convert UBL-TR e-invoices into an Excel workbook.
//!
//! ```text
//! cargo run --example convert -- <list|summary|sales> <out.xlsx> <invoice.xml>... [USD=32.5 ...]
//! ```
//!
//! Arguments of the form `CODE=RATE` populate the currency table used by the
//! sales layout. Set `RUST_LOG=efatura=debug` for per-invoice logging.

use std::fs::File;
use std::io::BufReader;
use std::process::ExitCode;
use std::str::FromStr;

use efatura::core::*;
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [layout, output, rest @ ..] = args.as_slice() else {
        eprintln!("usage: convert <list|summary|sales> <out.xlsx> <invoice.xml>... [CODE=RATE ...]");
        return ExitCode::FAILURE;
    };

    let layout = match layout.as_str() {
        "list" => LayoutMode::PurchaseList,
        "summary" => LayoutMode::PurchaseSummary,
        "sales" => LayoutMode::Sales,
        other => {
            eprintln!("unknown layout '{other}'");
            return ExitCode::FAILURE;
        }
    };

    let mut rates = CurrencyTable::new().with_rate("TRY", Decimal::ONE);
    let mut paths = Vec::new();
    for arg in rest {
        match arg.split_once('=') {
            Some((code, rate)) => match Decimal::from_str(rate) {
                Ok(rate) => {
                    rates.insert(code, rate);
                }
                Err(e) => {
                    eprintln!("invalid rate for {code}: {e}");
                    return ExitCode::FAILURE;
                }
            },
            None => paths.push(arg),
        }
    }

    let mut sources = Vec::with_capacity(paths.len());
    for path in &paths {
        match File::open(path) {
            Ok(file) => sources.push(BufReader::new(file)),
            Err(e) => {
                eprintln!("cannot open {path}: {e}");
                return ExitCode::FAILURE;
            }
        }
    }

    let config = ConversionConfig::for_layout(layout);
    let workbook = match efatura::convert(sources, &config, Some(&rates)) {
        Ok(workbook) => workbook,
        Err(e) => {
            eprintln!("{e}");
            if let Some(index) = e.file {
                eprintln!("  while reading {}", paths[index]);
            }
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = std::fs::write(output, workbook.into_inner()) {
        eprintln!("cannot write {output}: {e}");
        return ExitCode::FAILURE;
    }
    println!("Wrote {} invoice file(s) to {output}", paths.len());
    ExitCode::SUCCESS
}
