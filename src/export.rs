//! CSV rendering of split plans.

use crate::format;
use crate::split::SplitLine;

/// Render a plan as two-column CSV with currency-formatted amounts.
///
/// Fields containing commas or quotes are quoted per RFC 4180 so the output
/// stays loadable in spreadsheet tools (the compact rupiah form always
/// contains commas).
pub fn plan_csv(lines: &[SplitLine]) -> String {
    let mut out = String::from("machine,amount\n");
    for line in lines {
        out.push_str(&csv_field(&line.machine));
        out.push(',');
        out.push_str(&csv_field(&format::rupiah_compact(line.amount)));
        out.push('\n');
    }
    out
}

/// Grand total of a plan, in rupiah.
pub fn plan_total(lines: &[SplitLine]) -> u64 {
    lines.iter().map(|line| line.amount).sum()
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
