//! Output formatting - plaintext and JSON.

use crate::diagnostics::Diagnostic;
use serde_json::json;

/// Prints suggestions in plain text format, one per line, with the
/// attached fix-it rendered beneath each.
pub fn print_plain(diags: &[Diagnostic]) {
    if diags.is_empty() {
        println!("No constexpr opportunities found.");
        return;
    }

    println!("SUGGESTIONS ({}):", diags.len());
    for d in diags {
        println!("{}", d.render());
        if let Some(fixit) = &d.fixit {
            println!("  fix-it: insert \"{}\" at {}", fixit.insertion, fixit.loc);
        }
    }
}

/// Prints suggestions in JSON format.
///
/// Falls back to a count-only object if serialization fails (should not
/// happen for these types, but the output channel must never panic).
pub fn print_json(diags: &[Diagnostic]) {
    let payload = json!({
        "count": diags.len(),
        "suggestions": diags,
    });
    match serde_json::to_string_pretty(&payload) {
        Ok(out) => println!("{}", out),
        Err(e) => {
            eprintln!("[WARN] JSON serialization failed: {}", e);
            println!("{{\"count\": {}}}", diags.len());
        }
    }
}
