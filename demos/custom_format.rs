//! Customizing the text format: indentation, key delimiters and escape
//! characters.
//!
//! Run with: cargo run --example custom_format

use muesli::{muesli, parse_with, write_value_with, Format};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let value = muesli!(Job {
        "title": "night shift",
        "priority": 3,
        "steps": ["load", "run", "verify"]
    });

    println!("standard:\n{}\n", write_value_with(&value, &Format::standard()));

    println!("compact:\n{}\n", write_value_with(&value, &Format::compact()));

    let wide = Format::standard().with_indent("    ");
    println!("four-space indent:\n{}\n", write_value_with(&value, &wide));

    let colons = Format::standard().with_delimiter(':').with_escape_char('"');
    let text = write_value_with(&value, &colons);
    println!("delimited keys, double-quote escapes:\n{}\n", text);

    // A format round-trips its own output.
    assert_eq!(parse_with(&text, &colons)?, value);
    println!("round trip ok");

    Ok(())
}
