//! Basic registry setup, serialization and deserialization.
//!
//! Run with: cargo run --example simple

use muesli::{from_str, to_string, to_string_with, Context, Format, Record, Registry, Spec};
use std::error::Error;

#[derive(Clone, Debug, PartialEq)]
struct User {
    id: i64,
    name: String,
    admin: bool,
}

impl Record for User {
    fn spec_name(&self) -> &str {
        "User"
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let mut registry = Registry::new();
    registry.register(
        Spec::<User>::builder("User", |data, spec, registry, _context| {
            Ok(User {
                id: spec.get_i64("id", data, registry)?,
                name: spec.get_string("name", data, registry)?,
                admin: spec.get_bool("admin", data, registry)?,
            })
        })
        .field("id", 0, |u: &User| u.id)
        .field("name", "", |u: &User| u.name.clone())
        .field("admin", false, |u: &User| u.admin)
        .build(),
    );

    let user = User {
        id: 42,
        name: "Alice Johnson".to_string(),
        admin: false,
    };

    let text = to_string(&registry, &user)?;
    println!("standard output:\n{}\n", text);

    let compact = to_string_with(
        &registry,
        &user,
        &Format::compact(),
        &Context::skipping_defaults(),
    )?;
    println!("compact, defaults skipped:\n{}\n", compact);

    let back: User = from_str(&registry, &text)?;
    assert_eq!(user, back);
    println!("round trip ok");

    Ok(())
}
