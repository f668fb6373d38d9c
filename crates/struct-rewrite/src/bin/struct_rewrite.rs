//! `struct-rewrite` — replace one deep field of a nested record.
//!
//! Usage:
//!   struct-rewrite '<path>' '<replacement-json>' [--schema '<schema-json>']
//!
//! The record is read from stdin. Without `--schema`, array descents
//! are tagged in the path itself (`a.items[].v`); with `--schema`, the
//! path is plain dotted names and each segment is tagged by schema
//! lookup.

use std::io::{self, Read, Write};

use struct_path::{FieldPath, StructType};
use struct_rewrite::{build_transform, Replacement};

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let (path_arg, replacement_arg) = match (args.get(1), args.get(2)) {
        (Some(p), Some(r)) => (p.clone(), r.clone()),
        _ => {
            eprintln!("Usage: struct-rewrite '<path>' '<replacement-json>' [--schema '<schema-json>']");
            std::process::exit(1);
        }
    };
    let schema_arg = match (args.get(3).map(String::as_str), args.get(4)) {
        (Some("--schema"), Some(s)) => Some(s.clone()),
        (None, _) => None,
        _ => {
            eprintln!("Usage: struct-rewrite '<path>' '<replacement-json>' [--schema '<schema-json>']");
            std::process::exit(1);
        }
    };

    let path = match &schema_arg {
        Some(schema_text) => {
            let schema: StructType = match serde_json::from_str(schema_text) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("Invalid schema: {e}");
                    std::process::exit(1);
                }
            };
            match schema.resolve(&path_arg) {
                Ok(p) => p,
                Err(e) => {
                    eprintln!("{e}");
                    std::process::exit(1);
                }
            }
        }
        None => match FieldPath::parse(&path_arg) {
            Ok(p) => p,
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
        },
    };

    let replacement: serde_json::Value = match serde_json::from_str(&replacement_arg) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Invalid replacement value: {e}");
            std::process::exit(1);
        }
    };

    let mut buf = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut buf) {
        eprintln!("{e}");
        std::process::exit(1);
    }
    let record: serde_json::Value = match serde_json::from_str(buf.trim()) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Invalid record: {e}");
            std::process::exit(1);
        }
    };

    let transform = build_transform(path, Replacement::from(replacement));
    match transform.apply(&record) {
        Ok(out) => {
            let text = serde_json::to_string(&out).unwrap();
            io::stdout().write_all(text.as_bytes()).unwrap();
            io::stdout().write_all(b"\n").unwrap();
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
