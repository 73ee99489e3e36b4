//! Build a Caddyfile programmatically and print it as text and JSON.

use caddyfile_engine::{BodyEntry, Document, ServerBlock};

fn main() {
    let doc = Document::new()
        .block(
            ServerBlock::new("https://example.com")
                .host("www.example.com")
                .entry(BodyEntry::new("root").arg("/srv"))
                .entry(BodyEntry::new("header").block(vec![
                    BodyEntry::new("X-Content-Type-Options").arg("nosniff"),
                    BodyEntry::new("X-Frame-Options").arg("DENY"),
                ]))
                .redir("/old", "/new", 301),
        )
        .block(ServerBlock::new("localhost:8080").entry(BodyEntry::new("gzip")));

    println!("{}", caddyfile_engine::format(&doc));
    println!();

    match doc.to_json() {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("encode error: {e}"),
    }
}
