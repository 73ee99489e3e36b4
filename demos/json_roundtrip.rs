//! Convert a Caddyfile to JSON and back.

const INPUT: &str = r#"# main site
http://example.com, example.com:443 {
    root /var/www
    header / {
        Cache-Control "max-age=3600"
    }
    redir /blog https://blog.example.com 302
}
"#;

fn main() {
    let json = match caddyfile_engine::to_json(INPUT) {
        Ok(json) => json,
        Err(e) => {
            eprintln!("to_json failed: {e}");
            return;
        }
    };
    println!("JSON:\n{json}\n");

    match caddyfile_engine::from_json(&json) {
        Ok(text) => {
            println!("Canonical text:\n{text}\n");
            let again = caddyfile_engine::to_json(&text);
            println!("Stable: {}", again.is_ok_and(|j| j == json));
        }
        Err(e) => eprintln!("from_json failed: {e}"),
    }
}
