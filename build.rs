use std::fs;

fn main() {
    // Validate embedded TOML documents at compile time
    for path in ["src/default_config.toml", "src/default_profile.toml"] {
        println!("cargo:rerun-if-changed={}", path);

        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {}: {}", path, e));

        // Try to parse it as TOML to catch syntax errors
        if let Err(e) = content.parse::<toml::Table>() {
            panic!("Invalid {}: {}", path, e);
        }
    }
}
