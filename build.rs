fn main() {
    if let Err(err) = built::write_built_file() {
        println!("cargo:warning=Failed to acquire build-time information: {err}");
        std::process::exit(1);
    }
}
