use std::env;
use std::path::PathBuf;

fn main() {
    let crate_dir = env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR is set by cargo");
    let out = PathBuf::from(&crate_dir).join("include").join("crossword.h");

    println!("cargo:rerun-if-changed=src/lib.rs");
    println!("cargo:rerun-if-changed=src/types.rs");

    let result = cbindgen::Builder::new()
        .with_crate(&crate_dir)
        .with_language(cbindgen::Language::C)
        .with_include_guard("CROSSWORD_H")
        .with_documentation(true)
        .generate();

    match result {
        Ok(bindings) => {
            if let Some(dir) = out.parent() {
                let _ = std::fs::create_dir_all(dir);
            }
            bindings.write_to_file(out);
        }
        Err(e) => println!("cargo:warning=skipping crossword.h generation: {e}"),
    }
}
