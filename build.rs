use indoc::indoc;
use std::env;
use std::fs;
use std::path::Path;

const HELP_REL: &str = "assets/help.md";

fn main() {
    let manifest = env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR not set");
    let help_basename = Path::new(HELP_REL)
        .file_name()
        .and_then(|s| s.to_str())
        .expect("invalid help asset filename");
    let help_path = Path::new(&manifest).join(HELP_REL);
    println!("cargo:rerun-if-changed={}", help_path.display());

    // The Help window shows when the document was last edited.
    let modified = match fs::metadata(&help_path).and_then(|m| m.modified()) {
        Ok(t) => {
            let dt: chrono::DateTime<chrono::Local> = chrono::DateTime::from(t);
            dt.format("%Y-%m-%d").to_string()
        }
        Err(_) => String::new(),
    };

    let out_dir = env::var("OUT_DIR").expect("OUT_DIR not set");
    let gen_path = Path::new(&out_dir).join("generated_help.rs");
    let help_dest = Path::new(&out_dir).join(help_basename);
    fs::copy(&help_path, &help_dest).expect("failed to copy help.md to OUT_DIR");

    let escaped = modified.replace('"', "\\\"");
    let gen_src = format!(
        indoc!(
            r#"
                pub struct EmbeddedHelp {{ pub content: &'static str, pub modified: &'static str }}

                pub const EMBEDDED_HELP: EmbeddedHelp = EmbeddedHelp {{
                    content: include_str!(concat!(env!("OUT_DIR"), "/{basename}")),
                    modified: "{modified}",
                }};
            "#
        ),
        basename = help_basename,
        modified = escaped,
    );
    fs::write(&gen_path, gen_src).expect("failed to write generated_help.rs to OUT_DIR");
}
