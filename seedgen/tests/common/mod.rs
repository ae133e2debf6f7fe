//! Shared fixture builders for integration tests.

#![allow(dead_code)]
#![allow(clippy::unwrap_used)]

use std::fs;
use std::path::{Path, PathBuf};

/// Writes `content` at `relative` under `root`, creating directories.
pub fn write_file(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// A Java entry-point class for `package`.
pub fn application(package: &str) -> String {
    format!(
        "package {package};\n\npublic class Application {{\n    public static void main(String[] args) {{\n    }}\n}}\n"
    )
}

/// A feature-tagged Java class.
pub fn tagged_class(package: &str, name: &str, feature: &str) -> String {
    format!(
        "package {package};\n\nimport java.util.List;\n\n@Feature(\"{feature}\")\npublic class {name} {{\n    public void run() {{\n    }}\n}}\n"
    )
}

/// An untagged Java class.
pub fn plain_class(package: &str, name: &str) -> String {
    format!("package {package};\n\npublic class {name} {{\n}}\n")
}

/// Builds the standard seed fixture under `root`:
/// `com.acme.seed` with an entry point, three tagged services, and one
/// plain helper.
pub fn build_seed(root: &Path) {
    write_file(
        root,
        "src/main/java/com/acme/seed/Application.java",
        &application("com.acme.seed"),
    );
    write_file(
        root,
        "src/main/java/com/acme/seed/alpha/AlphaService.java",
        &tagged_class("com.acme.seed.alpha", "AlphaService", "Alpha"),
    );
    write_file(
        root,
        "src/main/java/com/acme/seed/beta/BetaService.java",
        &tagged_class("com.acme.seed.beta", "BetaService", "Beta"),
    );
    write_file(
        root,
        "src/main/java/com/acme/seed/gamma/GammaService.java",
        &tagged_class("com.acme.seed.gamma", "GammaService", "Gamma"),
    );
    write_file(
        root,
        "src/main/java/com/acme/seed/util/Helper.java",
        &plain_class("com.acme.seed.util", "Helper"),
    );
}

/// Builds the standard reference fixture under `root`: two tagged classes
/// in an unrelated package tree.
pub fn build_reference(root: &Path) {
    write_file(
        root,
        "src/main/java/com/ref/echo/EchoService.java",
        &tagged_class("com.ref.echo", "EchoService", "Echo"),
    );
    write_file(
        root,
        "src/main/java/com/ref/orders/OrderBoard.java",
        &tagged_class("com.ref.orders", "OrderBoard", "Order Management"),
    );
}

/// All Java files under `root`, relative, sorted.
pub fn java_files(root: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    collect_java(root, root, &mut files);
    files.sort();
    files
}

fn collect_java(root: &Path, dir: &Path, out: &mut Vec<PathBuf>) {
    for entry in fs::read_dir(dir).unwrap() {
        let entry = entry.unwrap();
        let path = entry.path();
        if path.is_dir() {
            collect_java(root, &path, out);
        } else if path.extension().is_some_and(|e| e == "java") {
            out.push(path.strip_prefix(root).unwrap().to_path_buf());
        }
    }
}
