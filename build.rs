//! Build script recording the compiler version for the `/info` endpoint.
//!
//! `rustc --version` prints e.g. `rustc 1.83.0 (90b35a623 2024-11-26)`; the
//! version number is exported as `SAMPLE_APP_RUSTC_VERSION`.

use std::process::Command;

fn main() {
    println!("cargo:rerun-if-env-changed=RUSTC");

    let rustc = std::env::var("RUSTC").unwrap_or_else(|_| "rustc".to_string());
    let version = Command::new(&rustc)
        .arg("--version")
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .and_then(|stdout| stdout.split_whitespace().nth(1).map(str::to_string))
        .unwrap_or_else(|| {
            println!("cargo:warning=could not determine rustc version via {rustc}");
            "unknown".to_string()
        });

    println!("cargo:rustc-env=SAMPLE_APP_RUSTC_VERSION={version}");
}
