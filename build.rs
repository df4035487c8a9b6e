use std::env;
use std::fs;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=rp2350.x");

    // Host builds (unit tests of the library) link without cortex-m-rt.
    if env::var("CARGO_CFG_TARGET_OS").as_deref() != Ok("none") {
        return;
    }

    // cortex-m-rt's link.x includes memory.x from the search path
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    fs::copy("rp2350.x", out_dir.join("memory.x")).expect("Failed to copy rp2350.x to memory.x");
    println!("cargo:rustc-link-search={}", out_dir.display());
}
