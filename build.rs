fn main() {
    // only the rdkit backend links against the C++ shim
    if std::env::var_os("CARGO_FEATURE_RDKIT").is_none() {
        return;
    }
    let include = std::env::var("DEP_SHIM_INCLUDE")
        .expect("rdkit-sys did not export its shim include path");
    println!("cargo:rustc-link-arg=-Wl,-rpath,{include}");
}
