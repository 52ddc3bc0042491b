use std::{env, fs::File, path::PathBuf};

use cfg_aliases::cfg_aliases;
use gl_generator::{Api, Fallbacks, Profile, Registry, StructGenerator};

fn main() {
    cfg_aliases! {
        android_platform: { target_os = "android" },
        macos_platform: { target_os = "macos" },
        ios_platform: { target_os = "ios" },
        windows_platform: { target_os = "windows" },
        free_unix: { all(unix, not(macos_platform), not(ios_platform), not(android_platform), not(target_os = "emscripten")) },
        desktop_platform: { any(windows_platform, macos_platform, free_unix) },
    }

    println!("cargo:rerun-if-changed=build.rs");

    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("cargo sets OUT_DIR for build scripts"));
    let mut bindings = File::create(out_dir.join("gl_bindings.rs"))
        .expect("failed to create gl_bindings.rs");
    Registry::new(Api::Gl, (4, 6), Profile::Core, Fallbacks::All, [])
        .write_bindings(StructGenerator, &mut bindings)
        .expect("failed to write gl bindings");
}
