#![allow(
    clippy::all,
    clippy::pedantic,
    non_camel_case_types,
    non_snake_case,
    non_upper_case_globals,
    unused
)]

include!(concat!(env!("OUT_DIR"), "/gl_bindings.rs"));
