pub mod errors;
pub mod game;
pub mod gl;
pub mod result;
pub mod shader;
pub mod wrapper;

#[cfg(test)]
pub(crate) mod fake_gl;
