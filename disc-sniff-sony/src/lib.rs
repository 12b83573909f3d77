//! Sony disc serial extraction.
//!
//! - PlayStation (PS1/PSX): ISO 9660 walk to `SYSTEM.CNF`
//! - PlayStation Portable (PSP): brute-force prefix scan

pub mod ps1_disc;
pub mod psp;

pub use ps1_disc::{FrameGeometry, detect_ps1_serial};
pub use psp::detect_psp_serial;
