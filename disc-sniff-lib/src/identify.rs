//! One-call identification: system, serial and region.

use std::io::ErrorKind;

use disc_sniff_core::{DiscError, GameId, ReadSeek, Region, ScanLimits, System};
use disc_sniff_sony::{detect_ps1_serial, detect_psp_serial, ps1_disc, psp};

use crate::ascii::detect_ascii_serial;
use crate::magic::detect_system;

/// What could be learned about a disc image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identification {
    /// Detected system, if any signature matched
    pub system: Option<System>,

    /// Game serial (e.g., "SLUS-01234", "ULUS-10041", "RMCE01")
    pub serial: Option<GameId>,

    /// Region implied by the serial prefix
    pub region: Option<Region>,
}

impl Identification {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_system(mut self, system: System) -> Self {
        self.system = Some(system);
        self
    }

    pub fn with_serial(mut self, serial: GameId) -> Self {
        self.serial = Some(serial);
        self
    }

    pub fn with_region(mut self, region: Region) -> Self {
        self.region = Some(region);
        self
    }
}

/// Detect the system of an image and extract its serial.
///
/// - `ps1`: ISO 9660 walk to SYSTEM.CNF
/// - `psp`: prefix scan over `limits.psp_window` bytes
/// - other recognized systems: no serial
/// - unrecognized (including images too short for the magic table):
///   ASCII scan over `limits.ascii_window` bytes
///
/// A missing serial is not an error; I/O failures are.
pub fn identify(
    reader: &mut dyn ReadSeek,
    limits: &ScanLimits,
) -> Result<Identification, DiscError> {
    let system = match detect_system(reader) {
        Ok(system) => Some(system),
        Err(DiscError::NotRecognized) => None,
        Err(DiscError::Io(e)) if e.kind() == ErrorKind::UnexpectedEof => {
            log::debug!("Image too short for magic table: {e}");
            None
        }
        Err(e) => return Err(e),
    };

    let serial = match system {
        Some(System::Ps1) => optional(detect_ps1_serial(reader))?,
        Some(System::Psp) => optional(detect_psp_serial(reader, limits.psp_window))?,
        Some(_) => None,
        None => optional(detect_ascii_serial(reader, limits.ascii_window))?,
    };

    let region = match (system, &serial) {
        (Some(System::Ps1), Some(serial)) => ps1_disc::serial_to_region(serial.as_str()),
        (Some(System::Psp), Some(serial)) => psp::serial_to_region(serial.as_str()),
        _ => None,
    };

    let mut id = Identification::new();
    if let Some(system) = system {
        id = id.with_system(system);
    }
    if let Some(serial) = serial {
        id = id.with_serial(serial);
    }
    if let Some(region) = region {
        id = id.with_region(region);
    }
    Ok(id)
}

/// Turn a format failure into `None`, keeping I/O errors.
fn optional(result: Result<GameId, DiscError>) -> Result<Option<GameId>, DiscError> {
    match result {
        Ok(serial) => Ok(Some(serial)),
        Err(e) if e.is_io() => Err(e),
        Err(e) => {
            log::debug!("No serial: {e}");
            Ok(None)
        }
    }
}
