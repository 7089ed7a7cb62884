//! Sector records materialised once the player discovers them.

use carbon_quest_core::SectorCoord;
use serde::{Deserialize, Serialize};

/// Lowest carbon density a sector can hold.
pub const MIN_DENSITY: f64 = 0.0;
/// Highest carbon density a sector can hold.
pub const MAX_DENSITY: f64 = 100.0;

/// Clamps a density into the supported range, mapping NaN to empty.
#[must_use]
pub fn clamp_density(value: f64) -> f64 {
    if value.is_nan() {
        return MIN_DENSITY;
    }
    value.clamp(MIN_DENSITY, MAX_DENSITY)
}

/// One cell of the galaxy grid known to the player.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sector {
    /// Grid position and identity of the sector.
    pub coord: SectorCoord,
    /// Carbon present, as measured by the last scan.
    pub carbon_density: f64,
    /// How deep the deposit lies.
    pub depth: u32,
    /// The player knows the sector exists.
    pub discovered: bool,
    /// The sector's density has been measured.
    pub scanned: bool,
    /// The player flagged the sector for mining.
    pub marked: bool,
    /// A rocket is extracting carbon from the sector.
    pub mining: bool,
    /// The sector has been mined out.
    pub mined: bool,
}

impl Sector {
    /// Creates a freshly scanned sector.
    #[must_use]
    pub fn revealed(coord: SectorCoord, carbon_density: f64, depth: u32) -> Self {
        Self {
            coord,
            carbon_density: clamp_density(carbon_density),
            depth,
            discovered: true,
            scanned: true,
            marked: false,
            mining: false,
            mined: false,
        }
    }

    /// Reports whether a rocket could be sent to mine the sector.
    #[must_use]
    pub fn is_minable(&self) -> bool {
        self.scanned && !self.mining && !self.mined && self.carbon_density > MIN_DENSITY
    }

    pub(crate) fn set_density(&mut self, value: f64) {
        self.carbon_density = clamp_density(value);
    }

    pub(crate) fn apply_reading(&mut self, carbon_density: f64, depth: u32) {
        self.set_density(carbon_density);
        self.depth = depth;
        self.discovered = true;
        self.scanned = true;
    }

    pub(crate) fn normalise(&mut self) {
        self.set_density(self.carbon_density);
        if self.scanned {
            self.discovered = true;
        }
        if self.mined || !self.scanned {
            self.mining = false;
        }
    }
}

/// Hidden carbon deposit produced by galaxy generation.
///
/// Deposits are the ground truth that telescope sweeps measure; they are never
/// shown directly.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Deposit {
    /// Grid position of the deposit.
    pub coord: SectorCoord,
    /// True carbon density.
    pub density: f64,
    /// How deep the deposit lies.
    pub depth: u32,
}
