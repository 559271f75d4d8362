use typed_builder::TypedBuilder;

/// How many PPU dots the driver advances per CPU step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PpuTiming {
    /// One dot per T-cycle the CPU step consumed.
    #[default]
    CycleAccurate,
    /// Four dots per CPU step whatever the instruction cost. Kept for
    /// behavioural parity with drivers that tick the PPU at a fixed rate.
    FixedFourDots,
}

impl PpuTiming {
    /// Parse the names accepted on the command line (`accurate`, `fixed4`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "accurate" | "cycle" | "cycle-accurate" => Some(PpuTiming::CycleAccurate),
            "fixed4" | "fixed" | "fixed-four" => Some(PpuTiming::FixedFourDots),
            _ => None,
        }
    }

    #[inline]
    pub(crate) fn dots_for(self, cycles: u32) -> u32 {
        match self {
            PpuTiming::CycleAccurate => cycles,
            PpuTiming::FixedFourDots => 4,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, TypedBuilder)]
pub struct GameBoyConfig {
    #[builder(default)]
    pub ppu_timing: PpuTiming,
    /// Let writes below 0x8000 patch a ROM-only image. Test fixtures only.
    #[builder(default = false)]
    pub allow_rom_writes: bool,
}

impl Default for GameBoyConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
