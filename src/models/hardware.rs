// CPU/GPU load, temperature and power models

use serde::Serialize;

/// One reading of the hardware sensors. `None` means the source did not report it;
/// the renderer shows a sentinel in its place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HardwareSample {
    pub cpu_load_pct: Option<i64>,
    pub gpu_load_pct: Option<i64>,
    pub cpu_temp_c: Option<i64>,
    pub cpu_power_w: Option<i64>,
    pub gpu_temp_c: Option<i64>,
    pub gpu_power_w: Option<i64>,
}

impl HardwareSample {
    /// Every field missing.
    pub fn unavailable() -> Self {
        Self::default()
    }

    /// Fill fields missing in `self` from `other`.
    pub fn or(self, other: HardwareSample) -> Self {
        Self {
            cpu_load_pct: self.cpu_load_pct.or(other.cpu_load_pct),
            gpu_load_pct: self.gpu_load_pct.or(other.gpu_load_pct),
            cpu_temp_c: self.cpu_temp_c.or(other.cpu_temp_c),
            cpu_power_w: self.cpu_power_w.or(other.cpu_power_w),
            gpu_temp_c: self.gpu_temp_c.or(other.gpu_temp_c),
            gpu_power_w: self.gpu_power_w.or(other.gpu_power_w),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::unavailable()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpuVendor {
    Intel,
    Amd,
    Unknown,
}

impl CpuVendor {
    /// Classify from a processor name (e.g. "Intel(R) Core(TM) i7-9700K").
    pub fn from_name(name: &str) -> Self {
        let lower = name.to_lowercase();
        if lower.contains("intel") {
            CpuVendor::Intel
        } else if lower.contains("amd") {
            CpuVendor::Amd
        } else {
            CpuVendor::Unknown
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CpuVendor::Intel => "Intel",
            CpuVendor::Amd => "AMD",
            CpuVendor::Unknown => "Unknown",
        }
    }
}

/// Static hardware names; detected once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HardwareIdentity {
    pub cpu_name: String,
    pub gpu_name: String,
    pub cpu_vendor: CpuVendor,
}

impl HardwareIdentity {
    pub fn new(cpu_name: impl Into<String>, gpu_name: impl Into<String>) -> Self {
        let cpu_name = cpu_name.into();
        let cpu_vendor = CpuVendor::from_name(&cpu_name);
        Self {
            cpu_name,
            gpu_name: gpu_name.into(),
            cpu_vendor,
        }
    }
}
