//! Envelope resolution selection
//!
//! The sample count requested from the envelope endpoint is chosen once
//! per load from device and network heuristics: larger/sharper displays
//! justify finer detail, constrained networks override everything else to
//! protect load latency. Selection is a pure function of the probe so the
//! same inputs always produce the same tier.

/// Sample counts the envelope endpoint can serve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionTier {
    /// 500 samples - narrow layouts and constrained networks
    Coarse,
    /// 1000 samples - the default
    Standard,
    /// 2000 samples - high-DPI or wide layouts
    Fine,
}

impl ResolutionTier {
    /// Sample count to request for this tier
    pub fn samples(self) -> u32 {
        match self {
            ResolutionTier::Coarse => 500,
            ResolutionTier::Standard => 1000,
            ResolutionTier::Fine => 2000,
        }
    }
}

/// Effective connection type, mirroring the Network Information API classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EffectiveType {
    Slow2g,
    TwoG,
    ThreeG,
    #[default]
    FourG,
}

/// Network-quality signal feeding tier selection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NetworkSignal {
    pub effective_type: EffectiveType,
    /// Estimated downlink in Mbps
    pub downlink_mbps: f64,
}

impl Default for NetworkSignal {
    fn default() -> Self {
        Self {
            effective_type: EffectiveType::FourG,
            downlink_mbps: 10.0,
        }
    }
}

impl NetworkSignal {
    /// Whether the connection is slow enough to cap envelope detail
    pub fn is_low_bandwidth(&self) -> bool {
        matches!(
            self.effective_type,
            EffectiveType::Slow2g | EffectiveType::TwoG
        ) || self.downlink_mbps < 1.5
    }
}

/// Measured geometry and device signals at load time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportProbe {
    /// Measured width of the scrubber's hosting container, in pixels
    pub container_width: f32,
    /// Full viewport (window) width, in pixels
    pub viewport_width: f32,
    /// Device pixel ratio (window scale factor)
    pub device_pixel_ratio: f64,
    pub network: NetworkSignal,
}

impl ViewportProbe {
    fn is_high_dpi(&self) -> bool {
        self.device_pixel_ratio > 1.0
    }
}

/// Pick the envelope resolution for the current device/network conditions
///
/// Decision order, first match wins:
/// 1. Low-bandwidth connection -> Coarse, regardless of anything else
/// 2. Narrow viewport (< 768) or narrow container (< 600) -> Coarse
/// 3. Tablet-range viewport (768-1023) OR (normal-DPI AND container < 1200) -> Standard
/// 4. High-DPI OR large container (>= 1200) -> Fine
/// 5. Otherwise -> Standard
pub fn select_resolution_tier(probe: &ViewportProbe) -> ResolutionTier {
    if probe.network.is_low_bandwidth() {
        return ResolutionTier::Coarse;
    }

    if probe.viewport_width < 768.0 || probe.container_width < 600.0 {
        return ResolutionTier::Coarse;
    }

    let tablet_viewport = (768.0..1024.0).contains(&probe.viewport_width);
    if tablet_viewport || (!probe.is_high_dpi() && probe.container_width < 1200.0) {
        return ResolutionTier::Standard;
    }

    if probe.is_high_dpi() || probe.container_width >= 1200.0 {
        return ResolutionTier::Fine;
    }

    ResolutionTier::Standard
}

#[cfg(test)]
mod tests {
    use super::*;

    fn probe(container: f32, viewport: f32, dpr: f64, network: NetworkSignal) -> ViewportProbe {
        ViewportProbe {
            container_width: container,
            viewport_width: viewport,
            device_pixel_ratio: dpr,
            network,
        }
    }

    fn fast() -> NetworkSignal {
        NetworkSignal::default()
    }

    #[test]
    fn test_low_bandwidth_overrides_everything() {
        // 2000px container + high DPI would be Fine, but slow link wins
        let slow = NetworkSignal {
            effective_type: EffectiveType::FourG,
            downlink_mbps: 1.0,
        };
        assert_eq!(
            select_resolution_tier(&probe(2000.0, 2560.0, 3.0, slow)),
            ResolutionTier::Coarse
        );

        let two_g = NetworkSignal {
            effective_type: EffectiveType::TwoG,
            downlink_mbps: 50.0,
        };
        assert_eq!(
            select_resolution_tier(&probe(2000.0, 2560.0, 3.0, two_g)),
            ResolutionTier::Coarse
        );
    }

    #[test]
    fn test_narrow_layouts_coarse() {
        assert_eq!(
            select_resolution_tier(&probe(500.0, 640.0, 1.0, fast())),
            ResolutionTier::Coarse
        );
        // Narrow container alone is enough even on a wide viewport
        assert_eq!(
            select_resolution_tier(&probe(550.0, 1920.0, 1.0, fast())),
            ResolutionTier::Coarse
        );
    }

    #[test]
    fn test_tablet_range_standard() {
        assert_eq!(
            select_resolution_tier(&probe(700.0, 800.0, 2.0, fast())),
            ResolutionTier::Standard
        );
        assert_eq!(
            select_resolution_tier(&probe(900.0, 1023.0, 1.0, fast())),
            ResolutionTier::Standard
        );
    }

    #[test]
    fn test_normal_dpi_medium_container_standard() {
        assert_eq!(
            select_resolution_tier(&probe(1000.0, 1920.0, 1.0, fast())),
            ResolutionTier::Standard
        );
    }

    #[test]
    fn test_high_dpi_or_wide_fine() {
        assert_eq!(
            select_resolution_tier(&probe(800.0, 1440.0, 2.0, fast())),
            ResolutionTier::Fine
        );
        assert_eq!(
            select_resolution_tier(&probe(1400.0, 1920.0, 1.0, fast())),
            ResolutionTier::Fine
        );
    }

    #[test]
    fn test_pure_function() {
        let p = probe(1280.0, 1920.0, 2.0, fast());
        let first = select_resolution_tier(&p);
        for _ in 0..10 {
            assert_eq!(select_resolution_tier(&p), first);
        }
    }

    #[test]
    fn test_tier_sample_counts() {
        assert_eq!(ResolutionTier::Coarse.samples(), 500);
        assert_eq!(ResolutionTier::Standard.samples(), 1000);
        assert_eq!(ResolutionTier::Fine.samples(), 2000);
    }
}
