//! Conversions between the percentages shown to the user and the scales the
//! Hue bridge works in.

/// Highest brightness value accepted by the bridge.
pub const BRIGHTNESS_MAX: u8 = 254;

/// Coolest colour temperature in mired.
pub const MIRED_MIN: u16 = 153;

/// Warmest colour temperature in mired.
pub const MIRED_MAX: u16 = 500;

/// Maps a 0-100 percentage onto the 0-254 bridge brightness scale.
pub fn brightness_to_device(percent: u8) -> u8 {
    let percent = percent.min(100) as f64;
    (percent / 100.0 * BRIGHTNESS_MAX as f64).round() as u8
}

/// Maps a 0-254 bridge brightness onto a 0-100 percentage.
pub fn brightness_to_percent(device: u8) -> u8 {
    let device = device.min(BRIGHTNESS_MAX) as f64;
    (device / BRIGHTNESS_MAX as f64 * 100.0).round() as u8
}

/// Maps a warmth percentage (0 coolest, 100 warmest) onto mired.
pub fn warmth_to_mired(percent: u8) -> u16 {
    let span = (MIRED_MAX - MIRED_MIN) as f64;
    let percent = percent.min(100) as f64;
    MIRED_MIN + (percent / 100.0 * span).round() as u16
}

/// Maps a colour temperature in mired onto a warmth percentage.
pub fn mired_to_warmth(mired: u16) -> u8 {
    let span = (MIRED_MAX - MIRED_MIN) as f64;
    let offset = (mired.clamp(MIRED_MIN, MIRED_MAX) - MIRED_MIN) as f64;
    (offset / span * 100.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brightness_half_maps_to_127() {
        assert_eq!(brightness_to_device(50), 127);
    }

    #[test]
    fn test_brightness_full_scale() {
        assert_eq!(brightness_to_device(100), 254);
        assert_eq!(brightness_to_device(0), 0);
        assert_eq!(brightness_to_percent(254), 100);
        assert_eq!(brightness_to_percent(0), 0);
        assert_eq!(brightness_to_percent(127), 50);
    }

    #[test]
    fn test_brightness_clamps_out_of_range_input() {
        assert_eq!(brightness_to_device(180), 254);
        assert_eq!(brightness_to_percent(255), 100);
    }

    #[test]
    fn test_warmth_bounds() {
        assert_eq!(warmth_to_mired(0), MIRED_MIN);
        assert_eq!(warmth_to_mired(100), MIRED_MAX);
        assert_eq!(warmth_to_mired(50), 327);
        assert_eq!(mired_to_warmth(MIRED_MIN), 0);
        assert_eq!(mired_to_warmth(MIRED_MAX), 100);
        assert_eq!(mired_to_warmth(100), 0);
        assert_eq!(mired_to_warmth(600), 100);
    }
}
