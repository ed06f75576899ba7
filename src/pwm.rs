//! PWM duty-cycle quantization.

use arbitrary_int::u11;

/// A PWM duty-cycle value, 0..=[`PWM_MAX`].
pub type PwmValue = u11;

/// Highest duty-cycle value produced by [`to_pwm`].
pub const PWM_MAX: u16 = 1088;

/// Span of a signed 16-bit sample once offset to unsigned.
const UNSIGNED_SPAN: u32 = u16::MAX as u32;

/// Map a signed 16-bit sample onto the PWM range.
///
/// `floor((sample + 32768) * 1088 / 65535)`. `i16::MIN` maps to 0 and
/// `i16::MAX` to [`PWM_MAX`].
pub fn to_pwm(sample: i16) -> PwmValue {
    let unsigned = (i32::from(sample) - i32::from(i16::MIN)) as u32; // 0..=65535
    let duty = unsigned * u32::from(PWM_MAX) / UNSIGNED_SPAN;
    u11::new(duty as u16)
}

/// Map every sample onto the PWM range, keeping order and length.
pub fn to_pwm_samples(samples: &[i16]) -> Vec<PwmValue> {
    samples.iter().copied().map(to_pwm).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints() {
        assert_eq!(to_pwm(i16::MIN).value(), 0);
        assert_eq!(to_pwm(0).value(), 544);
        assert_eq!(to_pwm(i16::MAX).value(), PWM_MAX);
    }

    #[test]
    fn floor_division() {
        // (1 + 32768) * 1088 / 65535 = 544.0166...
        assert_eq!(to_pwm(1).value(), 544);
        // (-32768 + 61 + 32768) * 1088 / 65535 = 1.0127...
        assert_eq!(to_pwm(-32768 + 61).value(), 1);
        assert_eq!(to_pwm(-32768 + 60).value(), 0);
    }

    #[test]
    fn full_domain_is_in_range_and_monotonic() {
        let mut last = 0u16;
        for s in i16::MIN..=i16::MAX {
            let v = to_pwm(s).value();
            assert!(v <= PWM_MAX, "{s} -> {v}");
            assert!(v >= last, "not monotonic at {s}");
            last = v;
        }
    }

    #[test]
    fn preserves_length_and_order() {
        let samples = [i16::MAX, 0, i16::MIN, 0];
        let pwm: Vec<u16> = to_pwm_samples(&samples).iter().map(|v| v.value()).collect();
        assert_eq!(pwm, vec![1088, 544, 0, 544]);
        assert!(to_pwm_samples(&[]).is_empty());
    }
}
