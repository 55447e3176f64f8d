//! Volts to fixed-point millivolt conversion.

use crate::error::{ConvertError, ConvertWarning};

/// Quantized scale items plus any warning raised on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct Quantized {
    /// Millivolt items, root first.
    pub items: Vec<i16>,
    pub warning: Option<ConvertWarning>,
}

/// Convert one volt value to millivolts, truncating toward zero.
///
/// `index` is the position in the scale (0 = root) and is only used for the
/// error.
pub fn volts_to_millivolts(volts: f64, index: usize) -> Result<i16, ConvertError> {
    let millivolts = (volts * 1000.0).trunc();
    if !millivolts.is_finite()
        || millivolts < f64::from(i16::MIN)
        || millivolts > f64::from(i16::MAX)
    {
        return Err(ConvertError::Range { index, millivolts });
    }
    Ok(millivolts as i16)
}

/// Quantize a volts sequence, keeping at most `max_size` values.
///
/// Cutting the scale down is not an error; it is reported as
/// [`ConvertWarning::SizeTruncated`].
pub fn quantize_volts(volts: &[f64], max_size: u8) -> Result<Quantized, ConvertError> {
    let max = usize::from(max_size);
    let warning = (volts.len() > max).then(|| ConvertWarning::SizeTruncated {
        original: volts.len(),
        max,
    });

    let items = volts
        .iter()
        .take(max)
        .enumerate()
        .map(|(index, &v)| volts_to_millivolts(v, index))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Quantized { items, warning })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncates_toward_zero() {
        assert_eq!(volts_to_millivolts(700.0 / 1200.0, 1).unwrap(), 583);
        assert_eq!(volts_to_millivolts(1.5f64.log2(), 1).unwrap(), 584);
        assert_eq!(volts_to_millivolts(1.0, 1).unwrap(), 1000);
        assert_eq!(volts_to_millivolts(-0.0019, 1).unwrap(), -1);
        assert_eq!(volts_to_millivolts(-0.0009, 1).unwrap(), 0);
    }

    #[test]
    fn test_range_limits() {
        assert_eq!(volts_to_millivolts(32.7675, 1).unwrap(), 32767);
        assert_eq!(volts_to_millivolts(-32.7685, 1).unwrap(), -32768);

        match volts_to_millivolts(33.0, 5) {
            Err(ConvertError::Range { index, millivolts }) => {
                assert_eq!(index, 5);
                assert_eq!(millivolts, 33000.0);
            }
            other => panic!("expected Range error, got {:?}", other),
        }
        assert!(volts_to_millivolts(-40.0, 1).is_err());
    }

    #[test]
    fn test_non_finite_is_range_error() {
        assert!(matches!(
            volts_to_millivolts(f64::INFINITY, 2),
            Err(ConvertError::Range { index: 2, .. })
        ));
        assert!(volts_to_millivolts(f64::NAN, 2).is_err());
    }

    #[test]
    fn test_quantize_within_limit() {
        let result = quantize_volts(&[0.0, 0.5, 1.0], 32).unwrap();
        assert_eq!(result.items, vec![0, 500, 1000]);
        assert_eq!(result.warning, None);
    }

    #[test]
    fn test_quantize_truncates_with_warning() {
        let volts: Vec<f64> = (0..41).map(|i| f64::from(i) / 8.0).collect();
        let result = quantize_volts(&volts, 32).unwrap();

        assert_eq!(result.items.len(), 32);
        assert_eq!(result.items[31], 3875);
        assert_eq!(
            result.warning,
            Some(ConvertWarning::SizeTruncated {
                original: 41,
                max: 32
            })
        );
    }

    #[test]
    fn test_out_of_range_beyond_limit_is_ignored() {
        // Only the kept values are range-checked
        let result = quantize_volts(&[0.0, 1.0, 100.0], 2).unwrap();
        assert_eq!(result.items, vec![0, 1000]);
        assert!(result.warning.is_some());
    }
}
