use penndraw_engine::paint::Rgba8;

use crate::error::{DrawError, DrawResult};

/// A pen color as the caller wrote it, before range checking.
///
/// Components are wide integers so that out-of-range values such as `300`
/// survive until validation reports them.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ColorSpec {
    Rgb(i64, i64, i64),
    Rgba(i64, i64, i64, i64),
}

impl ColorSpec {
    /// Builds a spec from a runtime component list (3 or 4 integral values).
    pub fn from_components(components: &[f64]) -> DrawResult<Self> {
        let mut ints = [0i64; 4];
        for (slot, &c) in ints.iter_mut().zip(components) {
            if !c.is_finite() || c.fract() != 0.0 {
                return Err(DrawError::invalid_color(format!(
                    "color components must be integers, got {c}"
                )));
            }
            // Saturating cast; anything this large fails the range check anyway.
            *slot = c as i64;
        }
        match components.len() {
            3 => Ok(ColorSpec::Rgb(ints[0], ints[1], ints[2])),
            4 => Ok(ColorSpec::Rgba(ints[0], ints[1], ints[2], ints[3])),
            n => Err(DrawError::invalid_color(format!(
                "color needs 3 or 4 components, got {n}"
            ))),
        }
    }

    /// Validates every component and expands to RGBA; RGB implies opaque.
    pub fn to_rgba8(self) -> DrawResult<Rgba8> {
        let (r, g, b, a) = match self {
            ColorSpec::Rgb(r, g, b) => (r, g, b, 255),
            ColorSpec::Rgba(r, g, b, a) => (r, g, b, a),
        };
        Ok(Rgba8::new(channel(r)?, channel(g)?, channel(b)?, channel(a)?))
    }
}

fn channel(v: i64) -> DrawResult<u8> {
    u8::try_from(v).map_err(|_| DrawError::invalid_color(format!("color component {v} is outside 0..=255")))
}

impl From<Rgba8> for ColorSpec {
    fn from(c: Rgba8) -> Self {
        ColorSpec::Rgba(c.r.into(), c.g.into(), c.b.into(), c.a.into())
    }
}

macro_rules! impl_from_ints {
    ($($t:ty),*) => {$(
        impl From<($t, $t, $t)> for ColorSpec {
            fn from((r, g, b): ($t, $t, $t)) -> Self {
                ColorSpec::Rgb(r as i64, g as i64, b as i64)
            }
        }

        impl From<($t, $t, $t, $t)> for ColorSpec {
            fn from((r, g, b, a): ($t, $t, $t, $t)) -> Self {
                ColorSpec::Rgba(r as i64, g as i64, b as i64, a as i64)
            }
        }

        impl From<[$t; 3]> for ColorSpec {
            fn from([r, g, b]: [$t; 3]) -> Self {
                ColorSpec::Rgb(r as i64, g as i64, b as i64)
            }
        }

        impl From<[$t; 4]> for ColorSpec {
            fn from([r, g, b, a]: [$t; 4]) -> Self {
                ColorSpec::Rgba(r as i64, g as i64, b as i64, a as i64)
            }
        }
    )*};
}

impl_from_ints!(u8, i32, i64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_implies_opaque() {
        let c = ColorSpec::from((10, 20, 30)).to_rgba8().unwrap();
        assert_eq!(c, Rgba8::new(10, 20, 30, 255));
    }

    #[test]
    fn rgba_keeps_alpha() {
        let c = ColorSpec::from([1u8, 2, 3, 4]).to_rgba8().unwrap();
        assert_eq!(c, Rgba8::new(1, 2, 3, 4));
    }

    #[test]
    fn out_of_range_is_invalid() {
        assert!(matches!(ColorSpec::from((300, 0, 0)).to_rgba8(), Err(DrawError::InvalidColor(_))));
        assert!(matches!(ColorSpec::from((0, -1, 0)).to_rgba8(), Err(DrawError::InvalidColor(_))));
        assert!(matches!(ColorSpec::from((0, 0, 0, 256)).to_rgba8(), Err(DrawError::InvalidColor(_))));
    }

    #[test]
    fn components_check_arity_and_integrality() {
        assert_eq!(ColorSpec::from_components(&[1.0, 2.0, 3.0]), Ok(ColorSpec::Rgb(1, 2, 3)));
        assert!(matches!(ColorSpec::from_components(&[1.0, 2.0]), Err(DrawError::InvalidColor(_))));
        assert!(matches!(
            ColorSpec::from_components(&[1.0, 2.0, 3.0, 4.0, 5.0]),
            Err(DrawError::InvalidColor(_))
        ));
        assert!(matches!(ColorSpec::from_components(&[1.5, 2.0, 3.0]), Err(DrawError::InvalidColor(_))));
        assert!(matches!(ColorSpec::from_components(&[f64::NAN, 0.0, 0.0]), Err(DrawError::InvalidColor(_))));
    }

    #[test]
    fn rgba8_round_trips() {
        let c = Rgba8::new(9, 8, 7, 6);
        assert_eq!(ColorSpec::from(c).to_rgba8().unwrap(), c);
    }
}
