//! Solid rectangular plates, bending about x with depth `d` and thickness `b`.

use super::{Dimensions, SectionInput, ShapeCalculator, ShapeFamily, ShapeProperties, ShearDistribution};
use crate::errors::DesignResult;

pub struct RectPlate;

impl ShapeCalculator for RectPlate {
    fn family(&self) -> ShapeFamily {
        ShapeFamily::RectangularPlate
    }

    fn dimensions(&self, input: &SectionInput) -> DesignResult<Dimensions> {
        let b = input.require("b")?;
        Ok(Dimensions {
            d: input.require("d")?,
            b,
            t_f: b,
            t_w: b,
            r: None,
        })
    }

    fn properties(&self, dims: &Dimensions) -> DesignResult<ShapeProperties> {
        let Dimensions { d, b, .. } = *dims;
        Ok(ShapeProperties {
            a_g: b * d,
            i_x: b * d.powi(3) / 12.0,
            i_y: d * b.powi(3) / 12.0,
            s_x: b * d.powi(2) / 4.0,
            s_y: d * b.powi(2) / 4.0,
            j: 0.0,
            i_w: 0.0,
            x_c: b / 2.0,
            y_c: d / 2.0,
            x_max: b / 2.0,
            y_max: d / 2.0,
        })
    }

    fn shear_distribution(
        &self,
        dims: &Dimensions,
        props: &ShapeProperties,
        _d_1: f64,
    ) -> DesignResult<ShearDistribution> {
        let q_c = dims.b * dims.d.powi(2) / 8.0;
        Ok(ShearDistribution {
            q_c: Some(q_c),
            uniformity: q_c * dims.d / props.i_x,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::shapes::{SectionGeometry, SectionInput};

    #[test]
    fn test_plate_properties() {
        let geom = SectionGeometry::new(SectionInput::plate("300x9.9", 300.0, 9.9)).unwrap();
        let g = geom.gross;
        assert!((g.a_g - 2970.0).abs() < 1e-9);
        assert!((g.i_x - 9.9 * 300.0_f64.powi(3) / 12.0).abs() < 1e-6);
        assert!((g.s_x - 9.9 * 300.0_f64.powi(2) / 4.0).abs() < 1e-6);
        assert_eq!(g.j, 0.0);
    }

    #[test]
    fn test_parabolic_shear_distribution() {
        let geom = SectionGeometry::new(SectionInput::plate("300x9.9", 300.0, 9.9)).unwrap();
        assert!((geom.web.shear_stress_uniformity - 1.5).abs() < 1e-12);
        assert_eq!(geom.web.a_w, Some(300.0 * 9.9));
        assert_eq!(geom.t_w, 9.9);
    }
}
