//! Doubly symmetric I-sections (UB, UC, WB, WC).
//!
//! Two flanges, a web and four root fillets. Welded sections carry no fillet,
//! so `r_1` is simply left unspecified.

use super::{fillet_area, Dimensions, SectionInput, ShapeCalculator, ShapeFamily, ShapeProperties};
use crate::errors::{DesignError, DesignResult};

/// Second moment of a quarter-circle fillet spandrel about its own centroid
pub(crate) const FILLET_I: f64 = 0.01825;
/// Fillet centroid measured from the tangent point, as a fraction of r
pub(crate) const FILLET_CENTROID: f64 = 0.776;

pub struct IShape;

impl ShapeCalculator for IShape {
    fn family(&self) -> ShapeFamily {
        ShapeFamily::IShape
    }

    fn dimensions(&self, input: &SectionInput) -> DesignResult<Dimensions> {
        let dims = Dimensions {
            d: input.require("d")?,
            b: input.require("b")?,
            t_f: input.require("t_f")?,
            t_w: input.require("t_w")?,
            r: input.r_1,
        };
        if dims.d <= 2.0 * dims.t_f {
            return Err(DesignError::invalid_input(
                "d",
                dims.d.to_string(),
                "Depth must exceed twice the flange thickness",
            ));
        }
        Ok(dims)
    }

    fn properties(&self, dims: &Dimensions) -> DesignResult<ShapeProperties> {
        let Dimensions { d, b, t_f, t_w, .. } = *dims;
        let r = dims.radius();
        let f = fillet_area(r);
        let b_w = d - 2.0 * t_f;

        // Fillet centroid to the x and y axes
        let fy_arm = FILLET_CENTROID * r - r + d / 2.0 - t_f;
        let fx_arm = r - FILLET_CENTROID * r + t_w / 2.0;

        let a_g = 2.0 * b * t_f + t_w * b_w + 4.0 * f;

        let i_x = 2.0 * (b * t_f.powi(3) / 12.0 + b * t_f * ((d - t_f) / 2.0).powi(2))
            + t_w * b_w.powi(3) / 12.0
            + 4.0 * (FILLET_I * r.powi(4) + f * fy_arm.powi(2));
        let i_y = b_w * t_w.powi(3) / 12.0
            + 2.0 * (t_f * b.powi(3) / 12.0)
            + 4.0 * (FILLET_I * r.powi(4) + f * fx_arm.powi(2));

        let s_x = 2.0 * (t_w * (b_w / 2.0).powi(2) / 2.0 + t_f * b * (d - t_f) / 2.0) + 4.0 * f * fy_arm;
        let s_y = 2.0 * (b_w * (t_w / 2.0).powi(2) / 2.0 + 2.0 * t_f * (b / 2.0).powi(2) / 2.0) + 4.0 * f * fx_arm;

        let i_w = i_y * (d - t_f).powi(2) / 4.0;

        // Darwish & Johnston, flange-web junction
        let d_1 = ((t_f + r).powi(2) + t_w * (r + t_w / 4.0)) / (2.0 * r + t_f);
        let alpha_1 = -0.042 + 0.2204 * t_w / t_f + 0.1355 * r / t_f
            - 0.0865 * t_w * r / t_f.powi(2)
            - 0.0725 * t_w.powi(2) / t_f.powi(2);
        let j = (2.0 * b * t_f.powi(3) + (d - 2.0 * t_f) * t_w.powi(3)) / 3.0 + 2.0 * alpha_1 * d_1.powi(4)
            - 4.0 * 0.105 * t_f.powi(4);

        Ok(ShapeProperties {
            a_g,
            i_x,
            i_y,
            s_x,
            s_y,
            j,
            i_w,
            x_c: b / 2.0,
            y_c: d / 2.0,
            x_max: b / 2.0,
            y_max: d / 2.0,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::shapes::{SectionGeometry, SectionInput, SectionType};

    fn ub_460() -> SectionGeometry {
        SectionGeometry::new(SectionInput::open("460UB82.1", SectionType::UB, 460.0, 191.0, 16.0, 9.9, Some(11.4)))
            .unwrap()
    }

    #[test]
    fn test_460ub_matches_published_properties() {
        let g = ub_460().gross;
        assert!((g.a_g - 10_500.0).abs() / 10_500.0 < 0.01);
        assert!((g.i_x - 372e6).abs() / 372e6 < 0.01);
        assert!((g.z_x - 1610e3).abs() / 1610e3 < 0.01);
        assert!((g.s_x - 1840e3).abs() / 1840e3 < 0.01);
        assert!((g.j - 703e3).abs() / 703e3 < 0.03);
        assert!((g.i_w - 919e9).abs() / 919e9 < 0.02);
    }

    #[test]
    fn test_doubly_symmetric_centroid() {
        let g = ub_460().gross;
        assert_eq!(g.x_c, 95.5);
        assert_eq!(g.y_c, 230.0);
    }

    #[test]
    fn test_web_geometry() {
        let web = ub_460().web;
        assert_eq!(web.d_1, 428.0);
        assert_eq!(web.d_w, 460.0);
        assert_eq!(web.d_p, 428.0);
        assert!((web.a_w.unwrap() - 460.0 * 9.9).abs() < 1e-9);
        assert!((web.b_ff - 90.55).abs() < 1e-9);
    }

    #[test]
    fn test_missing_root_radius_omits_fillets() {
        let g = SectionGeometry::new(SectionInput::open("test", SectionType::WB, 400.0, 200.0, 20.0, 10.0, None))
            .unwrap()
            .gross;
        assert!((g.a_g - (2.0 * 200.0 * 20.0 + 10.0 * 360.0)).abs() < 1e-9);
    }

    #[test]
    fn test_flanges_thicker_than_depth_rejected() {
        let input = SectionInput::open("bad", SectionType::UC, 30.0, 200.0, 20.0, 10.0, None);
        assert!(SectionGeometry::new(input).is_err());
    }
}
