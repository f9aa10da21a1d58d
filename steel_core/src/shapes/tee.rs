//! Tees cut from universal sections (BT, CT).
//!
//! `y_c` is measured down from the top of the flange. The web shear stress is
//! not uniform, so tees report the first moment `Q_c` about the centroid.

use super::ishape::{FILLET_CENTROID, FILLET_I};
use super::{
    fillet_area, Dimensions, SectionInput, ShapeCalculator, ShapeFamily, ShapeProperties, ShearDistribution,
};
use crate::errors::{DesignError, DesignResult};

pub struct Tee;

impl ShapeCalculator for Tee {
    fn family(&self) -> ShapeFamily {
        ShapeFamily::Tee
    }

    fn dimensions(&self, input: &SectionInput) -> DesignResult<Dimensions> {
        let dims = Dimensions {
            d: input.require("d")?,
            b: input.require("b")?,
            t_f: input.require("t_f")?,
            t_w: input.require("t_w")?,
            r: input.r_1,
        };
        if dims.d <= dims.t_f {
            return Err(DesignError::invalid_input(
                "d",
                dims.d.to_string(),
                "Depth must exceed the flange thickness",
            ));
        }
        Ok(dims)
    }

    fn properties(&self, dims: &Dimensions) -> DesignResult<ShapeProperties> {
        let Dimensions { d, b, t_f, t_w, .. } = *dims;
        let r = dims.radius();
        let f = fillet_area(r);
        let b_w = d - t_f;
        let x_rad = (1.0 - FILLET_CENTROID) * r;

        let a_g = b * t_f + t_w * b_w + 2.0 * f;
        let y_c = (t_w * b_w * (b_w / 2.0 + t_f) + b * t_f.powi(2) / 2.0 + 2.0 * f * (t_f + x_rad)) / a_g;

        let i_x = (b * t_f.powi(3) + t_w * b_w.powi(3)) / 12.0
            + 2.0 * FILLET_I * r.powi(4)
            + b * t_f * (y_c - t_f / 2.0).powi(2)
            + b_w * t_w * (y_c - (t_f + b_w / 2.0)).powi(2)
            + 2.0 * f * (y_c - (t_f + x_rad)).powi(2);
        let i_y = b_w * t_w.powi(3) / 12.0
            + t_f * b.powi(3) / 12.0
            + 2.0 * (FILLET_I * r.powi(4) + f * (x_rad + t_w / 2.0).powi(2));

        // Plastic neutral axis in the flange or in the web
        let s_x = if t_f < a_g / (2.0 * b) {
            t_w * (d - t_f).powi(2) / 4.0 + b * d * t_f / 2.0 - b.powi(2) * t_f.powi(2) / (4.0 * t_w)
        } else {
            t_w * d.powi(2) / 2.0 + b * t_f.powi(2) / 4.0
                - d * t_f * t_w / 2.0
                - (d - t_f).powi(2) * t_w.powi(2) / (4.0 * b)
        };
        let s_y = b_w * t_w.powi(2) / 4.0 + t_f * b.powi(2) / 4.0 + 2.0 * f * (x_rad + t_w / 2.0);

        let d_1 = ((t_f + r).powi(2) + t_w * (r + t_w / 4.0)) / (2.0 * r + t_f);
        let alpha_1 = -0.042 + 0.2204 * t_w / t_f + 0.1355 * r / t_f
            - 0.0865 * t_w * r / t_f.powi(2)
            - 0.0725 * t_w.powi(2) / t_f.powi(2);
        let j = b * t_f.powi(3) / 3.0 + (d - t_f) * t_w.powi(3) / 3.0 + alpha_1 * d_1.powi(4)
            - 0.105 * t_w.powi(4)
            - 2.0 * 0.105 * t_f.powi(4);

        Ok(ShapeProperties {
            a_g,
            i_x,
            i_y,
            s_x,
            s_y,
            j,
            i_w: 0.0,
            x_c: b / 2.0,
            y_c,
            x_max: b / 2.0,
            y_max: y_c.max(d - y_c),
        })
    }

    fn shear_distribution(
        &self,
        dims: &Dimensions,
        props: &ShapeProperties,
        d_1: f64,
    ) -> DesignResult<ShearDistribution> {
        let Dimensions { b, t_f, t_w, .. } = *dims;
        let r = dims.radius();
        let y_c = props.y_c;

        let q_c = if y_c >= t_f + r {
            b * t_f * (y_c - 0.5 * t_f) + 0.4292 * r.powi(2) * (y_c - t_f - 0.223 * r) + t_w * (y_c - t_f).powi(2) / 2.0
        } else if y_c >= t_f {
            b * t_f * (y_c - 0.5 * t_f) + t_w * (y_c - t_f).powi(2) / 2.0
        } else {
            return Err(DesignError::unimplemented(
                "tee first moment of area",
                format!("centroid within the flange (y_c = {:.1} < t_f = {})", y_c, t_f),
            ));
        };

        Ok(ShearDistribution {
            q_c: Some(q_c),
            uniformity: q_c * d_1 / props.i_x,
        })
    }
}
