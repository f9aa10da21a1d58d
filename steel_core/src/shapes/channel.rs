//! Parallel flange channels (PFC).
//!
//! Mono-symmetric about x. The centroid `x_c` and plastic neutral axis are
//! measured from the back of the web.

use super::ishape::{FILLET_CENTROID, FILLET_I};
use super::{fillet_area, Dimensions, SectionInput, ShapeCalculator, ShapeFamily, ShapeProperties};
use crate::errors::{DesignError, DesignResult};

pub struct Channel;

impl Channel {
    /// Plastic neutral axis for minor-axis bending, from the web back
    pub fn plastic_neutral_axis(dims: &Dimensions, a_g: f64) -> f64 {
        if dims.t_w < a_g / (2.0 * dims.d) {
            dims.b - a_g / (4.0 * dims.t_f)
        } else {
            a_g / (2.0 * dims.d)
        }
    }
}

impl ShapeCalculator for Channel {
    fn family(&self) -> ShapeFamily {
        ShapeFamily::Channel
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
        let b_f = b - t_w;
        let b_w = d - 2.0 * t_f;
        let x_rad = (1.0 - FILLET_CENTROID) * r;
        let fy_arm = FILLET_CENTROID * r - r + d / 2.0 - t_f;

        let a_g = 2.0 * t_f * b_f + d * t_w + 2.0 * f;
        let x_c = (t_w.powi(2) / 2.0 * b_w + 2.0 * (b.powi(2) / 2.0) * t_f + 2.0 * f * (x_rad + t_w)) / a_g;
        let x_pna = Self::plastic_neutral_axis(dims, a_g);

        let i_x = t_w * d.powi(3) / 12.0
            + 2.0 * t_f.powi(3) * b_f / 12.0
            + t_f * b_f * 2.0 * (d / 2.0 - t_f / 2.0).powi(2)
            + 2.0 * (FILLET_I * r.powi(4) + f * fy_arm.powi(2));
        let i_y = b_w * t_w.powi(3) / 12.0
            + 2.0 * b.powi(3) * t_f / 12.0
            + b_w * t_w * (x_c - t_w / 2.0).powi(2)
            + 2.0 * t_f * b * (b / 2.0 - x_c).powi(2)
            + 2.0 * (FILLET_I * r.powi(4) + f * (x_c - t_w - x_rad).powi(2));

        let s_x = 2.0 * (t_w * (b_w / 2.0).powi(2) / 2.0 + t_f * b * (d / 2.0 - t_f / 2.0)) + 2.0 * f * fy_arm;

        let s_y_plates = if x_pna > t_w {
            t_f * b_f.powi(2) / 2.0 + b * d * t_w / 2.0 - d.powi(2) * t_w.powi(2) / (8.0 * t_f)
        } else {
            (4.0 * t_f * b.powi(2) * (d - t_f) + t_w.powi(2) * (d.powi(2) - 4.0 * t_f.powi(2))
                - 4.0 * b * t_f * b_w * t_w)
                / (4.0 * d)
        };
        let x_fillet = if x_pna > t_w + x_rad {
            x_pna - t_w - x_rad
        } else {
            (t_w - x_pna) + x_rad
        };
        let s_y = s_y_plates + 2.0 * f * x_fillet;

        let i_w = (d - t_f).powi(2) / 4.0
            * (i_y - a_g * (x_c - t_w / 2.0).powi(2) * ((d - t_f).powi(2) * a_g / (4.0 * i_x) - 1.0));

        let alpha_3 = -0.0908 + 0.2621 * t_w / t_f + 0.1231 * r / t_f
            - 0.0752 * t_w * r / t_f.powi(2)
            - 0.0945 * t_w.powi(2) / t_f.powi(2);
        let d_3 = 2.0 * ((3.0 * r + t_w + t_f) - (2.0 * (2.0 * r + t_w) * (2.0 * r + t_f)).sqrt());
        let j = 2.0 * b * t_f.powi(3) / 3.0 + (d - 2.0 * t_f) * t_w.powi(3) / 3.0 + 2.0 * alpha_3 * d_3.powi(4)
            - 2.0 * 0.105 * t_f.powi(4);

        Ok(ShapeProperties {
            a_g,
            i_x,
            i_y,
            s_x,
            s_y,
            j,
            i_w,
            x_c,
            y_c: d / 2.0,
            x_max: x_c.max(b - x_c),
            y_max: d / 2.0,
        })
    }
}
