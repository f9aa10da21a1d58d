//! Circular hollow sections (CHS). `d` is the outside diameter.

use std::f64::consts::PI;

use super::{Dimensions, SectionInput, ShapeCalculator, ShapeFamily, ShapeProperties};
use crate::errors::{DesignError, DesignResult};

pub struct CircularHollow;

impl ShapeCalculator for CircularHollow {
    fn family(&self) -> ShapeFamily {
        ShapeFamily::CircularHollow
    }

    fn dimensions(&self, input: &SectionInput) -> DesignResult<Dimensions> {
        let d = input.require("d")?;
        let t = input.require("t")?;
        if 2.0 * t >= d {
            return Err(DesignError::invalid_input("t", t.to_string(), "Wall thickness must be less than d/2"));
        }
        Ok(Dimensions {
            d,
            b: d,
            t_f: t,
            t_w: t,
            r: None,
        })
    }

    fn properties(&self, dims: &Dimensions) -> DesignResult<ShapeProperties> {
        let d = dims.d;
        let t = dims.t_f;
        let d_i = d - 2.0 * t;

        let a_g = PI * ((d / 2.0).powi(2) - (d / 2.0 - t).powi(2));
        let i = PI * (d.powi(4) - d_i.powi(4)) / 64.0;
        let s = (d.powi(3) - d_i.powi(3)) / 6.0;

        Ok(ShapeProperties {
            a_g,
            i_x: i,
            i_y: i,
            s_x: s,
            s_y: s,
            j: 2.0 * i,
            i_w: 0.0,
            x_c: d / 2.0,
            y_c: d / 2.0,
            x_max: d / 2.0,
            y_max: d / 2.0,
        })
    }
}
