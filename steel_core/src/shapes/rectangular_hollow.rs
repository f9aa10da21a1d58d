//! Rectangular and square hollow sections (RHS, SHS).
//!
//! Four straight walls joined by quarter-annulus corners of outside radius
//! `r_o`. Without `r_o` the corners are taken as square.

use std::f64::consts::PI;

use super::{Dimensions, SectionInput, ShapeCalculator, ShapeFamily, ShapeProperties};
use crate::errors::{DesignError, DesignResult};

/// Second moment of a quarter circle about its own centroid, as a multiple of r^4
const QUARTER_CIRCLE_I: f64 = 0.05488;

pub struct RectangularHollow;

/// Outer and inner corner arcs as (radius, area, centroid distance from the
/// axis), where `h` is the overall dimension across the axis
fn corner_arms(h: f64, t: f64, r_o: f64) -> [(f64, f64, f64); 2] {
    let r_i = r_o - t;
    let c = 4.0 / (3.0 * PI);
    [
        (r_o, PI * r_o.powi(2) / 4.0, h / 2.0 + c * r_o - r_o),
        (r_i, PI * r_i.powi(2) / 4.0, h / 2.0 - t + c * r_i - r_i),
    ]
}

fn corner_second_moment(h: f64, t: f64, r_o: f64) -> f64 {
    let [(r_o, a_o, y_o), (r_i, a_i, y_i)] = corner_arms(h, t, r_o);
    4.0 * ((QUARTER_CIRCLE_I * r_o.powi(4) + a_o * y_o.powi(2)) - (QUARTER_CIRCLE_I * r_i.powi(4) + a_i * y_i.powi(2)))
}

fn corner_first_moment(h: f64, t: f64, r_o: f64) -> f64 {
    let [(_, a_o, y_o), (_, a_i, y_i)] = corner_arms(h, t, r_o);
    4.0 * (a_o * y_o) - 4.0 * (a_i * y_i)
}

impl ShapeCalculator for RectangularHollow {
    fn family(&self) -> ShapeFamily {
        ShapeFamily::RectangularHollow
    }

    fn dimensions(&self, input: &SectionInput) -> DesignResult<Dimensions> {
        let d = input.require("d")?;
        let b = input.require("b")?;
        let t = input.require("t")?;
        if 2.0 * t >= d.min(b) {
            return Err(DesignError::invalid_input("t", t.to_string(), "Wall thickness must be less than half the width"));
        }
        if let Some(r_o) = input.r_o {
            if r_o < t {
                return Err(DesignError::invalid_input(
                    "r_o",
                    r_o.to_string(),
                    "Outside corner radius must be at least the wall thickness",
                ));
            }
        }
        Ok(Dimensions {
            d,
            b,
            t_f: t,
            t_w: t,
            r: input.r_o,
        })
    }

    fn properties(&self, dims: &Dimensions) -> DesignResult<ShapeProperties> {
        let Dimensions { d, b, .. } = *dims;
        let t = dims.t_f;

        let (a_g, i_x, i_y, s_x, s_y) = match dims.r {
            Some(r_o) => {
                let a_g = 2.0 * ((d - 2.0 * r_o) * t + (b - 2.0 * r_o) * t) + PI * (r_o.powi(2) - (r_o - t).powi(2));
                let i_x = 2.0 * ((d - 2.0 * r_o).powi(3) * t / 12.0)
                    + 2.0 * ((b - 2.0 * r_o) * t.powi(3) / 12.0 + (b - 2.0 * r_o) * t * (d / 2.0 - t / 2.0).powi(2))
                    + corner_second_moment(d, t, r_o);
                let i_y = 2.0 * ((b - 2.0 * r_o).powi(3) * t / 12.0)
                    + 2.0 * ((d - 2.0 * r_o) * t.powi(3) / 12.0 + (d - 2.0 * r_o) * t * (b / 2.0 - t / 2.0).powi(2))
                    + corner_second_moment(b, t, r_o);
                let s_x = 2.0 * (((d - 2.0 * r_o) / 2.0).powi(2) * t + t * (b - 2.0 * r_o) * (d - t) / 2.0)
                    + corner_first_moment(d, t, r_o);
                let s_y = 2.0 * (((b - 2.0 * r_o) / 2.0).powi(2) * t + t * (d - 2.0 * r_o) * (b - t) / 2.0)
                    + corner_first_moment(b, t, r_o);
                (a_g, i_x, i_y, s_x, s_y)
            }
            None => {
                let (b_i, d_i) = (b - 2.0 * t, d - 2.0 * t);
                (
                    b * d - b_i * d_i,
                    (b * d.powi(3) - b_i * d_i.powi(3)) / 12.0,
                    (d * b.powi(3) - d_i * b_i.powi(3)) / 12.0,
                    (b * d.powi(2) - b_i * d_i.powi(2)) / 4.0,
                    (d * b.powi(2) - d_i * b_i.powi(2)) / 4.0,
                )
            }
        };

        // Thin-wall torsion on the wall mid-line
        let r_m = dims.r.map_or(0.0, |r_o| r_o - t / 2.0);
        let p = 2.0 * ((d - t) + (b - t)) - 2.0 * r_m * (4.0 - PI);
        let a_p = (d - t) * (b - t) - r_m.powi(2) * (4.0 - PI);
        let j = 4.0 * t * a_p.powi(2) / p + p * t.powi(3) / 3.0;

        Ok(ShapeProperties {
            a_g,
            i_x,
            i_y,
            s_x,
            s_y,
            j,
            i_w: 0.0,
            x_c: b / 2.0,
            y_c: d / 2.0,
            x_max: b / 2.0,
            y_max: d / 2.0,
        })
    }
}
