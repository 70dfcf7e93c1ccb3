// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use fngraph_geometry::{
    lift_points, path_mesh, try_trace_integral_curve, Bounds, Point2, TraceDirection,
};

use super::{Height, Layer, LayerSlot};
use crate::config::IntegralStyle;
use crate::drawable::{Color, Geometry};
use crate::error::Result;
use crate::fingerprint::{Fingerprint, FingerprintBuilder};
use crate::keys::FunctionId;

/// Solution curve of `dy/dx = f(x, y)` through a movable initial point.
pub struct IntegralLayer<F> {
    function: FunctionId,
    func: F,
    initial: Point2<f64>,
    height: Height,
    pub style: IntegralStyle,
    slot: LayerSlot,
}

impl<F> IntegralLayer<F>
where
    F: Fn(f64, f64) -> f64,
{
    pub fn new(function: FunctionId, func: F, initial: Point2<f64>, style: IntegralStyle) -> Self {
        Self {
            function,
            func,
            initial,
            height: Height::flat(),
            style,
            slot: LayerSlot::default(),
        }
    }

    pub fn set_function(&mut self, function: FunctionId, func: F) {
        self.function = function;
        self.func = func;
    }

    /// Move the initial point, e.g. while it is dragged. The curve is
    /// retraced on the next update.
    pub fn set_initial_point(&mut self, initial: Point2<f64>) {
        self.initial = initial;
    }

    pub fn initial_point(&self) -> Point2<f64> {
        self.initial
    }

    pub fn set_height(&mut self, height: Height) {
        self.height = height;
    }
}

impl<F> Layer for IntegralLayer<F>
where
    F: Fn(f64, f64) -> f64,
{
    fn name(&self) -> &'static str {
        "integral"
    }

    fn is_visible(&self) -> bool {
        self.style.visible
    }

    fn color(&self) -> Color {
        self.style.color
    }

    fn geometry_fingerprint(&self, bounds: &Bounds) -> Fingerprint {
        let direction = match TraceDirection::from(self.style.direction) {
            TraceDirection::Forward => 0,
            TraceDirection::Backward => 1,
            TraceDirection::Both => 2,
        };
        FingerprintBuilder::new("integral")
            .function(self.function)
            .function(self.height.id())
            .bounds(bounds)
            .point(self.initial)
            .f64(self.style.step)
            .f64(self.style.radius)
            .u64(direction)
            .finish()
    }

    fn build(&self, bounds: &Bounds) -> Result<Option<Geometry>> {
        let traced = try_trace_integral_curve(
            &self.func,
            self.initial,
            bounds,
            self.style.step,
            self.style.direction.into(),
        )?;
        let Some(points) = traced else {
            return Ok(None);
        };

        let height = &self.height;
        let lifted = lift_points(&points, |x, y| height.eval(x, y));
        tracing::debug!(
            function = %self.function,
            x = self.initial.x,
            y = self.initial.y,
            points = lifted.len(),
            "Integral curve traced"
        );
        Ok(path_mesh(&lifted, self.style.radius).map(Geometry::Mesh))
    }

    fn slot(&self) -> &LayerSlot {
        &self.slot
    }

    fn slot_mut(&mut self) -> &mut LayerSlot {
        &mut self.slot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::NullRenderer;
    use crate::scene::Scene;

    #[test]
    fn dragging_outside_bounds_hides_the_curve() {
        let mut scene = Scene::new(NullRenderer);
        let bounds = Bounds::default();
        let style = IntegralStyle {
            step: 0.1,
            ..IntegralStyle::default()
        };
        let mut layer = IntegralLayer::new(FunctionId(1), |_, y| y, Point2::new(0.0, 1.0), style);
        assert!(layer.update(&mut scene, &bounds).unwrap().is_some());

        layer.set_initial_point(Point2::new(20.0, 1.0));
        assert_eq!(layer.update(&mut scene, &bounds).unwrap(), None);
        assert!(scene.is_empty());

        layer.set_initial_point(Point2::new(1.0, 1.0));
        assert!(layer.update(&mut scene, &bounds).unwrap().is_some());
        assert_eq!(scene.len(), 1);
    }
}
