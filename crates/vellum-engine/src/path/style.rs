/// Rule deciding which regions of a self-intersecting path are inside.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum FillRule {
    #[default]
    EvenOdd,
    NonZero,
}

impl From<FillRule> for lyon::tessellation::FillRule {
    fn from(rule: FillRule) -> Self {
        match rule {
            FillRule::EvenOdd => lyon::tessellation::FillRule::EvenOdd,
            FillRule::NonZero => lyon::tessellation::FillRule::NonZero,
        }
    }
}

/// Shape of open stroke ends.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

/// Shape of stroke corners.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

/// Stroke parameters. Defaults: width 1, butt caps, miter joins, miter limit 4.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct StrokeStyle {
    pub width: f32,
    pub cap: LineCap,
    pub join: LineJoin,
    pub miter_limit: f32,
}

impl StrokeStyle {
    #[inline]
    pub fn with_width(width: f32) -> Self {
        Self { width, ..Self::default() }
    }

    /// True when the stroke would cover no area.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.width > 0.0)
    }

    pub(crate) fn to_options(self, tolerance: f32) -> lyon::tessellation::StrokeOptions {
        use lyon::tessellation as tess;

        let cap = match self.cap {
            LineCap::Butt => tess::LineCap::Butt,
            LineCap::Round => tess::LineCap::Round,
            LineCap::Square => tess::LineCap::Square,
        };
        let join = match self.join {
            LineJoin::Miter => tess::LineJoin::Miter,
            LineJoin::Round => tess::LineJoin::Round,
            LineJoin::Bevel => tess::LineJoin::Bevel,
        };

        // lyon asserts on miter limits below 1.
        let miter_limit = if self.miter_limit.is_finite() {
            self.miter_limit.max(1.0)
        } else {
            4.0
        };

        tess::StrokeOptions::tolerance(tolerance)
            .with_line_width(self.width)
            .with_line_cap(cap)
            .with_line_join(join)
            .with_miter_limit(miter_limit)
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            width: 1.0,
            cap: LineCap::Butt,
            join: LineJoin::Miter,
            miter_limit: 4.0,
        }
    }
}
