use vellum_engine::coords::Vec2;
use vellum_engine::paint::{Color, ColorStop, LinearGradient, Paint, RadialGradient, SpreadMode};
use vellum_engine::path::{ArcClosure, Path, PathError};
use vellum_engine::time::FrameTick;
use vellum_engine::{Canvas, Scene};

/// Degrees per second the outline turns.
const SPIN_RATE: f32 = 30.0;

/// The viewer's scene: a 90×50 ellipse centered on a white surface, with a
/// turning outline around it, a gradient pie in the top-left corner and a
/// radial halo in the top-right one.
pub struct DemoScene {
    ellipse: Path,
    outline: Path,
    pie: Path,
    pie_paint: Paint,
    halo: Path,
    halo_paint: Paint,
    angle: f32,
}

impl DemoScene {
    pub fn new() -> Result<Self, PathError> {
        let ellipse = Path::ellipse(0.0, 0.0, 90.0, 50.0)?;
        let outline = Path::round_rect(-70.0, -45.0, 140.0, 90.0, 24.0, 24.0)?;

        let mut pie = Path::builder();
        pie.add_arc(40.0, 40.0, 48.0, 48.0, 30.0, 300.0, ArcClosure::Pie)?;

        let pie_paint = Paint::LinearGradient(LinearGradient::new(
            Vec2::new(16.0, 16.0),
            Vec2::new(64.0, 64.0),
            vec![
                ColorStop::new(0.0, Color::from_rgba8(255, 196, 0, 255)),
                ColorStop::new(0.5, Color::from_rgba8(255, 255, 255, 255)),
                ColorStop::new(1.0, Color::from_rgba8(224, 64, 32, 255)),
            ],
            SpreadMode::Pad,
        ));

        let halo = Path::ellipse(0.0, 0.0, 56.0, 56.0)?;
        let halo_paint = Paint::RadialGradient(RadialGradient::new(
            Vec2::ZERO,
            Vec2::new(-8.0, -8.0),
            28.0,
            vec![
                ColorStop::new(0.0, Color::from_rgba8(255, 255, 255, 255)),
                ColorStop::new(0.6, Color::from_rgba8(64, 160, 96, 255)),
                ColorStop::new(1.0, Color::from_rgba8(16, 48, 32, 255)),
            ],
            SpreadMode::Pad,
        ));

        Ok(Self {
            ellipse,
            outline,
            pie: pie.build()?,
            pie_paint,
            halo,
            halo_paint,
            angle: 0.0,
        })
    }
}

impl Scene for DemoScene {
    fn draw(&mut self, canvas: &mut Canvas<'_>, tick: &FrameTick) -> anyhow::Result<()> {
        let vp = canvas.viewport();
        canvas.set_clear_color(Color::WHITE);

        canvas.load_identity();
        canvas.translate(vp.width / 2.0, vp.height / 2.0);
        canvas.set_fill_paint(Color::BLACK);
        canvas.fill(&self.ellipse)?;

        self.angle = (self.angle + SPIN_RATE * tick.dt) % 360.0;
        canvas.save();
        canvas.rotate(self.angle);
        canvas.set_stroke_paint(Color::from_rgba8(32, 96, 224, 255));
        canvas.set_stroke_width(3.0);
        canvas.stroke(&self.outline)?;
        canvas.restore();

        canvas.load_identity();
        canvas.set_fill_paint(self.pie_paint.clone());
        canvas.fill(&self.pie)?;

        canvas.translate(vp.width - 40.0, 40.0);
        canvas.set_fill_paint(self.halo_paint.clone());
        canvas.fill(&self.halo)?;

        Ok(())
    }
}
