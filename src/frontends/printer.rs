use crate::compute::Frame;
use crate::compute::Renderer;

/// Prints every n-th frame to stdout, prefixed by a topic.
#[derive(Clone, Debug)]
pub struct PrinterRenderer {
    /// Topic to print. It will be printed before each line.
    pub topic: String,
    /// Print one out of `every` frames.
    pub every: u64,
    frames: u64,
}

impl Default for PrinterRenderer {
    fn default() -> Self {
        PrinterRenderer::new("brick".to_owned(), 60)
    }
}

impl PrinterRenderer {
    /// New printer. An `every` of zero is treated as one.
    pub fn new(topic: String, every: u64) -> Self {
        Self {
            topic,
            every: every.max(1),
            frames: 0,
        }
    }

    /// Text printed for a frame.
    pub fn lines(&self, frame: &Frame) -> Vec<String> {
        let (tx, ty) = frame.true_body.center();
        let (ex, ey) = frame.estimated_body.center();
        let mut lines = vec![format!(
            "{}: true ({:.3}, {:.3})  estimate ({:.3}, {:.3}){}",
            self.topic,
            tx,
            ty,
            ex,
            ey,
            if frame.paused { "  [paused]" } else { "" }
        )];
        for overlay in &frame.overlays {
            for line in &overlay.lines {
                lines.push(format!("{}:   {}", self.topic, line));
            }
        }
        lines
    }
}

impl Renderer for PrinterRenderer {
    fn draw(&mut self, frame: &Frame) {
        let n = self.frames;
        self.frames += 1;
        if n % self.every != 0 {
            return;
        }
        for line in self.lines(frame) {
            println!("{}", line);
        }
    }
}
